use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::{AggregatedStockView, LowStockAlertView};
use crate::domain::repositories::ViewsRepository;
use crate::domain::value_objects::{AlertLevel, ProductId, WarehouseId};
use crate::error::InventoryError;

/// Persistence for the materialized projections of C6. `replace_*` is
/// called by the refresh sweep and swaps the full projection inside one
/// transaction so readers never see a half-rebuilt view.
pub struct PgViewsRepository {
    pool: PgPool,
}

impl PgViewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ViewsRepository for PgViewsRepository {
    async fn replace_aggregated_stock(&self, rows: Vec<AggregatedStockView>) -> Result<(), InventoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM aggregated_stock_view").execute(&mut *tx).await?;

        for row in &rows {
            sqlx::query(
                r#"
                INSERT INTO aggregated_stock_view
                    (product_id, sku, total_quantity, total_reserved, total_available, warehouse_count, refreshed_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(row.product_id.into_uuid())
            .bind(&row.sku)
            .bind(row.total_quantity)
            .bind(row.total_reserved)
            .bind(row.total_available)
            .bind(row.warehouse_count)
            .bind(row.refreshed_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn replace_low_stock_alerts(&self, rows: Vec<LowStockAlertView>) -> Result<(), InventoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM low_stock_alert_view").execute(&mut *tx).await?;

        for row in &rows {
            sqlx::query(
                r#"
                INSERT INTO low_stock_alert_view
                    (product_id, warehouse_id, sku, warehouse_code, available, alert_level, refreshed_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(row.product_id.into_uuid())
            .bind(row.warehouse_id.into_uuid())
            .bind(&row.sku)
            .bind(&row.warehouse_code)
            .bind(row.alert_level.to_string())
            .bind(row.available)
            .bind(row.refreshed_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_aggregated_stock(&self, product_id: ProductId) -> Result<Option<AggregatedStockView>, InventoryError> {
        let row = sqlx::query_as::<_, AggregatedRow>(
            r#"
            SELECT product_id, sku, total_quantity, total_reserved, total_available, warehouse_count, refreshed_at
            FROM aggregated_stock_view
            WHERE product_id = $1
            "#,
        )
        .bind(product_id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_low_stock_alerts(&self, warehouse_id: Option<WarehouseId>) -> Result<Vec<LowStockAlertView>, InventoryError> {
        let rows = match warehouse_id {
            Some(wid) => {
                sqlx::query_as::<_, LowStockAlertRow>(
                    r#"
                    SELECT product_id, warehouse_id, sku, warehouse_code, available, alert_level, refreshed_at
                    FROM low_stock_alert_view
                    WHERE warehouse_id = $1
                    ORDER BY available ASC
                    "#,
                )
                .bind(wid.into_uuid())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, LowStockAlertRow>(
                    r#"
                    SELECT product_id, warehouse_id, sku, warehouse_code, available, alert_level, refreshed_at
                    FROM low_stock_alert_view
                    ORDER BY available ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(|r| r.try_into()).collect()
    }
}

#[derive(sqlx::FromRow)]
struct AggregatedRow {
    product_id: uuid::Uuid,
    sku: String,
    total_quantity: i64,
    total_reserved: i64,
    total_available: i64,
    warehouse_count: i64,
    refreshed_at: chrono::DateTime<chrono::Utc>,
}

impl From<AggregatedRow> for AggregatedStockView {
    fn from(row: AggregatedRow) -> Self {
        AggregatedStockView {
            product_id: ProductId::from_uuid(row.product_id),
            sku: row.sku,
            total_quantity: row.total_quantity,
            total_reserved: row.total_reserved,
            total_available: row.total_available,
            warehouse_count: row.warehouse_count,
            refreshed_at: row.refreshed_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LowStockAlertRow {
    product_id: uuid::Uuid,
    warehouse_id: uuid::Uuid,
    sku: String,
    warehouse_code: String,
    available: i64,
    alert_level: String,
    refreshed_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<LowStockAlertRow> for LowStockAlertView {
    type Error = InventoryError;

    fn try_from(row: LowStockAlertRow) -> Result<Self, Self::Error> {
        Ok(LowStockAlertView {
            product_id: ProductId::from_uuid(row.product_id),
            warehouse_id: WarehouseId::from_uuid(row.warehouse_id),
            sku: row.sku,
            warehouse_code: row.warehouse_code,
            available: row.available,
            alert_level: alert_level_from_str(&row.alert_level),
            refreshed_at: row.refreshed_at,
        })
    }
}

fn alert_level_from_str(s: &str) -> AlertLevel {
    match s {
        "CRITICAL" => AlertLevel::Critical,
        "OUT_OF_STOCK" => AlertLevel::OutOfStock,
        "LOW" => AlertLevel::Low,
        _ => AlertLevel::Warning,
    }
}
