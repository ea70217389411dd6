use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::StockRow;
use crate::domain::repositories::StockRowRepository;
use crate::domain::value_objects::{ProductId, StockRowId, WarehouseId};
use crate::error::InventoryError;

pub(crate) const SELECT_COLUMNS: &str =
    "id, product_id, warehouse_id, quantity, reserved, available, version, last_sync_at, created_at, updated_at";

/// PostgreSQL-backed Stock Store (C1). `apply` is the sole mutating entry
/// point and performs the `WHERE id = $1 AND version = $2`
/// compare-and-swap described in the data model.
pub struct PgStockRowRepository {
    pool: PgPool,
}

impl PgStockRowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockRowRepository for PgStockRowRepository {
    async fn get(&self, product_id: ProductId, warehouse_id: WarehouseId) -> Result<Option<StockRow>, InventoryError> {
        let row = sqlx::query_as::<_, StockRowRecord>(&format!(
            "SELECT {SELECT_COLUMNS} FROM stock_rows WHERE product_id = $1 AND warehouse_id = $2"
        ))
        .bind(product_id.into_uuid())
        .bind(warehouse_id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn get_by_product(&self, product_id: ProductId) -> Result<Vec<StockRow>, InventoryError> {
        let rows = sqlx::query_as::<_, StockRowRecord>(&format!(
            "SELECT {SELECT_COLUMNS} FROM stock_rows WHERE product_id = $1 ORDER BY warehouse_id"
        ))
        .bind(product_id.into_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn upsert_init(&self, product_id: ProductId, warehouse_id: WarehouseId) -> Result<StockRow, InventoryError> {
        let row = sqlx::query_as::<_, StockRowRecord>(&format!(
            r#"
            INSERT INTO stock_rows (id, product_id, warehouse_id, quantity, reserved, available, version, last_sync_at, created_at, updated_at)
            VALUES ($1, $2, $3, 0, 0, 0, 0, NULL, now(), now())
            ON CONFLICT (product_id, warehouse_id) DO UPDATE SET product_id = stock_rows.product_id
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(StockRowId::new().into_uuid())
        .bind(product_id.into_uuid())
        .bind(warehouse_id.into_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn apply(&self, row: &StockRow, expected_version: i32) -> Result<StockRow, InventoryError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, StockRowRecord>(&format!(
            r#"
            UPDATE stock_rows
            SET quantity = $3, reserved = $4, available = $5, version = $6, last_sync_at = $7, updated_at = $8
            WHERE id = $1 AND version = $2
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(row.id().into_uuid())
        .bind(expected_version)
        .bind(row.quantity())
        .bind(row.reserved())
        .bind(row.available())
        .bind(row.version())
        .bind(row.last_sync_at())
        .bind(row.updated_at())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(updated) = updated else {
            tx.rollback().await?;
            return Err(InventoryError::VersionConflict(row.id().into_uuid()));
        };

        tx.commit().await?;
        Ok(updated.into())
    }

    async fn scan_low_stock(&self, threshold: i64, warehouse_id: Option<WarehouseId>) -> Result<Vec<StockRow>, InventoryError> {
        let rows = match warehouse_id {
            Some(wid) => {
                sqlx::query_as::<_, StockRowRecord>(&format!(
                    "SELECT {SELECT_COLUMNS} FROM stock_rows WHERE warehouse_id = $1 AND available < $2 ORDER BY available ASC"
                ))
                .bind(wid.into_uuid())
                .bind(threshold)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, StockRowRecord>(&format!(
                    "SELECT {SELECT_COLUMNS} FROM stock_rows WHERE available < $1 ORDER BY available ASC"
                ))
                .bind(threshold)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn scan_all(&self, warehouse_id: Option<WarehouseId>) -> Result<Vec<StockRow>, InventoryError> {
        let rows = match warehouse_id {
            Some(wid) => {
                sqlx::query_as::<_, StockRowRecord>(&format!(
                    "SELECT {SELECT_COLUMNS} FROM stock_rows WHERE warehouse_id = $1 ORDER BY product_id"
                ))
                .bind(wid.into_uuid())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, StockRowRecord>(&format!("SELECT {SELECT_COLUMNS} FROM stock_rows ORDER BY product_id"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct StockRowRecord {
    id: uuid::Uuid,
    product_id: uuid::Uuid,
    warehouse_id: uuid::Uuid,
    quantity: i64,
    reserved: i64,
    available: i64,
    version: i32,
    last_sync_at: Option<chrono::DateTime<chrono::Utc>>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<StockRowRecord> for StockRow {
    fn from(row: StockRowRecord) -> Self {
        StockRow::from_parts(
            StockRowId::from_uuid(row.id),
            ProductId::from_uuid(row.product_id),
            WarehouseId::from_uuid(row.warehouse_id),
            row.quantity,
            row.reserved,
            row.available,
            row.version,
            row.last_sync_at,
            row.created_at,
            row.updated_at,
        )
    }
}
