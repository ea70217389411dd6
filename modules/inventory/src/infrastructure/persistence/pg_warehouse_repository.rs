use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::Warehouse;
use crate::domain::repositories::WarehouseRepository;
use crate::domain::value_objects::WarehouseId;
use crate::error::InventoryError;

pub struct PgWarehouseRepository {
    pool: PgPool,
}

impl PgWarehouseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WarehouseRepository for PgWarehouseRepository {
    async fn find_by_id(&self, id: WarehouseId) -> Result<Option<Warehouse>, InventoryError> {
        let row = sqlx::query_as::<_, WarehouseRow>(
            r#"
            SELECT id, code, location, priority, is_active, created_at, updated_at
            FROM warehouses
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Warehouse>, InventoryError> {
        let row = sqlx::query_as::<_, WarehouseRow>(
            r#"
            SELECT id, code, location, priority, is_active, created_at, updated_at
            FROM warehouses
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn save(&self, warehouse: &Warehouse) -> Result<(), InventoryError> {
        sqlx::query(
            r#"
            INSERT INTO warehouses (id, code, location, priority, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(warehouse.id().into_uuid())
        .bind(warehouse.code())
        .bind(warehouse.location())
        .bind(warehouse.priority())
        .bind(warehouse.is_active())
        .bind(warehouse.created_at())
        .bind(warehouse.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                InventoryError::DuplicateWarehouseCode(warehouse.code().to_string())
            }
            _ => InventoryError::Database(e),
        })?;

        Ok(())
    }

    async fn update(&self, warehouse: &Warehouse) -> Result<(), InventoryError> {
        sqlx::query(
            r#"
            UPDATE warehouses
            SET code = $2, location = $3, priority = $4, is_active = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(warehouse.id().into_uuid())
        .bind(warehouse.code())
        .bind(warehouse.location())
        .bind(warehouse.priority())
        .bind(warehouse.is_active())
        .bind(warehouse.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<Warehouse>, InventoryError> {
        let rows = sqlx::query_as::<_, WarehouseRow>(
            r#"
            SELECT id, code, location, priority, is_active, created_at, updated_at
            FROM warehouses
            WHERE is_active = true
            ORDER BY priority ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(sqlx::FromRow)]
struct WarehouseRow {
    id: uuid::Uuid,
    code: String,
    location: String,
    priority: i32,
    is_active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<WarehouseRow> for Warehouse {
    fn from(row: WarehouseRow) -> Self {
        Warehouse::from_parts(
            WarehouseId::from_uuid(row.id),
            row.code,
            row.location,
            row.priority,
            row.is_active,
            row.created_at,
            row.updated_at,
        )
    }
}
