use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::entities::Product;
use crate::domain::repositories::ProductRepository;
use crate::domain::value_objects::{ProductId, Sku};
use crate::error::InventoryError;

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, InventoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, sku, name, description, category, price, is_active, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn find_by_sku(&self, sku: &Sku) -> Result<Option<Product>, InventoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, sku, name, description, category, price, is_active, created_at, updated_at
            FROM products
            WHERE sku = $1
            "#,
        )
        .bind(sku.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn save(&self, product: &Product) -> Result<(), InventoryError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, sku, name, description, category, price, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(product.id().into_uuid())
        .bind(product.sku().as_str())
        .bind(product.name())
        .bind(product.description())
        .bind(product.category())
        .bind(product.price())
        .bind(product.is_active())
        .bind(product.created_at())
        .bind(product.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                InventoryError::DuplicateSku(product.sku().as_str().to_string())
            }
            _ => InventoryError::Database(e),
        })?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), InventoryError> {
        sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, category = $4, price = $5, is_active = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(product.id().into_uuid())
        .bind(product.name())
        .bind(product.description())
        .bind(product.category())
        .bind(product.price())
        .bind(product.is_active())
        .bind(product.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_active(&self, page: i64, page_size: i64) -> Result<Vec<Product>, InventoryError> {
        let offset = page.saturating_sub(1).max(0) * page_size;
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, sku, name, description, category, price, is_active, created_at, updated_at
            FROM products
            WHERE is_active = true
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: uuid::Uuid,
    sku: String,
    name: String,
    description: Option<String>,
    category: String,
    price: Decimal,
    is_active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = InventoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product::from_parts(
            ProductId::from_uuid(row.id),
            Sku::new(row.sku)?,
            row.name,
            row.description,
            row.category,
            row.price,
            row.is_active,
            row.created_at,
            row.updated_at,
        ))
    }
}
