use async_trait::async_trait;

use crate::domain::entities::Product;
use crate::domain::value_objects::{ProductId, Sku};
use crate::error::InventoryError;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, InventoryError>;

    async fn find_by_sku(&self, sku: &Sku) -> Result<Option<Product>, InventoryError>;

    async fn save(&self, product: &Product) -> Result<(), InventoryError>;

    async fn update(&self, product: &Product) -> Result<(), InventoryError>;

    async fn list_active(&self, page: i64, page_size: i64) -> Result<Vec<Product>, InventoryError>;
}
