use async_trait::async_trait;

use crate::domain::entities::Warehouse;
use crate::domain::value_objects::WarehouseId;
use crate::error::InventoryError;

#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    async fn find_by_id(&self, id: WarehouseId) -> Result<Option<Warehouse>, InventoryError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Warehouse>, InventoryError>;

    async fn save(&self, warehouse: &Warehouse) -> Result<(), InventoryError>;

    async fn update(&self, warehouse: &Warehouse) -> Result<(), InventoryError>;

    async fn list_active(&self) -> Result<Vec<Warehouse>, InventoryError>;
}
