use async_trait::async_trait;

use crate::domain::value_objects::ProductId;
use crate::error::InventoryError;

/// A point-in-time snapshot of availability for a product, either scoped
/// to one warehouse or summed across all of them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AvailabilitySnapshot {
    pub total: i64,
    pub reserved: i64,
    pub available: i64,
    /// Present only for the all-warehouses aggregate case.
    pub per_warehouse: Option<Vec<WarehouseAvailability>>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WarehouseAvailability {
    pub warehouse_id: uuid::Uuid,
    pub quantity: i64,
    pub reserved: i64,
    pub available: i64,
}

/// Read-through cache port for C5. Keys follow `stock:{pid}:{wid|"all"}`.
///
/// A cache failure is never fatal to a write: callers must log and
/// continue rather than fail the mutation that triggered invalidation.
#[async_trait]
pub trait StockCache: Send + Sync {
    async fn get(&self, product_id: ProductId, warehouse_id: Option<uuid::Uuid>) -> Option<AvailabilitySnapshot>;

    async fn put(
        &self,
        product_id: ProductId,
        warehouse_id: Option<uuid::Uuid>,
        snapshot: AvailabilitySnapshot,
        ttl_seconds: u64,
    );

    /// Invalidates both the specific `(product, warehouse)` key and the
    /// `(product, "all")` aggregate key for `product_id`.
    async fn invalidate_product(&self, product_id: ProductId, warehouse_id: Option<uuid::Uuid>) -> Result<(), InventoryError>;
}
