use async_trait::async_trait;

use crate::domain::entities::StockRow;
use crate::domain::value_objects::{ProductId, WarehouseId};
use crate::error::InventoryError;

/// Persistence port for the Stock Store (C1).
///
/// `apply` is the only mutating entry point; it must perform the
/// `WHERE id = $1 AND version = $expected` compare-and-swap update and
/// return `VersionConflict` without side effects when zero rows matched.
#[async_trait]
pub trait StockRowRepository: Send + Sync {
    async fn get(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<Option<StockRow>, InventoryError>;

    async fn get_by_product(&self, product_id: ProductId) -> Result<Vec<StockRow>, InventoryError>;

    /// Idempotent create-if-absent with all fields zeroed.
    async fn upsert_init(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<StockRow, InventoryError>;

    /// Compare-and-swap persist of a mutated row. `expected_version` must
    /// match the version the caller read before mutating in memory.
    async fn apply(&self, row: &StockRow, expected_version: i32) -> Result<StockRow, InventoryError>;

    /// Rows with `available` below `threshold`, for active products and
    /// warehouses, optionally narrowed to one warehouse.
    async fn scan_low_stock(
        &self,
        threshold: i64,
        warehouse_id: Option<WarehouseId>,
    ) -> Result<Vec<StockRow>, InventoryError>;

    /// All rows, optionally narrowed to one warehouse, for the reconciler
    /// and the view-refresh sweep.
    async fn scan_all(&self, warehouse_id: Option<WarehouseId>) -> Result<Vec<StockRow>, InventoryError>;
}
