use async_trait::async_trait;

use crate::domain::entities::{AggregatedStockView, LowStockAlertView};
use crate::domain::value_objects::{ProductId, WarehouseId};
use crate::error::InventoryError;

/// Persistence port for the materialized projections of C6. `replace_all`
/// is called by the refresh sweep under a read-only snapshot of C1;
/// queries here never touch C1 directly.
#[async_trait]
pub trait ViewsRepository: Send + Sync {
    async fn replace_aggregated_stock(&self, rows: Vec<AggregatedStockView>) -> Result<(), InventoryError>;

    async fn replace_low_stock_alerts(&self, rows: Vec<LowStockAlertView>) -> Result<(), InventoryError>;

    async fn get_aggregated_stock(&self, product_id: ProductId) -> Result<Option<AggregatedStockView>, InventoryError>;

    async fn list_low_stock_alerts(
        &self,
        warehouse_id: Option<WarehouseId>,
    ) -> Result<Vec<LowStockAlertView>, InventoryError>;
}
