use std::sync::Arc;

use async_trait::async_trait;
use inventory::{AlertLevel, ProductId, ProductRepository, StockRowRepository, WarehouseId, WarehouseRepository};

use crate::application::scheduler::{Job, JobOutcome};
use crate::error::SyncError;

/// StockAlertJob (§4.7): evaluates one stock row against alert thresholds
/// and dispatches a notification. A real notification transport (email,
/// SMS, webhook) is out of scope here, matching the base system's stubbed
/// alert dispatch — this logs at WARN/ERROR by severity instead.
pub struct StockAlertJob {
    product_id: ProductId,
    warehouse_id: WarehouseId,
    stock_repo: Arc<dyn StockRowRepository>,
    product_repo: Arc<dyn ProductRepository>,
    warehouse_repo: Arc<dyn WarehouseRepository>,
}

impl StockAlertJob {
    pub fn new(
        product_id: ProductId,
        warehouse_id: WarehouseId,
        stock_repo: Arc<dyn StockRowRepository>,
        product_repo: Arc<dyn ProductRepository>,
        warehouse_repo: Arc<dyn WarehouseRepository>,
    ) -> Self {
        Self {
            product_id,
            warehouse_id,
            stock_repo,
            product_repo,
            warehouse_repo,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct StockAlertResult {
    pub alert_level: AlertLevel,
    pub product_sku: String,
    pub warehouse_code: String,
    pub available: i64,
    pub reserved: i64,
}

#[async_trait]
impl Job for StockAlertJob {
    fn kind(&self) -> &'static str {
        "stock_alert"
    }

    async fn run(&self) -> Result<JobOutcome, SyncError> {
        let row = self
            .stock_repo
            .get(self.product_id, self.warehouse_id)
            .await?
            .ok_or(inventory::InventoryError::StockRowNotFound {
                product_id: self.product_id.into_uuid(),
                warehouse_id: self.warehouse_id.into_uuid(),
            })?;
        let product = self
            .product_repo
            .find_by_id(self.product_id)
            .await?
            .ok_or(inventory::InventoryError::ProductNotFound(self.product_id.into_uuid()))?;
        let warehouse = self
            .warehouse_repo
            .find_by_id(self.warehouse_id)
            .await?
            .ok_or(inventory::InventoryError::WarehouseNotFound(self.warehouse_id.into_uuid()))?;

        let alert_level = AlertLevel::from_available(row.available());
        let sku = product.sku().as_str().to_string();
        let code = warehouse.code().to_string();

        match alert_level {
            AlertLevel::OutOfStock | AlertLevel::Critical => {
                tracing::error!(sku = %sku, warehouse = %code, available = row.available(), level = %alert_level, "stock alert");
            }
            AlertLevel::Low | AlertLevel::Warning => {
                tracing::warn!(sku = %sku, warehouse = %code, available = row.available(), level = %alert_level, "stock alert");
            }
        }

        Ok(JobOutcome::StockAlert(StockAlertResult {
            alert_level,
            product_sku: sku,
            warehouse_code: code,
            available: row.available(),
            reserved: row.reserved(),
        }))
    }
}
