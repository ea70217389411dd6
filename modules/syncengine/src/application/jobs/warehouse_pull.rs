use std::sync::Arc;

use async_trait::async_trait;
use inventory::{
    AdjustStockCommand, ProductRepository, ReservationEngine, StockRowRepository, TransactionKind,
    WarehouseId, WarehouseRepository,
};

use crate::application::scheduler::{Job, JobOutcome, RetryPolicy};
use crate::domain::WarehouseAdapter;
use crate::error::SyncError;

/// Defaults per §4.7/§6: 3 attempts, 60s base back-off.
const RETRY_POLICY: RetryPolicy = RetryPolicy::new(3, std::time::Duration::from_secs(60));

/// WarehousePullJob (§4.7): pulls authoritative quantities for every stock
/// row in one warehouse and reconciles drift through the reservation
/// engine's `adjust` path (`kind=Sync`), under that warehouse's lock.
pub struct WarehousePullJob {
    warehouse_id: WarehouseId,
    adapter: Arc<dyn WarehouseAdapter>,
    stock_repo: Arc<dyn StockRowRepository>,
    product_repo: Arc<dyn ProductRepository>,
    warehouse_repo: Arc<dyn WarehouseRepository>,
    engine: Arc<ReservationEngine>,
}

impl WarehousePullJob {
    pub fn new(
        warehouse_id: WarehouseId,
        adapter: Arc<dyn WarehouseAdapter>,
        stock_repo: Arc<dyn StockRowRepository>,
        product_repo: Arc<dyn ProductRepository>,
        warehouse_repo: Arc<dyn WarehouseRepository>,
        engine: Arc<ReservationEngine>,
    ) -> Self {
        Self {
            warehouse_id,
            adapter,
            stock_repo,
            product_repo,
            warehouse_repo,
            engine,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct WarehousePullResult {
    pub warehouse_id: uuid::Uuid,
    pub warehouse_name: String,
    pub synced_count: u64,
    pub errors: Vec<String>,
    pub duration_seconds: f64,
}

#[async_trait]
impl Job for WarehousePullJob {
    fn kind(&self) -> &'static str {
        "warehouse"
    }

    fn retry_policy(&self) -> RetryPolicy {
        RETRY_POLICY
    }

    async fn run(&self) -> Result<JobOutcome, SyncError> {
        let started = std::time::Instant::now();

        let warehouse = self
            .warehouse_repo
            .find_by_id(self.warehouse_id)
            .await?
            .ok_or(inventory::InventoryError::WarehouseNotFound(self.warehouse_id.into_uuid()))?;

        let rows = self.stock_repo.scan_all(Some(self.warehouse_id)).await?;

        let mut synced_count = 0u64;
        let mut errors = Vec::new();

        for row in rows {
            let Some(product) = self.product_repo.find_by_id(row.product_id()).await? else {
                continue;
            };

            let authoritative = match self.adapter.get_stock(product.sku().as_str()).await {
                Ok(qty) => qty,
                Err(err) => {
                    errors.push(format!("{}: {err}", product.sku().as_str()));
                    continue;
                }
            };

            let delta = authoritative - row.quantity();
            if delta == 0 {
                synced_count += 1;
                continue;
            }

            match self
                .engine
                .adjust(AdjustStockCommand {
                    product_id: row.product_id(),
                    warehouse_id: self.warehouse_id,
                    delta,
                    kind: TransactionKind::Sync,
                    reference_id: None,
                    actor: format!("warehouse_sync:{}", self.adapter.name()),
                })
                .await
            {
                Ok(_) => synced_count += 1,
                Err(err) => errors.push(format!("{}: {err}", product.sku().as_str())),
            }
        }

        Ok(JobOutcome::WarehousePull(WarehousePullResult {
            warehouse_id: self.warehouse_id.into_uuid(),
            warehouse_name: warehouse.code().to_string(),
            synced_count,
            errors,
            duration_seconds: started.elapsed().as_secs_f64(),
        }))
    }
}
