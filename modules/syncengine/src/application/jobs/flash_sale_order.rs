use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use inventory::{InventoryError, ReservationEngine, ReserveStockCommand};

use crate::application::scheduler::{Job, JobOutcome};
use crate::error::SyncError;

const MAX_RETRIES: u32 = 5;
const BACKOFF: Duration = Duration::from_secs(1);

/// FlashSaleOrderJob (§4.7): a single incoming order against a single
/// product, retried up to 5 times at a flat 1s backoff on a retryable
/// failure (lock contention, lost optimistic-lock race) — not retried at
/// all on a business-rule rejection (insufficient stock, duplicate order).
pub struct FlashSaleOrderJob {
    engine: Arc<ReservationEngine>,
    command: ReserveStockCommand,
}

impl FlashSaleOrderJob {
    pub fn new(engine: Arc<ReservationEngine>, command: ReserveStockCommand) -> Self {
        Self { engine, command }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FlashSaleOrderResult {
    pub order_id: String,
    pub status: &'static str,
    pub reason: Option<String>,
    pub reserved_quantity: Option<i64>,
}

#[async_trait]
impl Job for FlashSaleOrderJob {
    fn kind(&self) -> &'static str {
        "flash_sale"
    }

    async fn run(&self) -> Result<JobOutcome, SyncError> {
        let mut attempt = 0;
        loop {
            match self.engine.reserve_flash_sale(self.command.clone()).await {
                Ok(_) => {
                    return Ok(JobOutcome::FlashSaleOrder(FlashSaleOrderResult {
                        order_id: self.command.order_id.clone(),
                        status: "success",
                        reason: None,
                        reserved_quantity: Some(self.command.quantity),
                    }));
                }
                Err(InventoryError::InsufficientStock { available, .. }) => {
                    return Ok(JobOutcome::FlashSaleOrder(FlashSaleOrderResult {
                        order_id: self.command.order_id.clone(),
                        status: "failed",
                        reason: Some(format!("insufficient_stock (available={available})")),
                        reserved_quantity: None,
                    }));
                }
                Err(InventoryError::DuplicateReservation(reference_id)) => {
                    return Ok(JobOutcome::FlashSaleOrder(FlashSaleOrderResult {
                        order_id: reference_id,
                        status: "failed",
                        reason: Some("duplicate_order".to_string()),
                        reserved_quantity: None,
                    }));
                }
                Err(err) if err.is_retryable() && attempt < MAX_RETRIES => {
                    attempt += 1;
                    tracing::warn!(order_id = %self.command.order_id, attempt, %err, "retrying flash sale reservation");
                    tokio::time::sleep(BACKOFF).await;
                }
                Err(err) => return Err(SyncError::from(err)),
            }
        }
    }
}
