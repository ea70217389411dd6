use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::StockTransaction;
use crate::domain::value_objects::StockRowId;
use crate::error::InventoryError;

/// Persistence port for the Transaction Log (C2). `record` is used
/// standalone for read-side and retention operations (history lookups,
/// duplicate-reference checks, the retention sweep); the append that
/// documents a stock-row mutation goes through
/// [`StockMutationUnitOfWork::commit_mutation`](super::StockMutationUnitOfWork::commit_mutation)
/// instead, so that append and the row CAS share one durable transaction.
#[async_trait]
pub trait TransactionLogRepository: Send + Sync {
    async fn record(&self, txn: &StockTransaction) -> Result<(), InventoryError>;

    async fn history_for_stock_row(
        &self,
        stock_ref: StockRowId,
        limit: i64,
    ) -> Result<Vec<StockTransaction>, InventoryError>;

    async fn find_by_reference(
        &self,
        reference_id: &str,
    ) -> Result<Vec<StockTransaction>, InventoryError>;

    /// Retention sweep: deletes entries older than `older_than` and returns
    /// how many were removed.
    async fn purge_older_than(&self, older_than: DateTime<Utc>) -> Result<u64, InventoryError>;
}
