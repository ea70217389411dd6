use async_trait::async_trait;

use crate::domain::entities::{StockRow, StockTransaction};
use crate::error::InventoryError;

/// The atomic boundary around a stock-row mutation (§4.1/§4.2): "all four
/// fields and the transaction append commit together or not at all". A
/// [`StockRowRepository::apply`](super::StockRowRepository::apply) call and
/// a [`TransactionLogRepository::record`](super::TransactionLogRepository::record)
/// call made independently are two separate round trips on two separate
/// connections — this port exists so the reservation engine never does
/// that. One implementation, one durable transaction, one commit.
#[async_trait]
pub trait StockMutationUnitOfWork: Send + Sync {
    /// Persists the compare-and-swapped `row` (rejecting on
    /// `expected_version` mismatch exactly as
    /// [`StockRowRepository::apply`](super::StockRowRepository::apply) does)
    /// and appends `txn` in the same unit of work. Either both land or
    /// neither does.
    async fn commit_mutation(
        &self,
        row: &StockRow,
        expected_version: i32,
        txn: &StockTransaction,
    ) -> Result<StockRow, InventoryError>;
}
