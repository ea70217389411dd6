//! ReconcileUseCase — the periodic consistency sweep (C8).
//!
//! Scans stock rows (optionally scoped to one warehouse), recomputes
//! `expected = quantity - reserved`, and for every row where the
//! persisted `available` disagrees, repairs it through the reservation
//! engine so the correction is itself a logged `SYNC` transaction rather
//! than a silent write — the open question in the spec's design notes
//! about `available` being sometimes written directly is resolved here by
//! never doing that: the repair goes back through [`ReservationEngine::adjust`].

use std::sync::Arc;

use chrono::Utc;

use super::reservation_engine::ReservationEngine;
use crate::application::dtos::{AdjustStockCommand, ReconcileReport, StockRowDiscrepancy};
use crate::domain::repositories::StockRowRepository;
use crate::domain::value_objects::{TransactionKind, WarehouseId};
use crate::error::InventoryError;

pub struct ReconcileUseCase {
    stock_repo: Arc<dyn StockRowRepository>,
    engine: Arc<ReservationEngine>,
}

impl ReconcileUseCase {
    pub fn new(stock_repo: Arc<dyn StockRowRepository>, engine: Arc<ReservationEngine>) -> Self {
        Self { stock_repo, engine }
    }

    pub async fn execute(&self, warehouse_id: Option<WarehouseId>) -> Result<ReconcileReport, InventoryError> {
        let rows = self.stock_repo.scan_all(warehouse_id).await?;
        let mut report = ReconcileReport::default();
        report.total_checked = rows.len() as u64;

        for row in rows {
            let expected = row.quantity() - row.reserved();
            if expected == row.available() {
                continue;
            }

            report.discrepancies_found += 1;
            let stored_available = row.available();

            match self
                .engine
                .adjust(AdjustStockCommand {
                    product_id: row.product_id(),
                    warehouse_id: row.warehouse_id(),
                    delta: 0,
                    kind: TransactionKind::Sync,
                    reference_id: None,
                    actor: "reconciler".to_string(),
                })
                .await
            {
                Ok(_) => {
                    report.corrections_made += 1;
                    report.discrepancies.push(StockRowDiscrepancy {
                        product_id: row.product_id(),
                        warehouse_id: row.warehouse_id(),
                        stored_available,
                        expected_available: expected,
                        repaired_at: Utc::now(),
                    });
                    tracing::warn!(
                        product_id = %row.product_id(),
                        warehouse_id = %row.warehouse_id(),
                        stored_available,
                        expected_available = expected,
                        "reconciler repaired a drifted stock row"
                    );
                }
                Err(err) => {
                    report.errors.push(format!(
                        "{}/{}: {err}",
                        row.product_id(),
                        row.warehouse_id()
                    ));
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use lockservice::InMemoryLock;
    use metrics::Metrics;

    use super::*;
    use crate::domain::entities::{StockRow, StockTransaction};
    use crate::domain::repositories::{AvailabilitySnapshot, StockCache, StockMutationUnitOfWork, TransactionLogRepository};
    use crate::domain::value_objects::ProductId;

    struct MockStockRepo {
        rows: Mutex<HashMap<(ProductId, WarehouseId), StockRow>>,
    }

    #[async_trait]
    impl StockRowRepository for MockStockRepo {
        async fn get(&self, product_id: ProductId, warehouse_id: WarehouseId) -> Result<Option<StockRow>, InventoryError> {
            Ok(self.rows.lock().unwrap().get(&(product_id, warehouse_id)).cloned())
        }

        async fn get_by_product(&self, product_id: ProductId) -> Result<Vec<StockRow>, InventoryError> {
            Ok(self.rows.lock().unwrap().values().filter(|r| r.product_id() == product_id).cloned().collect())
        }

        async fn upsert_init(&self, product_id: ProductId, warehouse_id: WarehouseId) -> Result<StockRow, InventoryError> {
            let mut rows = self.rows.lock().unwrap();
            Ok(rows.entry((product_id, warehouse_id)).or_insert_with(|| StockRow::new_empty(product_id, warehouse_id)).clone())
        }

        async fn apply(&self, row: &StockRow, expected_version: i32) -> Result<StockRow, InventoryError> {
            let mut rows = self.rows.lock().unwrap();
            let key = (row.product_id(), row.warehouse_id());
            let existing = rows.get(&key).ok_or(InventoryError::StockRowNotFound {
                product_id: key.0.into_uuid(),
                warehouse_id: key.1.into_uuid(),
            })?;
            if existing.version() != expected_version {
                return Err(InventoryError::VersionConflict(row.id().into_uuid()));
            }
            rows.insert(key, row.clone());
            Ok(row.clone())
        }

        async fn scan_low_stock(&self, _threshold: i64, _warehouse_id: Option<WarehouseId>) -> Result<Vec<StockRow>, InventoryError> {
            unimplemented!()
        }

        async fn scan_all(&self, warehouse_id: Option<WarehouseId>) -> Result<Vec<StockRow>, InventoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|r| warehouse_id.is_none_or(|w| r.warehouse_id() == w))
                .cloned()
                .collect())
        }
    }

    struct NoopTxLog;

    #[async_trait]
    impl TransactionLogRepository for NoopTxLog {
        async fn record(&self, _txn: &StockTransaction) -> Result<(), InventoryError> {
            Ok(())
        }
        async fn history_for_stock_row(&self, _stock_ref: crate::domain::value_objects::StockRowId, _limit: i64) -> Result<Vec<StockTransaction>, InventoryError> {
            Ok(Vec::new())
        }
        async fn find_by_reference(&self, _reference_id: &str) -> Result<Vec<StockTransaction>, InventoryError> {
            Ok(Vec::new())
        }
        async fn purge_older_than(&self, _older_than: chrono::DateTime<chrono::Utc>) -> Result<u64, InventoryError> {
            Ok(0)
        }
    }

    struct MockUnitOfWork {
        stock: Arc<MockStockRepo>,
    }

    #[async_trait]
    impl StockMutationUnitOfWork for MockUnitOfWork {
        async fn commit_mutation(&self, row: &StockRow, expected_version: i32, _txn: &StockTransaction) -> Result<StockRow, InventoryError> {
            self.stock.apply(row, expected_version).await
        }
    }

    struct NoopCache;

    #[async_trait]
    impl StockCache for NoopCache {
        async fn get(&self, _product_id: ProductId, _warehouse_id: Option<uuid::Uuid>) -> Option<AvailabilitySnapshot> {
            None
        }
        async fn put(&self, _product_id: ProductId, _warehouse_id: Option<uuid::Uuid>, _snapshot: AvailabilitySnapshot, _ttl_seconds: u64) {}
        async fn invalidate_product(&self, _product_id: ProductId, _warehouse_id: Option<uuid::Uuid>) -> Result<(), InventoryError> {
            Ok(())
        }
    }

    fn drifted_row(product_id: ProductId, warehouse_id: WarehouseId) -> StockRow {
        // quantity=5, reserved=2, but `available` persisted as 5 (S4's injected drift).
        StockRow::from_parts(
            crate::domain::value_objects::StockRowId::new(),
            product_id,
            warehouse_id,
            5,
            2,
            5,
            1,
            None,
            Utc::now(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn s4_reconciler_repairs_drifted_row_and_is_idempotent() {
        let pid = ProductId::new();
        let wid = WarehouseId::new();
        let stock_repo = Arc::new(MockStockRepo {
            rows: Mutex::new(HashMap::from([((pid, wid), drifted_row(pid, wid))])),
        });
        let engine = Arc::new(ReservationEngine::new(
            Arc::new(InMemoryLock::new()),
            stock_repo.clone(),
            Arc::new(NoopTxLog),
            Arc::new(MockUnitOfWork { stock: stock_repo.clone() }),
            Arc::new(NoopCache),
            Arc::new(Metrics::new()),
            60,
        ));
        let reconciler = ReconcileUseCase::new(stock_repo.clone(), engine);

        let report = reconciler.execute(None).await.unwrap();
        assert_eq!(report.total_checked, 1);
        assert_eq!(report.discrepancies_found, 1);
        assert_eq!(report.corrections_made, 1);

        let row = stock_repo.get(pid, wid).await.unwrap().unwrap();
        assert_eq!(row.available(), 3);

        let second = reconciler.execute(None).await.unwrap();
        assert_eq!(second.discrepancies_found, 0);
        assert_eq!(second.corrections_made, 0);
    }
}
