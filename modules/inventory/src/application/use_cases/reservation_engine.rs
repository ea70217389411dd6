//! ReservationEngine — the inventory kernel (C4).
//!
//! Every mutating entry point is the same composition: acquire a
//! distributed lock keyed to the resource, read+validate+mutate the stock
//! row, append a transaction log entry, commit, release the lock,
//! invalidate the cache, record a metric. This struct is the explicit
//! `critical_section`-based replacement for decorator-stacked locking:
//! [`lockservice::critical_section`] wraps every operation body below.

use std::sync::Arc;

use lockservice::{DistributedLock, LockError, LockPolicy};
use metrics::Metrics;

use crate::application::dtos::{
    AdjustStockCommand, AvailabilityResponse, ReleaseStockCommand, ReserveStockCommand,
    StockRowResponse,
};
use crate::domain::entities::{StockRow, StockTransaction};
use crate::domain::repositories::{
    AvailabilitySnapshot, StockCache, StockMutationUnitOfWork, StockRowRepository, TransactionLogRepository,
    WarehouseAvailability,
};
use crate::domain::value_objects::{ProductId, TransactionKind, WarehouseId};
use crate::error::InventoryError;

/// Internal retry budget for a lost optimistic-lock race (§4.4, §7):
/// `VersionConflict` is retried inside the same lock lease before it is
/// surfaced to the caller.
const VERSION_CONFLICT_RETRIES: u32 = 3;

pub struct ReservationEngine {
    lock: Arc<dyn DistributedLock>,
    stock_repo: Arc<dyn StockRowRepository>,
    transaction_log: Arc<dyn TransactionLogRepository>,
    unit_of_work: Arc<dyn StockMutationUnitOfWork>,
    cache: Arc<dyn StockCache>,
    metrics: Arc<Metrics>,
    cache_ttl_seconds: u64,
}

impl ReservationEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        lock: Arc<dyn DistributedLock>,
        stock_repo: Arc<dyn StockRowRepository>,
        transaction_log: Arc<dyn TransactionLogRepository>,
        unit_of_work: Arc<dyn StockMutationUnitOfWork>,
        cache: Arc<dyn StockCache>,
        metrics: Arc<Metrics>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            lock,
            stock_repo,
            transaction_log,
            unit_of_work,
            cache,
            metrics,
            cache_ttl_seconds,
        }
    }

    /// reserve(product, warehouse, qty, order_id) — §4.4. Locks on the
    /// ordinary product+warehouse namespace with the standard lock policy.
    pub async fn reserve(&self, cmd: ReserveStockCommand) -> Result<StockRowResponse, InventoryError> {
        let resource = lockservice::keys::product_warehouse(
            cmd.product_id.into_uuid(),
            cmd.warehouse_id.into_uuid(),
        );
        self.reserve_with(cmd, resource, LockPolicy::standard()).await
    }

    /// Same operation, but locked on the `inventory:flashsale:{pid}`
    /// namespace with its short-ttl, aggressive-retry policy (§4.3). Used
    /// by [`FlashSaleOrderJob`](../../../../syncengine/index.html) for
    /// single-product, high-contention bursts.
    pub async fn reserve_flash_sale(&self, cmd: ReserveStockCommand) -> Result<StockRowResponse, InventoryError> {
        let resource = lockservice::keys::flash_sale(cmd.product_id.into_uuid());
        self.reserve_with(cmd, resource, LockPolicy::flash_sale()).await
    }

    async fn reserve_with(
        &self,
        cmd: ReserveStockCommand,
        resource: String,
        policy: LockPolicy,
    ) -> Result<StockRowResponse, InventoryError> {
        if cmd.quantity <= 0 {
            return Err(InventoryError::Validation("reserve quantity must be positive".into()));
        }

        let row = self
            .run_locked(&resource, &policy, || {
                self.mutate_with_retry(
                    cmd.product_id,
                    cmd.warehouse_id,
                    VERSION_CONFLICT_RETRIES,
                    |row| row.reserve(cmd.quantity),
                    TransactionKind::Reserve,
                    cmd.quantity,
                    Some(cmd.order_id.clone()),
                    "reserve_stock",
                )
            })
            .await?;

        self.invalidate(cmd.product_id, Some(cmd.warehouse_id.into_uuid())).await;
        self.metrics.record_stock_mutation("reserve");
        Ok(StockRowResponse::from(&row))
    }

    /// release(product, warehouse, qty, order_id) — §4.4.
    pub async fn release(&self, cmd: ReleaseStockCommand) -> Result<StockRowResponse, InventoryError> {
        if cmd.quantity <= 0 {
            return Err(InventoryError::Validation("release quantity must be positive".into()));
        }

        let resource = lockservice::keys::product_warehouse(
            cmd.product_id.into_uuid(),
            cmd.warehouse_id.into_uuid(),
        );
        let policy = LockPolicy::standard();

        let row = self
            .run_locked(&resource, &policy, || {
                self.mutate_with_retry(
                    cmd.product_id,
                    cmd.warehouse_id,
                    VERSION_CONFLICT_RETRIES,
                    |row| row.release(cmd.quantity),
                    TransactionKind::Release,
                    cmd.quantity,
                    Some(cmd.order_id.clone()),
                    "release_stock",
                )
            })
            .await?;

        self.invalidate(cmd.product_id, Some(cmd.warehouse_id.into_uuid())).await;
        self.metrics.record_stock_mutation("release");
        Ok(StockRowResponse::from(&row))
    }

    /// adjust(product, warehouse, delta, kind, ref) — §4.4. Upsert-
    /// initializes the row if it does not yet exist before applying.
    pub async fn adjust(&self, cmd: AdjustStockCommand) -> Result<StockRowResponse, InventoryError> {
        let resource = lockservice::keys::product_warehouse(
            cmd.product_id.into_uuid(),
            cmd.warehouse_id.into_uuid(),
        );
        let policy = LockPolicy::standard();
        let kind = cmd.kind;
        let metric_label = match kind {
            TransactionKind::Sync => "sync",
            _ => "adjust",
        };

        let row = self
            .run_locked(&resource, &policy, || async {
                self.stock_repo.upsert_init(cmd.product_id, cmd.warehouse_id).await?;
                self.mutate_with_retry(
                    cmd.product_id,
                    cmd.warehouse_id,
                    VERSION_CONFLICT_RETRIES,
                    |row| row.adjust_quantity(cmd.delta),
                    kind,
                    cmd.delta,
                    cmd.reference_id.clone(),
                    &cmd.actor,
                )
                .await
            })
            .await?;

        self.invalidate(cmd.product_id, Some(cmd.warehouse_id.into_uuid())).await;
        self.metrics.record_stock_mutation(metric_label);
        Ok(StockRowResponse::from(&row))
    }

    /// get_available(product, warehouse?) — §4.4. Read-through the C5
    /// cache; on miss, reads C1 and (for the all-warehouses case)
    /// aggregates across every warehouse row for the product.
    pub async fn get_available(
        &self,
        product_id: ProductId,
        warehouse_id: Option<WarehouseId>,
    ) -> Result<AvailabilityResponse, InventoryError> {
        let cache_key_wid = warehouse_id.map(|w| w.into_uuid());
        if let Some(snapshot) = self.cache.get(product_id, cache_key_wid).await {
            return Ok(snapshot);
        }

        let snapshot = match warehouse_id {
            Some(wid) => {
                let row = self
                    .stock_repo
                    .get(product_id, wid)
                    .await?
                    .ok_or(InventoryError::StockRowNotFound {
                        product_id: product_id.into_uuid(),
                        warehouse_id: wid.into_uuid(),
                    })?;
                AvailabilitySnapshot {
                    total: row.quantity(),
                    reserved: row.reserved(),
                    available: row.available(),
                    per_warehouse: None,
                }
            }
            None => {
                let rows = self.stock_repo.get_by_product(product_id).await?;
                let per_warehouse: Vec<WarehouseAvailability> = rows
                    .iter()
                    .map(|r| WarehouseAvailability {
                        warehouse_id: r.warehouse_id().into_uuid(),
                        quantity: r.quantity(),
                        reserved: r.reserved(),
                        available: r.available(),
                    })
                    .collect();
                AvailabilitySnapshot {
                    total: per_warehouse.iter().map(|w| w.quantity).sum(),
                    reserved: per_warehouse.iter().map(|w| w.reserved).sum(),
                    available: per_warehouse.iter().map(|w| w.available).sum(),
                    per_warehouse: Some(per_warehouse),
                }
            }
        };

        self.cache
            .put(product_id, cache_key_wid, snapshot.clone(), self.cache_ttl_seconds)
            .await;
        Ok(snapshot)
    }

    /// Shared body for reserve/release/adjust: read, mutate in memory via
    /// `op`, then commit the compare-and-swapped row together with its
    /// matching transaction log entry through [`StockMutationUnitOfWork`] —
    /// one durable transaction, not two independent writes — so a failure
    /// appending the log can never leave a mutated row with no matching
    /// entry. Retries `VersionConflict` up to `retries` times before
    /// surfacing it — the lock already guarantees no other process is
    /// racing us, so a conflict here means a stale in-process read, not
    /// contention.
    ///
    /// For `RESERVE`/`RELEASE`, `reference_id` (the order id) must be
    /// unique per stock row: a repeat is rejected as `DuplicateReservation`
    /// rather than applied twice, mirroring the partial unique index on
    /// `(stock_ref, kind, reference_id)` those two kinds carry in storage.
    #[allow(clippy::too_many_arguments)]
    async fn mutate_with_retry(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        mut retries: u32,
        op: impl Fn(&mut StockRow) -> Result<(), InventoryError>,
        kind: TransactionKind,
        delta: i64,
        reference_id: Option<String>,
        actor: &str,
    ) -> Result<StockRow, InventoryError> {
        loop {
            let row = self
                .stock_repo
                .get(product_id, warehouse_id)
                .await?
                .ok_or(InventoryError::StockRowNotFound {
                    product_id: product_id.into_uuid(),
                    warehouse_id: warehouse_id.into_uuid(),
                })?;

            if matches!(kind, TransactionKind::Reserve | TransactionKind::Release) {
                if let Some(reference_id) = &reference_id {
                    self.reject_duplicate(row.id(), kind, reference_id).await?;
                }
            }

            let mut row = row;
            let expected_version = row.version();
            op(&mut row)?;

            let txn = StockTransaction::new(row.id(), kind, delta, reference_id.clone(), actor);

            match self.unit_of_work.commit_mutation(&row, expected_version, &txn).await {
                Ok(persisted) => return Ok(persisted),
                Err(InventoryError::VersionConflict(_)) if retries > 0 => {
                    retries -= 1;
                    continue;
                }
                Err(other) => return Err(other),
            }
        }
    }

    async fn reject_duplicate(
        &self,
        stock_ref: crate::domain::value_objects::StockRowId,
        kind: TransactionKind,
        reference_id: &str,
    ) -> Result<(), InventoryError> {
        let prior = self.transaction_log.find_by_reference(reference_id).await?;
        if prior.iter().any(|t| t.stock_ref() == stock_ref && t.kind() == kind) {
            return Err(InventoryError::DuplicateReservation(reference_id.to_string()));
        }
        Ok(())
    }

    async fn invalidate(&self, product_id: ProductId, warehouse_id: Option<uuid::Uuid>) {
        if let Err(err) = self.cache.invalidate_product(product_id, warehouse_id).await {
            tracing::warn!(%product_id, error = %err, "cache invalidation failed; entry will expire by TTL");
        }
    }

    /// Acquires `resource`, runs `body`, releases on every exit path —
    /// the explicit combinator called out in the component design in
    /// place of the source's decorator-stacked locking — while recording
    /// the C9 lock-attempt outcome with the precision
    /// [`lockservice::critical_section`] alone can't give us, since that
    /// helper erases the [`LockError`] into the caller's error type before
    /// we get a chance to label it.
    async fn run_locked<T, F, Fut>(&self, resource: &str, policy: &LockPolicy, body: F) -> Result<T, InventoryError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, InventoryError>>,
    {
        let namespace = lockservice::keys::namespace_of(resource);

        let lease = match self.lock.acquire(resource, policy).await {
            Ok(lease) => {
                self.metrics.record_lock_attempt(&namespace, "acquired");
                lease
            }
            Err(err) => {
                self.metrics.record_lock_attempt(&namespace, err.outcome());
                return Err(InventoryError::LockUnavailable(err.to_string()));
            }
        };

        let result = body().await;

        if let Err(release_err) = self.lock.release(lease).await {
            tracing::warn!(resource, error = %release_err, "failed to release distributed lock; it will self-expire via TTL");
        }

        result
    }
}

impl From<LockError> for InventoryError {
    fn from(err: LockError) -> Self {
        InventoryError::LockUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use lockservice::InMemoryLock;
    use tokio::task::JoinSet;

    use super::*;
    use crate::domain::repositories::AvailabilitySnapshot;

    struct MockStockRepo {
        rows: Mutex<HashMap<(ProductId, WarehouseId), StockRow>>,
    }

    impl MockStockRepo {
        fn seeded(product_id: ProductId, warehouse_id: WarehouseId, quantity: i64) -> Arc<Self> {
            let mut row = StockRow::new_empty(product_id, warehouse_id);
            row.adjust_quantity(quantity).unwrap();
            let mut rows = HashMap::new();
            rows.insert((product_id, warehouse_id), row);
            Arc::new(Self { rows: Mutex::new(rows) })
        }
    }

    #[async_trait]
    impl StockRowRepository for MockStockRepo {
        async fn get(&self, product_id: ProductId, warehouse_id: WarehouseId) -> Result<Option<StockRow>, InventoryError> {
            Ok(self.rows.lock().unwrap().get(&(product_id, warehouse_id)).cloned())
        }

        async fn get_by_product(&self, product_id: ProductId) -> Result<Vec<StockRow>, InventoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.product_id() == product_id)
                .cloned()
                .collect())
        }

        async fn upsert_init(&self, product_id: ProductId, warehouse_id: WarehouseId) -> Result<StockRow, InventoryError> {
            let mut rows = self.rows.lock().unwrap();
            Ok(rows
                .entry((product_id, warehouse_id))
                .or_insert_with(|| StockRow::new_empty(product_id, warehouse_id))
                .clone())
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
            unimplemented!("not exercised by reservation engine tests")
        }

        async fn scan_all(&self, _warehouse_id: Option<WarehouseId>) -> Result<Vec<StockRow>, InventoryError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }
    }

    struct MockTxLog {
        entries: Mutex<Vec<StockTransaction>>,
    }

    impl MockTxLog {
        fn new() -> Arc<Self> {
            Arc::new(Self { entries: Mutex::new(Vec::new()) })
        }
    }

    #[async_trait]
    impl TransactionLogRepository for MockTxLog {
        async fn record(&self, txn: &StockTransaction) -> Result<(), InventoryError> {
            self.entries.lock().unwrap().push(txn.clone());
            Ok(())
        }

        async fn history_for_stock_row(
            &self,
            stock_ref: crate::domain::value_objects::StockRowId,
            _limit: i64,
        ) -> Result<Vec<StockTransaction>, InventoryError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.stock_ref() == stock_ref)
                .cloned()
                .collect())
        }

        async fn find_by_reference(&self, reference_id: &str) -> Result<Vec<StockTransaction>, InventoryError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.reference_id() == Some(reference_id))
                .cloned()
                .collect())
        }

        async fn purge_older_than(&self, _older_than: chrono::DateTime<chrono::Utc>) -> Result<u64, InventoryError> {
            Ok(0)
        }
    }

    /// Test double for [`StockMutationUnitOfWork`]: applies the row CAS and
    /// appends the log entry against the same two in-memory mocks the rest
    /// of these tests already use, under one `commit_mutation` call — the
    /// call shape the production `PgStockMutationUnitOfWork` promises,
    /// without a real database transaction behind it.
    struct MockUnitOfWork {
        stock: Arc<MockStockRepo>,
        tx_log: Arc<MockTxLog>,
    }

    #[async_trait]
    impl StockMutationUnitOfWork for MockUnitOfWork {
        async fn commit_mutation(&self, row: &StockRow, expected_version: i32, txn: &StockTransaction) -> Result<StockRow, InventoryError> {
            let persisted = self.stock.apply(row, expected_version).await?;
            self.tx_log.record(txn).await?;
            Ok(persisted)
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

    fn engine(stock_repo: Arc<MockStockRepo>, tx_log: Arc<MockTxLog>) -> ReservationEngine {
        let unit_of_work = Arc::new(MockUnitOfWork { stock: stock_repo.clone(), tx_log: tx_log.clone() });
        ReservationEngine::new(
            Arc::new(InMemoryLock::new()),
            stock_repo,
            tx_log,
            unit_of_work,
            Arc::new(NoopCache),
            Arc::new(Metrics::new()),
            60,
        )
    }

    #[tokio::test]
    async fn s1_reserve_moves_available_into_reserved_and_logs() {
        let pid = ProductId::new();
        let wid = WarehouseId::new();
        let stock_repo = MockStockRepo::seeded(pid, wid, 10);
        let tx_log = MockTxLog::new();
        let eng = engine(stock_repo.clone(), tx_log.clone());

        let resp = eng
            .reserve(ReserveStockCommand {
                product_id: pid,
                warehouse_id: wid,
                quantity: 3,
                order_id: "ord-A".into(),
            })
            .await
            .unwrap();

        assert_eq!(resp.quantity, 10);
        assert_eq!(resp.reserved, 3);
        assert_eq!(resp.available, 7);
        assert_eq!(resp.version, 2);

        let logged = tx_log.entries.lock().unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].kind(), TransactionKind::Reserve);
        assert_eq!(logged[0].delta(), 3);
        assert_eq!(logged[0].reference_id(), Some("ord-A"));
    }

    #[tokio::test]
    async fn s2_concurrent_reserves_never_oversell() {
        // S2 runs "after S1": quantity=10 with 3 already reserved, so
        // available starts at 7 — exactly 7 of the 100 concurrent
        // reserve(1)s below should win.
        let pid = ProductId::new();
        let wid = WarehouseId::new();
        let stock_repo = MockStockRepo::seeded(pid, wid, 10);
        let tx_log = MockTxLog::new();
        let eng = Arc::new(engine(stock_repo.clone(), tx_log.clone()));

        eng.reserve(ReserveStockCommand {
            product_id: pid,
            warehouse_id: wid,
            quantity: 3,
            order_id: "ord-A".into(),
        })
        .await
        .unwrap();

        let mut joinset = JoinSet::new();
        for i in 0..100 {
            let eng = eng.clone();
            joinset.spawn(async move {
                eng.reserve(ReserveStockCommand {
                    product_id: pid,
                    warehouse_id: wid,
                    quantity: 1,
                    order_id: format!("ord-{i}"),
                })
                .await
            });
        }

        let mut ok_count = 0;
        let mut insufficient_count = 0;
        while let Some(res) = joinset.join_next().await {
            match res.unwrap() {
                Ok(_) => ok_count += 1,
                Err(InventoryError::InsufficientStock { .. }) => insufficient_count += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(ok_count, 7);
        assert_eq!(insufficient_count, 93);
        let row = stock_repo.get(pid, wid).await.unwrap().unwrap();
        assert_eq!(row.reserved(), 10);
        assert_eq!(row.available(), 0);
    }

    #[tokio::test]
    async fn s3_reserve_then_release_round_trips() {
        let pid = ProductId::new();
        let wid = WarehouseId::new();
        let stock_repo = MockStockRepo::seeded(pid, wid, 10);
        let tx_log = MockTxLog::new();
        let eng = engine(stock_repo.clone(), tx_log.clone());

        eng.reserve(ReserveStockCommand {
            product_id: pid,
            warehouse_id: wid,
            quantity: 3,
            order_id: "ord-A".into(),
        })
        .await
        .unwrap();

        let resp = eng
            .release(ReleaseStockCommand {
                product_id: pid,
                warehouse_id: wid,
                quantity: 3,
                order_id: "ord-A".into(),
            })
            .await
            .unwrap();

        assert_eq!(resp.quantity, 10);
        assert_eq!(resp.reserved, 0);
        assert_eq!(resp.available, 10);

        let logged = tx_log.entries.lock().unwrap();
        assert_eq!(logged.len(), 2);
        assert!(logged.iter().any(|t| t.kind() == TransactionKind::Reserve));
        assert!(logged.iter().any(|t| t.kind() == TransactionKind::Release));
    }

    #[tokio::test]
    async fn s5_flash_sale_burst_exactly_one_winner() {
        let pid = ProductId::new();
        let wid = WarehouseId::new();
        let stock_repo = MockStockRepo::seeded(pid, wid, 1);
        let tx_log = MockTxLog::new();
        let eng = Arc::new(engine(stock_repo.clone(), tx_log.clone()));

        let mut joinset = JoinSet::new();
        for i in 0..500 {
            let eng = eng.clone();
            joinset.spawn(async move {
                eng.reserve_flash_sale(ReserveStockCommand {
                    product_id: pid,
                    warehouse_id: wid,
                    quantity: 1,
                    order_id: format!("flash-{i}"),
                })
                .await
            });
        }

        let mut ok_count = 0;
        while let Some(res) = joinset.join_next().await {
            if res.unwrap().is_ok() {
                ok_count += 1;
            }
        }

        assert_eq!(ok_count, 1);
        let row = stock_repo.get(pid, wid).await.unwrap().unwrap();
        assert_eq!(row.available(), 0);
        assert!(row.available() >= 0);
    }

    #[tokio::test]
    async fn repeating_an_order_id_is_rejected_as_duplicate_not_reapplied() {
        let pid = ProductId::new();
        let wid = WarehouseId::new();
        let stock_repo = MockStockRepo::seeded(pid, wid, 10);
        let tx_log = MockTxLog::new();
        let eng = engine(stock_repo.clone(), tx_log.clone());

        let cmd = ReserveStockCommand {
            product_id: pid,
            warehouse_id: wid,
            quantity: 3,
            order_id: "ord-A".into(),
        };
        eng.reserve(cmd.clone()).await.unwrap();
        let err = eng.reserve(cmd).await.unwrap_err();

        assert!(matches!(err, InventoryError::DuplicateReservation(r) if r == "ord-A"));
        let row = stock_repo.get(pid, wid).await.unwrap().unwrap();
        assert_eq!(row.reserved(), 3, "the retried reserve must not be double-applied");
    }

    #[tokio::test]
    async fn adjust_upserts_a_missing_row_before_applying() {
        let pid = ProductId::new();
        let wid = WarehouseId::new();
        let stock_repo: Arc<MockStockRepo> = Arc::new(MockStockRepo { rows: Mutex::new(HashMap::new()) });
        let tx_log = MockTxLog::new();
        let eng = engine(stock_repo.clone(), tx_log.clone());

        let resp = eng
            .adjust(AdjustStockCommand {
                product_id: pid,
                warehouse_id: wid,
                delta: 50,
                kind: TransactionKind::In,
                reference_id: Some("po-1".into()),
                actor: "warehouse_pull_job".into(),
            })
            .await
            .unwrap();

        assert_eq!(resp.quantity, 50);
        assert_eq!(resp.available, 50);
    }

    #[tokio::test]
    async fn get_available_aggregates_across_warehouses() {
        let pid = ProductId::new();
        let wid1 = WarehouseId::new();
        let wid2 = WarehouseId::new();
        let stock_repo = MockStockRepo::seeded(pid, wid1, 10);
        {
            let mut row = StockRow::new_empty(pid, wid2);
            row.adjust_quantity(5).unwrap();
            stock_repo.rows.lock().unwrap().insert((pid, wid2), row);
        }
        let tx_log = MockTxLog::new();
        let eng = engine(stock_repo.clone(), tx_log.clone());

        let snapshot = eng.get_available(pid, None).await.unwrap();
        assert_eq!(snapshot.total, 15);
        assert_eq!(snapshot.available, 15);
        assert_eq!(snapshot.per_warehouse.unwrap().len(), 2);
    }
}
