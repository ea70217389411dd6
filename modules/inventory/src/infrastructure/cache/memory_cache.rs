use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::repositories::{AvailabilitySnapshot, StockCache};
use crate::domain::value_objects::ProductId;
use crate::error::InventoryError;

struct Entry {
    snapshot: AvailabilitySnapshot,
    expires_at: Instant,
}

/// Process-local read-through cache for C5, keyed `stock:{pid}:{wid|"all"}`.
/// Sufficient for a single-process deployment or for tests; a multi-process
/// deployment should back C5 with [`RedisStockCache`](super::RedisStockCache)
/// instead so invalidation is visible across processes.
pub struct InMemoryStockCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryStockCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn key(product_id: ProductId, warehouse_id: Option<Uuid>) -> String {
        match warehouse_id {
            Some(wid) => format!("stock:{product_id}:{wid}"),
            None => format!("stock:{product_id}:all"),
        }
    }
}

impl Default for InMemoryStockCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StockCache for InMemoryStockCache {
    async fn get(&self, product_id: ProductId, warehouse_id: Option<Uuid>) -> Option<AvailabilitySnapshot> {
        let entries = self.entries.lock().expect("lock poisoned");
        let key = Self::key(product_id, warehouse_id);
        entries.get(&key).filter(|e| e.expires_at > Instant::now()).map(|e| e.snapshot.clone())
    }

    async fn put(&self, product_id: ProductId, warehouse_id: Option<Uuid>, snapshot: AvailabilitySnapshot, ttl_seconds: u64) {
        let key = Self::key(product_id, warehouse_id);
        let mut entries = self.entries.lock().expect("lock poisoned");
        entries.insert(
            key,
            Entry {
                snapshot,
                expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
            },
        );
    }

    async fn invalidate_product(&self, product_id: ProductId, warehouse_id: Option<Uuid>) -> Result<(), InventoryError> {
        let mut entries = self.entries.lock().expect("lock poisoned");
        entries.remove(&Self::key(product_id, warehouse_id));
        entries.remove(&Self::key(product_id, None));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let cache = InMemoryStockCache::new();
        let pid = ProductId::new();
        let snapshot = AvailabilitySnapshot {
            total: 10,
            reserved: 2,
            available: 8,
            per_warehouse: None,
        };
        cache.put(pid, None, snapshot.clone(), 60).await;
        assert_eq!(cache.get(pid, None).await, Some(snapshot));
    }

    #[tokio::test]
    async fn expired_entry_is_a_miss() {
        let cache = InMemoryStockCache::new();
        let pid = ProductId::new();
        let snapshot = AvailabilitySnapshot {
            total: 10,
            reserved: 0,
            available: 10,
            per_warehouse: None,
        };
        cache.put(pid, None, snapshot, 0).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(cache.get(pid, None).await, None);
    }

    #[tokio::test]
    async fn invalidate_clears_both_specific_and_aggregate_keys() {
        let cache = InMemoryStockCache::new();
        let pid = ProductId::new();
        let wid = Uuid::new_v4();
        let snapshot = AvailabilitySnapshot {
            total: 10,
            reserved: 0,
            available: 10,
            per_warehouse: None,
        };
        cache.put(pid, Some(wid), snapshot.clone(), 60).await;
        cache.put(pid, None, snapshot, 60).await;

        cache.invalidate_product(pid, Some(wid)).await.unwrap();

        assert_eq!(cache.get(pid, Some(wid)).await, None);
        assert_eq!(cache.get(pid, None).await, None);
    }
}
