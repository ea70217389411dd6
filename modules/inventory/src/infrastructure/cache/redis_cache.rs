use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use uuid::Uuid;

use crate::domain::repositories::{AvailabilitySnapshot, StockCache};
use crate::domain::value_objects::ProductId;
use crate::error::InventoryError;

/// Shared-process read-through cache for C5, backed by a single Redis
/// node. Snapshots are stored as JSON under `stock:{pid}:{wid|"all"}` with
/// `SET EX`; invalidation is a plain `DEL` of both keys for the product.
///
/// Unlike [`RedlockLock`](lockservice::RedlockLock) this does not need
/// quorum semantics — a cache miss just falls through to the repository,
/// so a single node (or a Redis cluster behind one URL) is sufficient.
pub struct RedisStockCache {
    conn: ConnectionManager,
}

impl RedisStockCache {
    pub async fn connect(redis_url: &str) -> Result<Self, InventoryError> {
        let client = Client::open(redis_url).map_err(|e| InventoryError::Cache(e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| InventoryError::Cache(e.to_string()))?;
        Ok(Self { conn })
    }

    fn key(product_id: ProductId, warehouse_id: Option<Uuid>) -> String {
        match warehouse_id {
            Some(wid) => format!("stock:{product_id}:{wid}"),
            None => format!("stock:{product_id}:all"),
        }
    }
}

#[async_trait]
impl StockCache for RedisStockCache {
    async fn get(&self, product_id: ProductId, warehouse_id: Option<Uuid>) -> Option<AvailabilitySnapshot> {
        let mut conn = self.conn.clone();
        let key = Self::key(product_id, warehouse_id);
        let raw: Option<String> = conn.get(&key).await.ok().flatten();
        raw.and_then(|s| serde_json::from_str(&s).ok())
    }

    async fn put(&self, product_id: ProductId, warehouse_id: Option<Uuid>, snapshot: AvailabilitySnapshot, ttl_seconds: u64) {
        let Ok(payload) = serde_json::to_string(&snapshot) else {
            return;
        };
        let mut conn = self.conn.clone();
        let key = Self::key(product_id, warehouse_id);
        let _: Result<(), _> = conn.set_ex(&key, payload, ttl_seconds).await;
    }

    async fn invalidate_product(&self, product_id: ProductId, warehouse_id: Option<Uuid>) -> Result<(), InventoryError> {
        let mut conn = self.conn.clone();
        let specific = Self::key(product_id, warehouse_id);
        let aggregate = Self::key(product_id, None);
        conn.del::<_, ()>(&[specific, aggregate])
            .await
            .map_err(|e| InventoryError::Cache(e.to_string()))
    }
}
