use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::SyncError;

/// An order pulled from a marketplace via [`MarketplaceAdapter::list_orders`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MarketplaceOrder {
    pub order_id: String,
    pub sku: String,
    pub quantity: i64,
    pub placed_at: DateTime<Utc>,
}

/// Capability for reading authoritative stock from a warehouse source
/// system. One instance per warehouse (or per warehouse-system integration);
/// `WarehousePullJob` holds the `Arc<dyn WarehouseAdapter>` matching the
/// warehouse it is syncing.
#[async_trait]
pub trait WarehouseAdapter: Send + Sync {
    /// Name used in logs and the `task_type`/`adapter` metric labels.
    fn name(&self) -> &str;

    async fn get_stock(&self, sku: &str) -> Result<i64, SyncError>;
}

/// Capability for pushing stock levels to, and pulling orders from, a
/// third-party marketplace. Concrete variants (`AmazonAdapter`, `EbayAdapter`,
/// `ShopifyAdapter`, ...) are selected at bootstrap by marketplace name.
#[async_trait]
pub trait MarketplaceAdapter: Send + Sync {
    fn name(&self) -> &str;

    async fn update_stock(&self, sku: &str, quantity: i64) -> Result<(), SyncError>;

    async fn get_stock(&self, sku: &str) -> Result<Option<i64>, SyncError>;

    async fn list_orders(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<MarketplaceOrder>, SyncError>;
}
