//! # Sync Engine Module
//!
//! The bounded worker pool that drives warehouse pulls, marketplace
//! pushes, view refreshes, reconciliation, retention and flash-sale order
//! processing (C7) on top of the `inventory` crate's reservation engine.
//!
//! ## Architecture
//!
//! - **Domain Layer**: `WarehouseAdapter` / `MarketplaceAdapter` capability traits
//! - **Application Layer**: the scheduler and its seven job kinds
//! - **Infrastructure Layer**: concrete marketplace adapters (Amazon, eBay, Shopify)

pub mod application;
pub mod domain;
pub mod infrastructure;

mod error;

pub use error::SyncError;

pub use domain::{MarketplaceAdapter, MarketplaceOrder, WarehouseAdapter};

pub use application::jobs::{
    FlashSaleOrderJob, FlashSaleOrderResult, MarketplacePushJob, MarketplacePushResult,
    ReconcileJob, ReconcileResult, RefreshViewsJob, RefreshViewsResult, RetentionJob,
    RetentionResult, StockAlertJob, StockAlertResult, WarehousePullJob, WarehousePullResult,
};
pub use application::{Job, JobHandle, JobOutcome, RetryPolicy, SyncScheduler};

pub use infrastructure::adapters::{AmazonAdapter, EbayAdapter, HttpWarehouseAdapter, MarketplaceCredentials, ShopifyAdapter};
