mod flash_sale_order;
mod marketplace_push;
mod reconcile;
mod refresh_views;
mod retention;
mod stock_alert;
mod warehouse_pull;

pub use flash_sale_order::{FlashSaleOrderJob, FlashSaleOrderResult};
pub use marketplace_push::{MarketplacePushJob, MarketplacePushResult};
pub use reconcile::{ReconcileJob, ReconcileResult};
pub use refresh_views::{RefreshViewsJob, RefreshViewsResult};
pub use retention::{RetentionJob, RetentionResult};
pub use stock_alert::{StockAlertJob, StockAlertResult};
pub use warehouse_pull::{WarehousePullJob, WarehousePullResult};
