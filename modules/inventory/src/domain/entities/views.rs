use chrono::{DateTime, Utc};

use crate::domain::value_objects::{AlertLevel, ProductId, WarehouseId};

/// One row per active product: stock totals summed across every warehouse
/// that carries it. Eventually consistent — rebuilt by C6's refresh
/// operation, never written to directly by the reservation engine.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AggregatedStockView {
    pub product_id: ProductId,
    pub sku: String,
    pub total_quantity: i64,
    pub total_reserved: i64,
    pub total_available: i64,
    pub warehouse_count: i64,
    pub refreshed_at: DateTime<Utc>,
}

/// One row per `(product, warehouse)` stock row whose `available` has
/// dropped below the low-stock cutoff, for both an active product and an
/// active warehouse. Consumed by reporting, never by reservation decisions.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LowStockAlertView {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub sku: String,
    pub warehouse_code: String,
    pub available: i64,
    pub alert_level: AlertLevel,
    pub refreshed_at: DateTime<Utc>,
}
