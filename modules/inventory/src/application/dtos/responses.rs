use chrono::{DateTime, Utc};

use crate::domain::entities::StockRow;
use crate::domain::repositories::AvailabilitySnapshot;
use crate::domain::value_objects::{ProductId, WarehouseId};

/// Wire-shaped view of a [`StockRow`] returned by reservation engine
/// operations, once the row has been committed.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StockRowResponse {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub quantity: i64,
    pub reserved: i64,
    pub available: i64,
    pub version: i32,
}

impl From<&StockRow> for StockRowResponse {
    fn from(row: &StockRow) -> Self {
        Self {
            product_id: row.product_id(),
            warehouse_id: row.warehouse_id(),
            quantity: row.quantity(),
            reserved: row.reserved(),
            available: row.available(),
            version: row.version(),
        }
    }
}

pub type AvailabilityResponse = AvailabilitySnapshot;

/// Result of a single reconciler sweep (§4.8).
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ReconcileReport {
    pub total_checked: u64,
    pub discrepancies_found: u64,
    pub corrections_made: u64,
    pub errors: Vec<String>,
    pub discrepancies: Vec<StockRowDiscrepancy>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct StockRowDiscrepancy {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub stored_available: i64,
    pub expected_available: i64,
    pub repaired_at: DateTime<Utc>,
}
