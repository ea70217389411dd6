mod commands;
mod responses;

pub use commands::{AdjustStockCommand, ReleaseStockCommand, ReserveStockCommand};
pub use responses::{
    AvailabilityResponse, ReconcileReport, StockRowResponse, StockRowDiscrepancy,
};
