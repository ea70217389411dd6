mod alert_level;
mod product_id;
mod sku;
mod stock_row_id;
mod transaction_id;
mod transaction_kind;
mod warehouse_id;

pub use alert_level::AlertLevel;
pub use product_id::ProductId;
pub use sku::Sku;
pub use stock_row_id::StockRowId;
pub use transaction_id::TransactionId;
pub use transaction_kind::TransactionKind;
pub use warehouse_id::WarehouseId;
