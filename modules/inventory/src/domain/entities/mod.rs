mod product;
mod stock_row;
mod stock_transaction;
mod views;
mod warehouse;

pub use product::Product;
pub use stock_row::StockRow;
pub use stock_transaction::StockTransaction;
pub use views::{AggregatedStockView, LowStockAlertView};
pub use warehouse::Warehouse;
