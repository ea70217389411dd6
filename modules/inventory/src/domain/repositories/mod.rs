mod product_repository;
mod stock_cache;
mod stock_row_repository;
mod transaction_log_repository;
mod unit_of_work;
mod views_repository;
mod warehouse_repository;

pub use product_repository::ProductRepository;
pub use stock_cache::{AvailabilitySnapshot, StockCache, WarehouseAvailability};
pub use stock_row_repository::StockRowRepository;
pub use transaction_log_repository::TransactionLogRepository;
pub use unit_of_work::StockMutationUnitOfWork;
pub use views_repository::ViewsRepository;
pub use warehouse_repository::WarehouseRepository;
