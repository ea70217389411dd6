mod pg_product_repository;
mod pg_stock_row_repository;
mod pg_transaction_log_repository;
mod pg_unit_of_work;
mod pg_views_repository;
mod pg_warehouse_repository;

pub use pg_product_repository::PgProductRepository;
pub use pg_stock_row_repository::PgStockRowRepository;
pub use pg_transaction_log_repository::PgTransactionLogRepository;
pub use pg_unit_of_work::PgStockMutationUnitOfWork;
pub use pg_views_repository::PgViewsRepository;
pub use pg_warehouse_repository::PgWarehouseRepository;
