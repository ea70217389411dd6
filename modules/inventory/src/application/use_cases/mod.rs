mod manage_catalog;
mod queries;
mod reconcile;
mod refresh_views;
mod reservation_engine;

pub use manage_catalog::{CreateProductUseCase, CreateWarehouseUseCase, RetireProductUseCase};
pub use queries::{
    GetLowStockUseCase, GetProductStockOverviewUseCase, ListTransactionsUseCase, LowStockRow,
    ProductStockOverview, TransactionFilter, retention_cutoff,
};
pub use reconcile::ReconcileUseCase;
pub use refresh_views::RefreshViewsUseCase;
pub use reservation_engine::ReservationEngine;
