// HTTP routes for the inventory coordination API.

pub mod products_routes;
pub mod stocks_routes;
pub mod sync_routes;
pub mod transactions_routes;
pub mod warehouses_routes;

pub use products_routes::products_router;
pub use stocks_routes::stocks_router;
pub use sync_routes::sync_router;
pub use transactions_routes::transactions_router;
pub use warehouses_routes::warehouses_router;
