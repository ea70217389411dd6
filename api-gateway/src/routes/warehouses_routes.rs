// Warehouse routes: CRUD plus the per-warehouse sync, inventory and
// low-stock action endpoints.
//
// - `POST /` - create a warehouse
// - `GET /` - list active warehouses
// - `GET /{id}` - warehouse details
// - `POST /{id}/sync` - pull authoritative quantities from this warehouse
// - `GET /{id}/inventory` - every stock row carried by this warehouse
// - `GET /{id}/low-stock` - stock rows below threshold (default 10)

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::warehouses::{create_warehouse, get_warehouse, list_warehouses, sync_warehouse, warehouse_inventory, warehouse_low_stock};
use crate::state::AppState;

pub fn warehouses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_warehouse).get(list_warehouses))
        .route("/{id}", get(get_warehouse))
        .route("/{id}/sync", post(sync_warehouse))
        .route("/{id}/inventory", get(warehouse_inventory))
        .route("/{id}/low-stock", get(warehouse_low_stock))
}
