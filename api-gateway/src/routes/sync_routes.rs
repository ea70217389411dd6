// Sync scheduler fan-out routes.
//
// - `POST /warehouses` - pull every active warehouse (202 Accepted + task_id)
// - `POST /marketplaces` - push to every configured marketplace (202 Accepted + task_id)
// - `GET /status?task_id=` - poll a previously accepted task

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sync::{sync_all_marketplaces, sync_all_warehouses, sync_status};
use crate::state::AppState;

pub fn sync_router() -> Router<AppState> {
    Router::new()
        .route("/warehouses", post(sync_all_warehouses))
        .route("/marketplaces", post(sync_all_marketplaces))
        .route("/status", get(sync_status))
}
