// Stock row routes: listing, batch adjustment, reconciliation, and the
// per-row manual adjustment endpoint.
//
// - `GET /` - list every stock row
// - `POST /batch-update` - apply a batch of adjustments independently
// - `POST /reconcile` - run the reconciler sweep (optionally scoped to one warehouse)
// - `POST /{product_id}/{warehouse_id}/adjust` - manual correction of one row

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::stocks::{adjust_stock_row, batch_update, list_stocks, reconcile};
use crate::state::AppState;

pub fn stocks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stocks))
        .route("/batch-update", post(batch_update))
        .route("/reconcile", post(reconcile))
        .route("/{product_id}/{warehouse_id}/adjust", post(adjust_stock_row))
}
