// Transaction log routes: the single read-only query endpoint.
//
// - `GET /` - query by `{product_id, warehouse_id}` or `reference_id`,
//   filtered further by `transaction_type` and a `start_date`/`end_date` range

use axum::routing::get;
use axum::Router;

use crate::handlers::transactions::list_transactions;
use crate::state::AppState;

pub fn transactions_router() -> Router<AppState> {
    Router::new().route("/", get(list_transactions))
}
