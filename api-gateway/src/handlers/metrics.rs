//! `/metrics` — Prometheus text exposition over the process-wide registry
//! wired in [`bootstrap::Core`] (§4.9).

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.core.metrics.gather_text() {
        Ok(body) => ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("failed to encode metrics: {err}")).into_response(),
    }
}
