use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::health::{application::HealthCheckUseCase, domain::HealthStatus};

/// Axum handler for the health check endpoint.
pub async fn health_check_handler(
    State(use_case): State<Arc<HealthCheckUseCase>>,
) -> (StatusCode, Json<HealthStatus>) {
    let status = use_case.execute();
    let http_status = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (http_status, Json(status))
}

/// Simplified variant with no shared state, for services that don't need
/// to wire a use case instance through `AppState`.
pub async fn health_check_simple() -> (StatusCode, Json<HealthStatus>) {
    let status = HealthStatus::healthy("api-gateway", env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}
