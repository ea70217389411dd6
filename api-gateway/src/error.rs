//! Unified API error type, mapping [`InventoryError`]/[`SyncError`] onto
//! HTTP status codes per §6/§7: `400` for validation and business-rule
//! rejections, `404` for unknown resources, `409` for a lost optimistic-lock
//! race that exhausted its retries, `500` for infrastructural failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use inventory::InventoryError;
use serde::Serialize;
use syncengine::SyncError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

pub struct AppError {
    status: StatusCode,
    body: ErrorBody,
}

impl AppError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self { status, body: ErrorBody { code, message: message.into() } }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        use InventoryError::*;
        match &err {
            ProductNotFound(_) | WarehouseNotFound(_) | StockRowNotFound { .. } | TransactionNotFound(_) => {
                AppError::new(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
            }
            InsufficientStock { .. } => AppError::new(StatusCode::BAD_REQUEST, "INSUFFICIENT_STOCK", err.to_string()),
            Overrelease { .. } => AppError::new(StatusCode::BAD_REQUEST, "OVERRELEASE", err.to_string()),
            NegativeStock | ReservedExceedsQuantity => AppError::new(StatusCode::BAD_REQUEST, "NEGATIVE_STOCK", err.to_string()),
            DuplicateReservation(_) => AppError::new(StatusCode::CONFLICT, "DUPLICATE_REFERENCE", err.to_string()),
            DuplicateSku(_) | DuplicateWarehouseCode(_) => AppError::new(StatusCode::CONFLICT, "DUPLICATE", err.to_string()),
            InvalidSku(_) | Validation(_) => AppError::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string()),
            VersionConflict(_) => AppError::new(StatusCode::CONFLICT, "VERSION_CONFLICT", err.to_string()),
            LockUnavailable(_) => AppError::new(StatusCode::SERVICE_UNAVAILABLE, "LOCK_UNAVAILABLE", err.to_string()),
            Database(_) | Internal(_) | NotImplemented => {
                AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", err.to_string())
            }
            Cache(_) | Adapter(_) => AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR", err.to_string()),
        }
    }
}

impl From<SyncError> for AppError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Inventory(inner) => AppError::from(inner),
            SyncError::UnknownTarget(_) => AppError::new(StatusCode::NOT_FOUND, "UNKNOWN_TARGET", err.to_string()),
            SyncError::Adapter { .. } | SyncError::QueueClosed | SyncError::RetriesExhausted(_) => {
                AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", err.to_string())
            }
        }
    }
}
