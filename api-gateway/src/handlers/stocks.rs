//! `/stocks` — batch adjustment, reconciliation and the ad hoc manual
//! correction endpoint. Stock rows have no standalone id in the
//! repository port (§4.1 keys them by the `(product, warehouse)` pair),
//! so these routes address a row by that pair rather than a single id.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use inventory::{AdjustStockCommand, ProductId, ReconcileReport, StockRowResponse, TransactionKind, WarehouseId};
use syncengine::{JobOutcome, ReconcileJob};

use crate::error::AppError;
use crate::handlers::warehouses::StockRowBody;
use crate::state::AppState;

pub async fn list_stocks(State(state): State<AppState>) -> Result<Json<Vec<StockRowBody>>, AppError> {
    let rows = state.core.stock_repo.scan_all(None).await?;
    Ok(Json(rows.iter().map(|r| StockRowBody::from(StockRowResponse::from(r))).collect()))
}

#[derive(Debug, Deserialize)]
pub struct BatchAdjustEntry {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub delta: i64,
    pub kind: TransactionKind,
    pub reference_id: Option<String>,
    pub actor: String,
}

#[derive(Debug, Serialize)]
pub struct BatchAdjustResult {
    pub succeeded: Vec<StockRowBody>,
    pub failed: Vec<BatchAdjustFailure>,
}

#[derive(Debug, Serialize)]
pub struct BatchAdjustFailure {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub error: String,
}

/// `POST /stocks/batch-update` — applies each entry independently through
/// the reservation engine's `adjust` path; one entry's rejection (e.g. a
/// negative-stock guard) does not abort the rest of the batch.
pub async fn batch_update(
    State(state): State<AppState>,
    Json(entries): Json<Vec<BatchAdjustEntry>>,
) -> Result<Json<BatchAdjustResult>, AppError> {
    let mut result = BatchAdjustResult { succeeded: Vec::new(), failed: Vec::new() };

    for entry in entries {
        let outcome = state
            .core
            .engine
            .adjust(AdjustStockCommand {
                product_id: ProductId::from(entry.product_id),
                warehouse_id: WarehouseId::from(entry.warehouse_id),
                delta: entry.delta,
                kind: entry.kind,
                reference_id: entry.reference_id,
                actor: entry.actor,
            })
            .await;

        match outcome {
            Ok(row) => result.succeeded.push(StockRowBody::from(row)),
            Err(err) => result.failed.push(BatchAdjustFailure {
                product_id: entry.product_id,
                warehouse_id: entry.warehouse_id,
                error: err.to_string(),
            }),
        }
    }

    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct ReconcileQuery {
    pub warehouse_id: Option<Uuid>,
}

/// `POST /stocks/reconcile` — runs the reconciler sweep (§4.8) to
/// completion and returns its report inline.
pub async fn reconcile(
    State(state): State<AppState>,
    axum::extract::Query(q): axum::extract::Query<ReconcileQuery>,
) -> Result<Json<ReconcileReport>, AppError> {
    let job = ReconcileJob::new(state.core.reconcile.clone(), q.warehouse_id.map(WarehouseId::from));
    let outcome = state.core.scheduler.enqueue(Arc::new(job)).await.wait().await?;
    let JobOutcome::Reconcile(report) = outcome else {
        unreachable!("ReconcileJob always returns JobOutcome::Reconcile");
    };
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct ManualAdjustBody {
    pub quantity: i64,
    pub reason: String,
}

/// `POST /stocks/{product_id}/{warehouse_id}/adjust` — the manual
/// correction endpoint; `reason` is carried as the log entry's `actor`.
pub async fn adjust_stock_row(
    State(state): State<AppState>,
    Path((product_id, warehouse_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<ManualAdjustBody>,
) -> Result<Json<StockRowBody>, AppError> {
    let row = state
        .core
        .engine
        .adjust(AdjustStockCommand {
            product_id: ProductId::from(product_id),
            warehouse_id: WarehouseId::from(warehouse_id),
            delta: body.quantity,
            kind: TransactionKind::Adjust,
            reference_id: None,
            actor: body.reason,
        })
        .await?;
    Ok(Json(StockRowBody::from(row)))
}
