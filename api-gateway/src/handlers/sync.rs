//! `/sync` — the fan-out entry points onto the sync scheduler (§4.7,
//! §4.10). A fan-out sweep can take longer than an HTTP client should
//! wait on, so these return `202 Accepted` with a `task_id` immediately;
//! the actual fan-out runs in a detached task and reports into
//! [`AppState`]'s task registry for `GET /sync/status` to poll.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use syncengine::{HttpWarehouseAdapter, JobOutcome, MarketplacePushJob, WarehousePullJob};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AcceptedTask {
    pub task_id: Uuid,
}

/// `POST /sync/warehouses` — pulls every active warehouse concurrently.
pub async fn sync_all_warehouses(State(state): State<AppState>) -> Result<(StatusCode, Json<AcceptedTask>), AppError> {
    let task_id = state.new_task().await;
    let core = state.core.clone();
    let state_for_task = state.clone();

    tokio::spawn(async move {
        let warehouses = match core.warehouse_repo.list_active().await {
            Ok(warehouses) => warehouses,
            Err(err) => {
                state_for_task.fail_task(task_id, err.to_string()).await;
                return;
            }
        };

        let jobs = warehouses
            .into_iter()
            .map(|w| {
                let adapter: Arc<dyn syncengine::WarehouseAdapter> = Arc::new(HttpWarehouseAdapter::new(w.code().to_string(), "", ""));
                Arc::new(WarehousePullJob::new(
                    w.id(),
                    adapter,
                    core.stock_repo.clone(),
                    core.product_repo.clone(),
                    core.warehouse_repo.clone(),
                    core.engine.clone(),
                )) as Arc<dyn syncengine::Job>
            })
            .collect();

        let outcomes = core.scheduler.enqueue_all(jobs).await;
        complete_or_fail(&state_for_task, task_id, outcomes).await;
    });

    Ok((StatusCode::ACCEPTED, Json(AcceptedTask { task_id })))
}

/// `POST /sync/marketplaces` — pushes aggregated availability to every
/// configured marketplace adapter concurrently.
pub async fn sync_all_marketplaces(State(state): State<AppState>) -> Result<(StatusCode, Json<AcceptedTask>), AppError> {
    let task_id = state.new_task().await;
    let core = state.core.clone();
    let state_for_task = state.clone();

    tokio::spawn(async move {
        let adapters = core.marketplace_adapters();
        let jobs = adapters
            .into_values()
            .map(|adapter| Arc::new(MarketplacePushJob::new(adapter, core.product_repo.clone(), core.engine.clone(), None)) as Arc<dyn syncengine::Job>)
            .collect();

        let outcomes = core.scheduler.enqueue_all(jobs).await;
        complete_or_fail(&state_for_task, task_id, outcomes).await;
    });

    Ok((StatusCode::ACCEPTED, Json(AcceptedTask { task_id })))
}

async fn complete_or_fail(state: &AppState, task_id: Uuid, outcomes: Vec<Result<JobOutcome, syncengine::SyncError>>) {
    let mut values = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(outcome) => values.push(serde_json::to_value(outcome).unwrap_or(serde_json::Value::Null)),
            Err(err) => values.push(serde_json::json!({ "error": err.to_string() })),
        }
    }
    state.complete_task(task_id, values).await;
}

#[derive(Debug, Deserialize)]
pub struct TaskStatusQuery {
    pub task_id: Uuid,
}

pub async fn sync_status(State(state): State<AppState>, Query(q): Query<TaskStatusQuery>) -> Result<Json<crate::state::TaskStatus>, AppError> {
    match state.task_status(q.task_id).await {
        Some(status) => Ok(Json(status)),
        None => Err(AppError::new(StatusCode::NOT_FOUND, "UNKNOWN_TASK", "no task found for the given task_id")),
    }
}
