//! `/warehouses` — CRUD on the Warehouse entity, plus its per-warehouse
//! sync, inventory overview and low-stock action endpoints (§4.10).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use inventory::{LowStockRow, StockRowResponse, WarehouseId};
use syncengine::{HttpWarehouseAdapter, JobOutcome, WarehousePullJob};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WarehouseBody {
    pub id: Uuid,
    pub code: String,
    pub location: String,
    pub priority: i32,
    pub is_active: bool,
}

impl From<&inventory::Warehouse> for WarehouseBody {
    fn from(w: &inventory::Warehouse) -> Self {
        Self {
            id: w.id().into_uuid(),
            code: w.code().to_string(),
            location: w.location().to_string(),
            priority: w.priority(),
            is_active: w.is_active(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateWarehouseBody {
    pub code: String,
    pub location: String,
    pub priority: i32,
}

pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(body): Json<CreateWarehouseBody>,
) -> Result<(StatusCode, Json<WarehouseBody>), AppError> {
    let use_case = inventory::CreateWarehouseUseCase::new(state.core.warehouse_repo.clone());
    let warehouse = use_case.execute(&body.code, &body.location, body.priority).await?;
    Ok((StatusCode::CREATED, Json(WarehouseBody::from(&warehouse))))
}

pub async fn list_warehouses(State(state): State<AppState>) -> Result<Json<Vec<WarehouseBody>>, AppError> {
    let warehouses = state.core.warehouse_repo.list_active().await?;
    Ok(Json(warehouses.iter().map(WarehouseBody::from).collect()))
}

pub async fn get_warehouse(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<WarehouseBody>, AppError> {
    let warehouse = state
        .core
        .warehouse_repo
        .find_by_id(WarehouseId::from(id))
        .await?
        .ok_or(inventory::InventoryError::WarehouseNotFound(id))?;
    Ok(Json(WarehouseBody::from(&warehouse)))
}

#[derive(Debug, Serialize)]
pub struct StockRowBody {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: i64,
    pub reserved: i64,
    pub available: i64,
    pub version: i32,
}

impl From<StockRowResponse> for StockRowBody {
    fn from(r: StockRowResponse) -> Self {
        Self {
            product_id: r.product_id.into_uuid(),
            warehouse_id: r.warehouse_id.into_uuid(),
            quantity: r.quantity,
            reserved: r.reserved,
            available: r.available,
            version: r.version,
        }
    }
}

/// `GET /warehouses/{id}/inventory` — every stock row carried by this
/// warehouse. Reads C1 directly; this is an operational listing, not the
/// cached availability snapshot `GET /products/{id}` serves.
pub async fn warehouse_inventory(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Vec<StockRowBody>>, AppError> {
    let rows = state.core.stock_repo.scan_all(Some(WarehouseId::from(id))).await?;
    Ok(Json(
        rows.iter()
            .map(|r| StockRowBody::from(StockRowResponse::from(r)))
            .collect(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    #[serde(default = "default_threshold")]
    pub threshold: i64,
}

fn default_threshold() -> i64 {
    10
}

pub async fn warehouse_low_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::extract::Query(q): axum::extract::Query<LowStockQuery>,
) -> Result<Json<Vec<LowStockRow>>, AppError> {
    let rows = state.core.low_stock.execute(q.threshold, Some(WarehouseId::from(id))).await?;
    Ok(Json(rows))
}

#[derive(Debug, Serialize)]
pub struct WarehousePullResponse {
    pub warehouse_name: String,
    pub synced_count: u64,
    pub errors: Vec<String>,
}

/// `POST /warehouses/{id}/sync` — runs a single `WarehousePullJob` to
/// completion and returns its result inline, rather than a `task_id` to
/// poll: a single-warehouse pull is bounded by one warehouse's product
/// count, unlike the fan-out `/sync/warehouses` entry point.
pub async fn sync_warehouse(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<WarehousePullResponse>, AppError> {
    let warehouse_id = WarehouseId::from(id);
    let warehouse = state
        .core
        .warehouse_repo
        .find_by_id(warehouse_id)
        .await?
        .ok_or(inventory::InventoryError::WarehouseNotFound(id))?;

    let adapter: Arc<dyn syncengine::WarehouseAdapter> = Arc::new(HttpWarehouseAdapter::new(warehouse.code().to_string(), "", ""));
    let job = WarehousePullJob::new(
        warehouse_id,
        adapter,
        state.core.stock_repo.clone(),
        state.core.product_repo.clone(),
        state.core.warehouse_repo.clone(),
        state.core.engine.clone(),
    );

    let outcome = state.core.scheduler.enqueue(Arc::new(job)).await.wait().await?;
    let JobOutcome::WarehousePull(result) = outcome else {
        unreachable!("WarehousePullJob always returns JobOutcome::WarehousePull");
    };

    Ok(Json(WarehousePullResponse {
        warehouse_name: result.warehouse_name,
        synced_count: result.synced_count,
        errors: result.errors,
    }))
}
