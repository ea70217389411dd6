//! `/products` — CRUD on the Product entity, plus the reserve/release
//! action endpoints that front the reservation engine (§4.4, §4.10).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use inventory::{
    AdjustStockCommand, AvailabilityResponse, ProductId, ReleaseStockCommand, ReserveStockCommand,
    StockRowResponse, TransactionKind, WarehouseId,
};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProductBody {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<&inventory::Product> for ProductBody {
    fn from(p: &inventory::Product) -> Self {
        Self {
            id: p.id().into_uuid(),
            sku: p.sku().as_str().to_string(),
            name: p.name().to_string(),
            category: p.category().to_string(),
            price: p.price(),
            description: p.description().map(str::to_string),
            is_active: p.is_active(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductBody {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub description: Option<String>,
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<CreateProductBody>,
) -> Result<(StatusCode, Json<ProductBody>), AppError> {
    let use_case = inventory::CreateProductUseCase::new(state.core.product_repo.clone());
    let product = use_case
        .execute(&body.sku, &body.name, &body.category, body.price, body.description)
        .await?;
    Ok((StatusCode::CREATED, Json(ProductBody::from(&product))))
}

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

pub async fn list_products(
    State(state): State<AppState>,
    axum::extract::Query(q): axum::extract::Query<ListProductsQuery>,
) -> Result<Json<Vec<ProductBody>>, AppError> {
    let products = state.core.product_repo.list_active(q.page, q.page_size).await?;
    Ok(Json(products.iter().map(ProductBody::from).collect()))
}

pub async fn get_product(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ProductBody>, AppError> {
    let product = state
        .core
        .product_repo
        .find_by_id(ProductId::from(id))
        .await?
        .ok_or(inventory::InventoryError::ProductNotFound(id))?;
    Ok(Json(ProductBody::from(&product)))
}

pub async fn retire_product(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ProductBody>, AppError> {
    let use_case = inventory::RetireProductUseCase::new(state.core.product_repo.clone());
    let product = use_case.execute(ProductId::from(id)).await?;
    Ok(Json(ProductBody::from(&product)))
}

/// Body shared by `reserve` and `release`: which warehouse row to move
/// stock against, how much, and the order reference that correlates the
/// two and guards against a retried request double-applying.
#[derive(Debug, Deserialize)]
pub struct ReservationBody {
    pub warehouse_id: Uuid,
    pub quantity: i64,
    pub order_id: String,
}

pub async fn reserve_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ReservationBody>,
) -> Result<Json<StockRowResponse>, AppError> {
    let response = state
        .core
        .engine
        .reserve(ReserveStockCommand {
            product_id: ProductId::from(id),
            warehouse_id: WarehouseId::from(body.warehouse_id),
            quantity: body.quantity,
            order_id: body.order_id,
        })
        .await?;
    Ok(Json(response))
}

pub async fn release_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ReservationBody>,
) -> Result<Json<StockRowResponse>, AppError> {
    let response = state
        .core
        .engine
        .release(ReleaseStockCommand {
            product_id: ProductId::from(id),
            warehouse_id: WarehouseId::from(body.warehouse_id),
            quantity: body.quantity,
            order_id: body.order_id,
        })
        .await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub warehouse_id: Option<Uuid>,
}

pub async fn get_product_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::extract::Query(q): axum::extract::Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let snapshot = state
        .core
        .engine
        .get_available(ProductId::from(id), q.warehouse_id.map(WarehouseId::from))
        .await?;
    Ok(Json(snapshot))
}

/// Body for a manual correction to a stock row's `quantity` (§4.4 `adjust`,
/// kind `ADJUST`). `reason` becomes the transaction log's `actor` field —
/// the only place a free-text caller note has to go, since the log has no
/// separate notes column.
#[derive(Debug, Deserialize)]
pub struct AdjustBody {
    pub warehouse_id: Uuid,
    pub quantity: i64,
    pub reason: String,
}

pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AdjustBody>,
) -> Result<Json<StockRowResponse>, AppError> {
    let response = state
        .core
        .engine
        .adjust(AdjustStockCommand {
            product_id: ProductId::from(id),
            warehouse_id: WarehouseId::from(body.warehouse_id),
            delta: body.quantity,
            kind: TransactionKind::Adjust,
            reference_id: None,
            actor: body.reason,
        })
        .await?;
    Ok(Json(response))
}
