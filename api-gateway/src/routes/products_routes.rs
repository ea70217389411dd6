// Product routes: CRUD plus the reserve/release/availability action
// endpoints fronting the reservation engine.
//
// - `POST /` - create a product
// - `GET /` - list active products
// - `GET /{id}` - product details
// - `DELETE /{id}` - retire a product
// - `GET /{id}/availability` - cached availability snapshot (optionally scoped to a warehouse)
// - `POST /{id}/reserve` - reserve stock
// - `POST /{id}/release` - release reserved stock
// - `POST /{id}/adjust` - manual quantity correction

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::products::{
    adjust_stock, create_product, get_product, get_product_availability, list_products, release_stock, reserve_stock, retire_product,
};
use crate::state::AppState;

pub fn products_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/{id}", get(get_product).delete(retire_product))
        .route("/{id}/availability", get(get_product_availability))
        .route("/{id}/reserve", post(reserve_stock))
        .route("/{id}/release", post(release_stock))
        .route("/{id}/adjust", post(adjust_stock))
}
