//! Front door onto the inventory coordination core (C10): an Axum router
//! wiring the same [`bootstrap::Core`] the CLI (C11) uses, so both front
//! doors share one pool/lock/cache/scheduler/metrics construction path.

mod error;
mod handlers;
mod routes;
mod state;

use axum::routing::get;
use axum::Router;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use bootstrap::Core;
use common::health::infrastructure::health_check_simple;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }

    let config = common::Config::from_env()?;
    let bind_addr = config.http_bind_addr.clone();
    let core = Core::bootstrap(config).await?;
    let state = AppState::new(core);

    let app = Router::new()
        .nest("/products", routes::products_router())
        .nest("/warehouses", routes::warehouses_router())
        .nest("/stocks", routes::stocks_router())
        .nest("/transactions", routes::transactions_router())
        .nest("/sync", routes::sync_router())
        .route("/metrics", get(handlers::metrics::metrics))
        .route("/health", get(health_check_simple))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "api-gateway listening");
    axum::serve(listener, app).await?;

    Ok(())
}
