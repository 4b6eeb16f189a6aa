//! Estate Server - tree registry, height statistics and drone survey plans

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use estate_server::config::Config;
use estate_server::state::AppState;
use estate_server::{api, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init_tracing(config.log_json)?;

    tracing::info!("Starting Estate Server...");
    let state = Arc::new(AppState::from_config(config).await?);

    let config = state.config();
    tracing::info!(
        storage = ?config.storage,
        clearance_m = config.planner.clearance_m,
        cell_spacing_m = config.planner.cell_spacing_m,
        scan_order = ?config.planner.scan_order,
        compute_on_demand = config.planner.compute_on_demand,
        "Loaded configuration"
    );

    let port = config.server_port;

    let app = api::routes()
        .with_state(state)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Estate Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", err);
    }
}
