//! Impact reporting API server
//!
//! Main entry point for the NGO monthly reporting backend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use impact_api::{AppState, create_router};
use impact_core::reports::{InMemoryReportStore, ReportStore};
use impact_db::{ReportRepository, connect};
use impact_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "impact=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    if config.database.is_in_memory() {
        warn!("Using the in-memory report store; reports are lost on shutdown");
        return serve(&config, Arc::new(InMemoryReportStore::new())).await;
    }

    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    serve(&config, Arc::new(ReportRepository::new(db))).await
}

/// Binds the listener and serves until ctrl-c.
async fn serve<S: ReportStore + 'static>(config: &AppConfig, store: Arc<S>) -> anyhow::Result<()> {
    let state = AppState::new(store, config.expose_error_details());
    let app = create_router(state, &config.cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(run_mode = ?config.run_mode, "Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
