//! Health check endpoints.

use axum::{Json, Router, routing::get};
use impact_core::reports::ReportStore;
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Liveness banner.
async fn index() -> &'static str {
    "NGO Reporting API is running"
}

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes<S: ReportStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}
