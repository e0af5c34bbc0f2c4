//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Report submission and dashboard routes
//! - Response envelopes
//! - The router with tracing and CORS layers

pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use impact_core::dashboard::DashboardService;
use impact_core::reports::{IngestionService, ReportStore};
use impact_shared::config::CorsConfig;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Application state shared across handlers.
pub struct AppState<S: ReportStore> {
    /// Report ingestion.
    pub ingestion: Arc<IngestionService<S>>,
    /// Dashboard queries.
    pub dashboard: Arc<DashboardService<S>>,
    /// Include internal error details in 5xx responses.
    pub expose_error_details: bool,
}

impl<S: ReportStore> AppState<S> {
    /// Creates state with both services sharing one store.
    #[must_use]
    pub fn new(store: Arc<S>, expose_error_details: bool) -> Self {
        Self {
            ingestion: Arc::new(IngestionService::new(Arc::clone(&store))),
            dashboard: Arc::new(DashboardService::new(store)),
            expose_error_details,
        }
    }
}

impl<S: ReportStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            ingestion: Arc::clone(&self.ingestion),
            dashboard: Arc::clone(&self.dashboard),
            expose_error_details: self.expose_error_details,
        }
    }
}

/// Creates the main application router.
pub fn create_router<S: ReportStore + 'static>(state: AppState<S>, cors: &CorsConfig) -> Router {
    Router::new()
        .merge(routes::health::routes::<S>())
        .nest("/api", routes::api_routes::<S>())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}

/// Builds the CORS layer from the configured origins.
///
/// `*` allows any origin without credentials. Otherwise only the listed
/// origins are allowed, with credentials.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allows_any() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
