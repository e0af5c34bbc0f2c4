//! Dashboard routes.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use impact_core::dashboard::{Dashboard, DashboardError, DashboardSummary, NgoBreakdownEntry};
use impact_core::reports::ReportStore;
use impact_shared::AppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::error_response;
use crate::AppState;

const MONTH_REQUIRED: &str = "Month parameter is required in YYYY-MM format";

/// Creates the dashboard routes.
pub fn routes<S: ReportStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/dashboard", get(get_month_dashboard::<S>))
        .route("/dashboard-all", get(get_all_time_dashboard::<S>))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the month dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Month in `YYYY-MM` format.
    pub month: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Organizations that reported.
    #[serde(rename = "totalNGOs")]
    pub total_ngos: usize,
    /// People helped.
    pub total_people_helped: i64,
    /// Events conducted.
    pub total_events_conducted: i64,
    /// Funds utilized.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_funds_utilized: Decimal,
}

impl From<DashboardSummary> for SummaryResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_ngos: summary.total_ngos,
            total_people_helped: summary.total_people_helped,
            total_events_conducted: summary.total_events_conducted,
            total_funds_utilized: summary.total_funds_utilized,
        }
    }
}

/// Totals for one organization.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NgoDetailResponse {
    /// Organization identifier.
    pub ngo_id: String,
    /// People helped.
    pub people_helped: i64,
    /// Events conducted.
    pub events_conducted: i64,
    /// Funds utilized.
    #[serde(with = "rust_decimal::serde::float")]
    pub funds_utilized: Decimal,
}

impl From<NgoBreakdownEntry> for NgoDetailResponse {
    fn from(entry: NgoBreakdownEntry) -> Self {
        Self {
            ngo_id: entry.organization_id,
            people_helped: entry.people_helped,
            events_conducted: entry.events_conducted,
            funds_utilized: entry.funds_utilized,
        }
    }
}

/// Dashboard envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Always `true`.
    pub success: bool,
    /// Totals.
    pub summary: SummaryResponse,
    /// Per-organization totals.
    pub ngo_details: Vec<NgoDetailResponse>,
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            success: true,
            summary: dashboard.summary.into(),
            ngo_details: dashboard.breakdown.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/dashboard?month=YYYY-MM
async fn get_month_dashboard<S: ReportStore + 'static>(
    State(state): State<AppState<S>>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Response {
    let month = match query {
        Ok(Query(query)) => query.month,
        Err(rejection) => {
            let detail = rejection.body_text();
            return error_response(
                &AppError::Validation(detail.clone()),
                MONTH_REQUIRED,
                vec![detail],
                state.expose_error_details,
            );
        }
    };

    match state.dashboard.for_month(month.as_deref()).await {
        Ok(dashboard) => dashboard_response(dashboard),
        Err(err) => dashboard_error_response(
            err,
            "Failed to fetch dashboard data",
            state.expose_error_details,
        ),
    }
}

/// GET /api/dashboard-all
async fn get_all_time_dashboard<S: ReportStore + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    match state.dashboard.all_time().await {
        Ok(dashboard) => dashboard_response(dashboard),
        Err(err) => dashboard_error_response(
            err,
            "Failed to fetch all-time dashboard data",
            state.expose_error_details,
        ),
    }
}

fn dashboard_response(dashboard: Dashboard) -> Response {
    (StatusCode::OK, Json(DashboardResponse::from(dashboard))).into_response()
}

/// Maps a dashboard failure to its envelope.
///
/// Month problems are the caller's fault; everything else uses `failure`.
fn dashboard_error_response(
    err: DashboardError,
    failure: &str,
    expose_error_details: bool,
) -> Response {
    if err.is_validation() {
        let errors = vec![err.to_string()];
        return error_response(
            &AppError::from(err),
            MONTH_REQUIRED,
            errors,
            expose_error_details,
        );
    }

    error!(error = %err, "{failure}");
    error_response(&AppError::from(err), failure, Vec::new(), expose_error_details)
}
