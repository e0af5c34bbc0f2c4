//! Report submission routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{DateTime, Utc};
use impact_core::reports::{
    Month, Report, ReportError, ReportStore, ReportSubmission, SubmissionStatus,
};
use impact_shared::AppError;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

use super::error_response;
use crate::AppState;

/// Creates the report routes.
pub fn routes<S: ReportStore + 'static>() -> Router<AppState<S>> {
    Router::new().route("/report", post(submit_report::<S>))
}

// ============================================================================
// Response Types
// ============================================================================

/// A stored report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    /// Report ID.
    pub id: Uuid,
    /// Organization identifier.
    pub ngo_id: String,
    /// Reporting month.
    pub month: Month,
    /// People helped.
    pub people_helped: i64,
    /// Events conducted.
    pub events_conducted: i64,
    /// Funds utilized.
    #[serde(with = "rust_decimal::serde::float")]
    pub funds_utilized: Decimal,
    /// First stored.
    pub created_at: DateTime<Utc>,
    /// Last changed.
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            ngo_id: report.organization_id,
            month: report.month,
            people_helped: report.people_helped,
            events_conducted: report.events_conducted,
            funds_utilized: report.funds_utilized,
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

/// Successful submission envelope.
#[derive(Debug, Serialize)]
pub struct SubmitReportResponse {
    /// Always `true`.
    pub success: bool,
    /// Whether the report was created or updated.
    pub message: &'static str,
    /// The report as stored.
    pub data: ReportResponse,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/report
///
/// 201 when the (organization, month) pair is new, 200 when an existing
/// report was overwritten.
async fn submit_report<S: ReportStore + 'static>(
    State(state): State<AppState<S>>,
    payload: Result<Json<ReportSubmission>, JsonRejection>,
) -> Response {
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let detail = rejection.body_text();
            warn!(error = %detail, "Rejected report body");
            return error_response(
                &AppError::Validation(detail.clone()),
                "Validation error",
                vec![detail],
                state.expose_error_details,
            );
        }
    };

    match state.ingestion.submit(&submission).await {
        Ok(outcome) => {
            let (status, message) = match outcome.status {
                SubmissionStatus::Created => {
                    (StatusCode::CREATED, "Report submitted successfully")
                }
                SubmissionStatus::Updated => (StatusCode::OK, "Report updated successfully"),
            };
            (
                status,
                Json(SubmitReportResponse {
                    success: true,
                    message,
                    data: outcome.report.into(),
                }),
            )
                .into_response()
        }
        Err(err) => report_error_response(err, state.expose_error_details),
    }
}

/// Maps a submission failure to its envelope.
fn report_error_response(err: ReportError, expose_error_details: bool) -> Response {
    let message = match &err {
        ReportError::Validation(_) => "Validation error",
        ReportError::DuplicateKey { .. } => "A report for this NGO and month already exists",
        ReportError::Store(e) => {
            error!(error = %e, "Failed to submit report");
            "Failed to submit report"
        }
    };
    let errors = err.messages();
    error_response(&AppError::from(err), message, errors, expose_error_details)
}
