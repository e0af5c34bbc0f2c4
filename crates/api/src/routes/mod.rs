//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use impact_core::reports::ReportStore;
use impact_shared::AppError;
use serde::Serialize;

use crate::AppState;

pub mod dashboard;
pub mod health;
pub mod reports;

/// Creates the router mounted under `/api`.
pub fn api_routes<S: ReportStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .merge(reports::routes::<S>())
        .merge(dashboard::routes::<S>())
}

/// Failure envelope shared by every route.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Machine-readable error code.
    pub code: &'static str,
    /// Individual problems, one per entry.
    pub errors: Vec<String>,
    /// Internal cause, only in development mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Renders an error envelope with the status of `err`.
pub(crate) fn error_response(
    err: &AppError,
    message: &str,
    errors: Vec<String>,
    expose_error_details: bool,
) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let error = (expose_error_details && err.is_server_error()).then(|| err.to_string());

    (
        status,
        Json(ErrorResponse {
            success: false,
            message: message.to_string(),
            code: err.error_code(),
            errors,
            error,
        }),
    )
        .into_response()
}
