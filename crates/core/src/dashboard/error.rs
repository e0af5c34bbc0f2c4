//! Dashboard error types.

use impact_shared::AppError;
use thiserror::Error;

use crate::reports::{MonthFormatError, StoreError};

/// Errors that can occur while building a dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// No month was given for a month-scoped dashboard.
    #[error("Month parameter is required")]
    MissingMonth,

    /// The month was not `YYYY-MM`.
    #[error(transparent)]
    InvalidMonth(#[from] MonthFormatError),

    /// A total does not fit its numeric type.
    #[error("Total for {metric} overflowed")]
    Overflow {
        /// Metric whose total overflowed.
        metric: &'static str,
    },

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DashboardError {
    /// Whether the caller sent a bad request.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingMonth | Self::InvalidMonth(_))
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::MissingMonth | DashboardError::InvalidMonth(_) => {
                Self::Validation(err.to_string())
            }
            DashboardError::Overflow { .. } => Self::Internal(err.to_string()),
            DashboardError::Store(store) => store.into(),
        }
    }
}
