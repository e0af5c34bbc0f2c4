//! Report error types.

use impact_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

use super::month::Month;

/// One violated constraint on one submitted field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the field.
    pub field: &'static str,
    /// Human readable message.
    pub message: String,
}

/// Every constraint a submission violated, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", join_messages(.violations))]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Records a violation.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(Violation {
            field,
            message: message.into(),
        });
    }

    /// Returns true if no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the violated fields, in order.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }

    /// Returns the messages, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }
}

/// Errors raised by a [`ReportStore`](super::ReportStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The `(organization, month)` uniqueness constraint rejected an insert.
    #[error("a report with the same organization and month already exists")]
    DuplicateKey,

    /// No report with this ID.
    #[error("report not found: {0}")]
    NotFound(Uuid),

    /// A stored record could not be mapped back to a report.
    #[error("invalid stored report: {0}")]
    InvalidRecord(String),

    /// The store could not be reached or failed internally.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Errors that can occur while submitting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The submission violated one or more field constraints.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A concurrent submission created the same key first.
    ///
    /// Retrying the submission follows the update path.
    #[error("a report for organization '{organization_id}' and month {month} already exists")]
    DuplicateKey {
        /// Organization identifier.
        organization_id: String,
        /// Reporting month.
        month: Month,
    },

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReportError {
    /// Per-field messages suitable for an `errors` list in a response.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.messages(),
            Self::DuplicateKey { .. } => vec![
                self.to_string(),
                "Retry the submission to update the existing report".to_string(),
            ],
            Self::Store(_) => Vec::new(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey => Self::DuplicateKey(err.to_string()),
            StoreError::NotFound(_) => Self::NotFound(err.to_string()),
            StoreError::InvalidRecord(_) => Self::Internal(err.to_string()),
            StoreError::Unavailable(_) => Self::Database(err.to_string()),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Validation(errors) => Self::Validation(errors.to_string()),
            ReportError::DuplicateKey { .. } => Self::DuplicateKey(err.to_string()),
            ReportError::Store(store) => store.into(),
        }
    }
}
