//! Report ingestion.
//!
//! This module provides pure business logic for monthly impact reports:
//! - Submission validation
//! - The `ReportStore` persistence seam and an in-memory implementation
//! - Upsert-by-key ingestion

pub mod error;
pub mod memory;
pub mod month;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{ReportError, StoreError, ValidationErrors, Violation};
pub use memory::InMemoryReportStore;
pub use month::{Month, MonthFormatError};
pub use service::IngestionService;
pub use store::ReportStore;
pub use types::*;
pub use validation::{ReportSubmission, validate_submission};
