//! Persistence seam for reports.

use std::future::Future;

use uuid::Uuid;

use super::error::StoreError;
use super::types::{NewReport, Report, ReportKey, ReportMetrics, ReportScope};

/// Repository trait for report persistence.
///
/// This trait is implemented by the db crate to provide actual database operations,
/// and by [`InMemoryReportStore`](super::InMemoryReportStore) for tests and local runs.
/// Implementations must enforce uniqueness of `(organization_id, month)`.
pub trait ReportStore: Send + Sync {
    /// Find the report for a key.
    fn find_by_key(
        &self,
        key: &ReportKey,
    ) -> impl Future<Output = Result<Option<Report>, StoreError>> + Send;

    /// Create a report. Fails with [`StoreError::DuplicateKey`] if the key exists.
    fn insert(&self, report: NewReport) -> impl Future<Output = Result<Report, StoreError>> + Send;

    /// Replace the three metrics of an existing report.
    fn update_metrics(
        &self,
        id: Uuid,
        metrics: ReportMetrics,
    ) -> impl Future<Output = Result<Report, StoreError>> + Send;

    /// List reports in scope, ordered by organization then month.
    fn list(
        &self,
        scope: &ReportScope,
    ) -> impl Future<Output = Result<Vec<Report>, StoreError>> + Send;
}
