//! Dashboard service.

use std::sync::Arc;

use tracing::debug;

use super::aggregate::aggregate;
use super::error::DashboardError;
use super::types::Dashboard;
use crate::reports::{Month, ReportScope, ReportStore};

/// Read-only dashboard queries over a report store.
///
/// Every call recomputes from raw reports; nothing is cached.
pub struct DashboardService<S: ReportStore> {
    store: Arc<S>,
}

impl<S: ReportStore> DashboardService<S> {
    /// Create a new dashboard service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Dashboard for one month.
    ///
    /// The month is checked before the store is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is missing or malformed, a total
    /// overflows, or the store fails.
    pub async fn for_month(&self, month: Option<&str>) -> Result<Dashboard, DashboardError> {
        let month = month
            .filter(|m| !m.is_empty())
            .ok_or(DashboardError::MissingMonth)?;
        let month = Month::parse(month)?;
        self.build(ReportScope::Month(month)).await
    }

    /// Dashboard across every month.
    ///
    /// # Errors
    ///
    /// Returns an error if a total overflows or the store fails.
    pub async fn all_time(&self) -> Result<Dashboard, DashboardError> {
        self.build(ReportScope::AllTime).await
    }

    /// Summary and breakdown both come from this single read.
    async fn build(&self, scope: ReportScope) -> Result<Dashboard, DashboardError> {
        let reports = self.store.list(&scope).await?;
        let (summary, breakdown) = aggregate(&reports)?;

        debug!(
            ?scope,
            reports = reports.len(),
            organizations = summary.total_ngos,
            "Dashboard computed"
        );

        Ok(Dashboard {
            scope,
            summary,
            breakdown,
        })
    }
}
