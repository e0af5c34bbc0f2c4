//! In-process report store.

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use super::error::StoreError;
use super::store::ReportStore;
use super::types::{NewReport, Report, ReportKey, ReportMetrics, ReportScope};

/// Report store held in a concurrent map keyed by [`ReportKey`].
///
/// The map's entry API is the uniqueness arbiter, so concurrent first-time
/// inserts for one key resolve to exactly one winner.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: DashMap<ReportKey, Report>,
}

impl InMemoryReportStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Returns true if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl ReportStore for InMemoryReportStore {
    async fn find_by_key(&self, key: &ReportKey) -> Result<Option<Report>, StoreError> {
        Ok(self.reports.get(key).map(|r| r.value().clone()))
    }

    async fn insert(&self, report: NewReport) -> Result<Report, StoreError> {
        match self.reports.entry(report.key) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let stored = Report {
                    id: Uuid::now_v7(),
                    organization_id: slot.key().organization_id.clone(),
                    month: slot.key().month.clone(),
                    people_helped: report.metrics.people_helped,
                    events_conducted: report.metrics.events_conducted,
                    funds_utilized: report.metrics.funds_utilized,
                    created_at: now,
                    updated_at: now,
                };
                slot.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn update_metrics(&self, id: Uuid, metrics: ReportMetrics) -> Result<Report, StoreError> {
        let mut entry = self
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        entry.replace_metrics(metrics, Utc::now());
        Ok(entry.value().clone())
    }

    async fn list(&self, scope: &ReportScope) -> Result<Vec<Report>, StoreError> {
        let mut reports: Vec<Report> = self
            .reports
            .iter()
            .filter(|r| scope.includes(&r.month))
            .map(|r| r.value().clone())
            .collect();
        reports.sort_by(|a, b| {
            (&a.organization_id, &a.month).cmp(&(&b.organization_id, &b.month))
        });
        Ok(reports)
    }
}
