//! Report data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::month::Month;

/// Uniqueness key of a report: one report per organization per month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportKey {
    /// Externally assigned organization identifier.
    pub organization_id: String,
    /// Reporting month.
    pub month: Month,
}

impl ReportKey {
    /// Creates a new report key.
    #[must_use]
    pub fn new(organization_id: impl Into<String>, month: Month) -> Self {
        Self {
            organization_id: organization_id.into(),
            month,
        }
    }
}

/// The three metrics an organization reports each month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetrics {
    /// Number of people helped.
    pub people_helped: i64,
    /// Number of events conducted.
    pub events_conducted: i64,
    /// Funds utilized.
    pub funds_utilized: Decimal,
}

/// A validated report ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    /// Uniqueness key.
    pub key: ReportKey,
    /// Reported metrics.
    pub metrics: ReportMetrics,
}

/// A stored report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Report ID.
    pub id: Uuid,
    /// Organization identifier.
    pub organization_id: String,
    /// Reporting month.
    pub month: Month,
    /// Number of people helped.
    pub people_helped: i64,
    /// Number of events conducted.
    pub events_conducted: i64,
    /// Funds utilized.
    pub funds_utilized: Decimal,
    /// Set by the store on creation.
    pub created_at: DateTime<Utc>,
    /// Set by the store on every write.
    pub updated_at: DateTime<Utc>,
}

impl Report {
    /// Returns the uniqueness key of this report.
    #[must_use]
    pub fn key(&self) -> ReportKey {
        ReportKey::new(self.organization_id.clone(), self.month.clone())
    }

    /// Returns the reported metrics.
    #[must_use]
    pub const fn metrics(&self) -> ReportMetrics {
        ReportMetrics {
            people_helped: self.people_helped,
            events_conducted: self.events_conducted,
            funds_utilized: self.funds_utilized,
        }
    }

    /// Replaces all three metrics.
    pub fn replace_metrics(&mut self, metrics: ReportMetrics, at: DateTime<Utc>) {
        self.people_helped = metrics.people_helped;
        self.events_conducted = metrics.events_conducted;
        self.funds_utilized = metrics.funds_utilized;
        self.updated_at = at;
    }
}

/// Which reports a read covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "month")]
pub enum ReportScope {
    /// Reports for a single month.
    Month(Month),
    /// Every report ever submitted.
    AllTime,
}

impl ReportScope {
    /// Returns true if a report for `month` falls inside this scope.
    #[must_use]
    pub fn includes(&self, month: &Month) -> bool {
        match self {
            Self::Month(scoped) => scoped == month,
            Self::AllTime => true,
        }
    }
}

/// Whether a submission created a report or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// First submission for the key.
    Created,
    /// Later submission; metrics were replaced.
    Updated,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// The report as stored after the write.
    pub report: Report,
    /// Created or updated.
    pub status: SubmissionStatus,
}
