//! Dashboard data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::reports::ReportScope;

/// Totals across every report in scope.
///
/// The all-zero value is returned when nothing is in scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Distinct organizations that reported.
    pub total_ngos: usize,
    /// Sum of people helped.
    pub total_people_helped: i64,
    /// Sum of events conducted.
    pub total_events_conducted: i64,
    /// Sum of funds utilized.
    pub total_funds_utilized: Decimal,
}

/// Totals for one organization within the scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgoBreakdownEntry {
    /// Organization identifier.
    pub organization_id: String,
    /// People helped.
    pub people_helped: i64,
    /// Events conducted.
    pub events_conducted: i64,
    /// Funds utilized.
    pub funds_utilized: Decimal,
}

/// Summary plus per-organization breakdown, computed from one read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// What the dashboard covers.
    pub scope: ReportScope,
    /// Totals.
    pub summary: DashboardSummary,
    /// One entry per organization, ordered by organization identifier.
    pub breakdown: Vec<NgoBreakdownEntry>,
}
