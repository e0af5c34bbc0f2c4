//! Rolling reports up into a summary and a per-organization breakdown.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::error::DashboardError;
use super::types::{DashboardSummary, NgoBreakdownEntry};
use crate::reports::Report;

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    people_helped: i64,
    events_conducted: i64,
    funds_utilized: Decimal,
}

impl Totals {
    fn add(
        &mut self,
        people_helped: i64,
        events_conducted: i64,
        funds_utilized: Decimal,
    ) -> Result<(), DashboardError> {
        self.people_helped = self
            .people_helped
            .checked_add(people_helped)
            .ok_or(DashboardError::Overflow {
                metric: "peopleHelped",
            })?;
        self.events_conducted = self
            .events_conducted
            .checked_add(events_conducted)
            .ok_or(DashboardError::Overflow {
                metric: "eventsConducted",
            })?;
        self.funds_utilized = self
            .funds_utilized
            .checked_add(funds_utilized)
            .ok_or(DashboardError::Overflow {
                metric: "fundsUtilized",
            })?;
        Ok(())
    }
}

/// Aggregates reports into a summary and a breakdown.
///
/// Reports are grouped by organization identifier. `total_ngos` counts
/// distinct organizations, which for a single month equals the report count.
/// The breakdown is ordered by organization identifier.
///
/// # Errors
///
/// Returns an error if any total overflows.
pub fn aggregate(
    reports: &[Report],
) -> Result<(DashboardSummary, Vec<NgoBreakdownEntry>), DashboardError> {
    let mut by_org: BTreeMap<&str, Totals> = BTreeMap::new();
    for report in reports {
        by_org.entry(report.organization_id.as_str()).or_default().add(
            report.people_helped,
            report.events_conducted,
            report.funds_utilized,
        )?;
    }

    let mut overall = Totals::default();
    let mut breakdown = Vec::with_capacity(by_org.len());
    for (organization_id, totals) in &by_org {
        overall.add(
            totals.people_helped,
            totals.events_conducted,
            totals.funds_utilized,
        )?;
        breakdown.push(NgoBreakdownEntry {
            organization_id: (*organization_id).to_string(),
            people_helped: totals.people_helped,
            events_conducted: totals.events_conducted,
            funds_utilized: totals.funds_utilized,
        });
    }

    let summary = DashboardSummary {
        total_ngos: by_org.len(),
        total_people_helped: overall.people_helped,
        total_events_conducted: overall.events_conducted,
        total_funds_utilized: overall.funds_utilized,
    };

    Ok((summary, breakdown))
}
