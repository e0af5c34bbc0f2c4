//! Demo data seeder for local development.
//!
//! Submits reports for three organizations over two months through the
//! regular ingestion path, so re-running it updates instead of duplicating.
//! Run the migrator first.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::{Context, ensure};
use serde_json::json;
use tracing::info;

use impact_core::reports::{IngestionService, ReportSubmission};
use impact_db::{ReportRepository, connect};
use impact_shared::AppConfig;

/// `(ngoId, month, peopleHelped, eventsConducted, fundsUtilized)`
const DEMO_REPORTS: [(&str, &str, i64, i64, &str); 6] = [
    ("ngo-hope-foundation", "2024-01", 120, 4, "15000.00"),
    ("ngo-hope-foundation", "2024-02", 95, 3, "11250.50"),
    ("ngo-clean-water", "2024-01", 340, 6, "22400.00"),
    ("ngo-clean-water", "2024-02", 410, 7, "25980.75"),
    ("ngo-literacy-first", "2024-01", 60, 2, "4800.00"),
    ("ngo-literacy-first", "2024-02", 75, 3, "5125.25"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "impact=info,seeder=info".into()),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    ensure!(
        !config.database.is_in_memory(),
        "Seeding needs a PostgreSQL database URL, got {}",
        config.database.url
    );

    info!("Connecting to database...");
    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    let ingestion = IngestionService::new(Arc::new(ReportRepository::new(db)));

    for (ngo_id, month, people, events, funds) in DEMO_REPORTS {
        let submission: ReportSubmission = serde_json::from_value(json!({
            "ngoId": ngo_id,
            "month": month,
            "peopleHelped": people,
            "eventsConducted": events,
            "fundsUtilized": funds,
        }))?;

        let outcome = ingestion
            .submit(&submission)
            .await
            .with_context(|| format!("Failed to seed report for {ngo_id} {month}"))?;
        info!(
            organization_id = ngo_id,
            month,
            status = ?outcome.status,
            "Seeded report"
        );
    }

    info!(reports = DEMO_REPORTS.len(), "Seeding complete");
    Ok(())
}
