//! Core business logic for impact reporting.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached through the [`reports::ReportStore`] trait, which the db
//! crate implements for PostgreSQL and [`reports::InMemoryReportStore`]
//! implements in-process.
//!
//! # Modules
//!
//! - `reports` - Report validation, the store seam, and upsert-by-key ingestion
//! - `dashboard` - Month-scoped and all-time aggregation

pub mod dashboard;
pub mod reports;
