//! Dashboard aggregation.
//!
//! This module rolls reports up into dashboard views:
//! - Summary totals for one month or for all time
//! - Per-organization breakdown

pub mod aggregate;
pub mod error;
pub mod service;
pub mod types;


pub use aggregate::aggregate;
pub use error::DashboardError;
pub use service::DashboardService;
pub use types::*;
