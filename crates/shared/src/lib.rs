//! Shared configuration and error types for the impact reporting service.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, RunMode};
pub use error::AppError;
