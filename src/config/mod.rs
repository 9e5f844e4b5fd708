//! Configuration management for the glicko-ladder runner
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, OutputFormat, OutputSettings, ServiceSettings};
pub use rating::RatingConfig;
