//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! glicko-ladder runner, including environment variable and TOML file loading
//! and validation.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use super::rating::RatingConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub output: OutputSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// How leaderboards are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Invalid output format: {}", value)),
        }
    }
}

/// Output and period processing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Print the leaderboard before the first period
    pub show_initial: bool,
    /// Update players of a period in parallel
    pub parallel_updates: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "glicko-ladder".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_initial: true,
            parallel_updates: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file; environment variables still override it
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating defaults
        if let Ok(rating) = env::var("DEFAULT_RATING") {
            self.rating.default_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_RATING value: {}", rating))?;
        }
        if let Ok(deviation) = env::var("DEFAULT_DEVIATION") {
            self.rating.default_deviation = deviation
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_DEVIATION value: {}", deviation))?;
        }
        if let Ok(volatility) = env::var("DEFAULT_VOLATILITY") {
            self.rating.default_volatility = volatility
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_VOLATILITY value: {}", volatility))?;
        }

        // Output settings
        if let Ok(format) = env::var("OUTPUT_FORMAT") {
            self.output.format = format.parse()?;
        }
        if let Ok(show_initial) = env::var("SHOW_INITIAL") {
            self.output.show_initial = show_initial
                .parse()
                .map_err(|_| anyhow!("Invalid SHOW_INITIAL value: {}", show_initial))?;
        }
        if let Ok(parallel) = env::var("PARALLEL_UPDATES") {
            self.output.parallel_updates = parallel
                .parse()
                .map_err(|_| anyhow!("Invalid PARALLEL_UPDATES value: {}", parallel))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config
        .rating
        .validate()
        .map_err(|e| anyhow!("Invalid rating defaults: {}", e))?;

    Ok(())
}
