//! CLI configuration management.
//!
//! Loads `pitchdeck.toml` (or the file given with `--config`) with
//! `PITCHDECK_*` environment variable overrides. Every key is optional.

use pitch_core::types::Currency;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::output::{OutputFormat, VALID_FORMATS};

/// Investment figure used by the allocation view when none is configured.
pub const DEFAULT_INVESTMENT_AMOUNT: f64 = 1_500_000.0;

/// pitchdeck configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DeckConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default output format (table, json, csv)
    #[serde(default = "default_format")]
    pub format: String,

    /// Display currency override applied to every scenario
    pub currency: Option<String>,

    /// Scenario file used when `--scenario` is not given
    pub scenario: Option<PathBuf>,

    /// Capital raise split across the allocation buckets
    #[serde(default = "default_investment_amount")]
    pub investment_amount: f64,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "table".to_string()
}

fn default_investment_amount() -> f64 {
    DEFAULT_INVESTMENT_AMOUNT
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: default_format(),
            currency: None,
            scenario: None,
            investment_amount: default_investment_amount(),
        }
    }
}

impl DeckConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path` if it exists, defaults otherwise.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(log_level) = std::env::var("PITCHDECK_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(format) = std::env::var("PITCHDECK_FORMAT") {
            self.format = format;
        }

        if let Ok(currency) = std::env::var("PITCHDECK_CURRENCY") {
            self.currency = Some(currency);
        }

        if let Ok(scenario) = std::env::var("PITCHDECK_SCENARIO") {
            self.scenario = Some(PathBuf::from(scenario));
        }

        if let Ok(amount) = std::env::var("PITCHDECK_INVESTMENT") {
            if let Ok(amount) = amount.trim().parse() {
                self.investment_amount = amount;
            }
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.format.parse::<OutputFormat>().is_err() {
            errors.push(format!(
                "Invalid format '{}'. Valid values: {:?}",
                self.format, VALID_FORMATS
            ));
        }

        if let Some(currency) = &self.currency {
            if let Err(e) = currency.parse::<Currency>() {
                errors.push(format!("Invalid currency: {}", e));
            }
        }

        if !self.investment_amount.is_finite() || self.investment_amount <= 0.0 {
            errors.push(format!(
                "investment_amount must be a positive number, got {}",
                self.investment_amount
            ));
        }

        if let Some(scenario) = &self.scenario {
            if scenario.as_os_str().is_empty() {
                errors.push("scenario path cannot be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Configured output format, falling back to the table view.
    pub fn output_format(&self) -> OutputFormat {
        self.format.parse().unwrap_or_default()
    }

    /// Configured currency override, if any and valid.
    pub fn currency(&self) -> Option<Currency> {
        self.currency.as_deref().and_then(|c| c.parse().ok())
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
