//! Check command implementation
//!
//! Reports the effective configuration, validates it, and confirms the
//! configured scenario file loads.

use std::path::Path;
use tracing::info;

use pitch_core::format::format_number;
use pitch_core::types::ScenarioState;
use pitch_engine::compute_metrics;

use crate::config::{ConfigError, DeckConfig};
use crate::scenario::{read_scenario_file, warn_out_of_bounds};
use crate::{CliError, Result};

/// Builds the check report. Returns the report and the validation outcome.
pub fn render(
    config: &DeckConfig,
    config_path: &Path,
) -> (String, std::result::Result<(), ConfigError>) {
    let mut lines = vec![format!("pitchdeck v{}", env!("CARGO_PKG_VERSION"))];

    let source = if config_path.exists() {
        "loaded"
    } else {
        "not found, using defaults"
    };
    lines.push(format!("Config: {} ({})", config_path.display(), source));
    lines.push(format!("  log_level = {}", config.log_level));
    lines.push(format!("  format = {}", config.format));
    lines.push(format!(
        "  currency = {}",
        config.currency.as_deref().unwrap_or("(from scenario)")
    ));
    lines.push(format!(
        "  investment_amount = {}",
        format_number(config.investment_amount)
    ));

    let validation = config.validate();
    match &validation {
        Ok(()) => lines.push("Validation: OK".to_string()),
        Err(ConfigError::Validation(errors)) => {
            lines.push("Validation: FAILED".to_string());
            lines.extend(errors.iter().map(|e| format!("  - {}", e)));
        }
        Err(other) => lines.push(format!("Validation: FAILED ({})", other)),
    }

    match &config.scenario {
        Some(path) => match read_scenario_file(path) {
            Ok(state) => {
                let problems = warn_out_of_bounds(&state);
                lines.push(format!(
                    "Scenario: {} OK ({} value(s) outside input bounds)",
                    path.display(),
                    problems
                ));
            }
            Err(e) => lines.push(format!("Scenario: {} FAILED ({})", path.display(), e)),
        },
        None => lines.push("Scenario: defaults".to_string()),
    }

    let defaults = ScenarioState::default();
    let metrics = compute_metrics(&defaults);
    lines.push(format!(
        "Engine: OK (default profit {} -> {}, allocation {})",
        format_number(metrics.profit_before),
        format_number(metrics.profit_after),
        if defaults.allocation.is_balanced() {
            "balanced"
        } else {
            "unbalanced"
        }
    ));

    (lines.join("\n"), validation)
}

/// Run the check command
pub fn run(config: &DeckConfig, config_path: &Path) -> Result<()> {
    info!("Checking configuration...");
    let (report, validation) = render(config, config_path);
    super::emit(&report);
    validation.map_err(CliError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_report() {
        let dir = tempfile::tempdir().unwrap();
        let (report, validation) = render(&DeckConfig::default(), &dir.path().join("none.toml"));
        assert!(validation.is_ok());
        assert!(report.starts_with("pitchdeck v"));
        assert!(report.contains("not found, using defaults"));
        assert!(report.contains("Validation: OK"));
        assert!(report.contains("Scenario: defaults"));
        assert!(report.contains("default profit 12,132,000 -> 30,311,000, allocation balanced"));
    }

    #[test]
    fn test_invalid_config_lists_errors() {
        let config = DeckConfig {
            format: "yaml".to_string(),
            currency: Some("EUR".to_string()),
            ..DeckConfig::default()
        };
        let (report, validation) = render(&config, Path::new("pitchdeck.toml"));
        assert!(report.contains("Validation: FAILED"));
        assert!(report.contains("  - Invalid format 'yaml'"));
        assert!(matches!(validation, Err(ConfigError::Validation(ref e)) if e.len() == 2));
    }

    #[test]
    fn test_scenario_file_checked() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sam_percent = 140.0").unwrap();
        let config = DeckConfig {
            scenario: Some(file.path().to_path_buf()),
            ..DeckConfig::default()
        };
        let (report, _) = render(&config, Path::new("pitchdeck.toml"));
        assert!(report.contains("OK (1 value(s) outside input bounds)"));
    }

    #[test]
    fn test_missing_scenario_file_reported() {
        let config = DeckConfig {
            scenario: Some("/nonexistent/deck.toml".into()),
            ..DeckConfig::default()
        };
        let (report, validation) = render(&config, Path::new("pitchdeck.toml"));
        assert!(validation.is_ok());
        assert!(report.contains("FAILED (File not found"));
    }
}
