//! Scenario input: a TOML file plus `--set` overrides.
//!
//! This is the clamping layer that sits in front of the engine. Values
//! given with `--set` are parsed and clamped to the field's input bounds;
//! allocation edits are routed through the normaliser by the store.
//! Values read from a scenario file are taken as written, with a warning
//! for anything outside its bounds.

use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use pitch_core::types::{
    AllocationBucket, Currency, ScenarioCommand, ScenarioError, ScenarioField, ScenarioState,
};
use pitch_engine::ScenarioStore;

use crate::config::DeckConfig;
use crate::{CliError, Result};

/// Scenario selection shared by every calculating command.
#[derive(Args, Debug, Clone, Default)]
pub struct ScenarioArgs {
    /// Scenario TOML file; missing fields keep their defaults
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Override a field or allocation bucket, e.g. `--set agents=350` or
    /// `--set allocation_team=45` (repeatable, applied in order)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub overrides: Vec<String>,

    /// Display currency (AUD, NZD, USD)
    #[arg(long)]
    pub currency: Option<String>,
}

/// Parses one `FIELD=VALUE` assignment into a command.
///
/// Scenario fields are tried first, then allocation buckets.
pub fn parse_assignment(text: &str) -> std::result::Result<ScenarioCommand, ScenarioError> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| ScenarioError::parse(format!("expected FIELD=VALUE, got '{}'", text)))?;
    let (name, value) = (name.trim(), value.trim());

    if let Ok(field) = name.parse::<ScenarioField>() {
        return Ok(ScenarioCommand::set_field(field, field.parse_value(value)?));
    }

    match name.parse::<AllocationBucket>() {
        Ok(bucket) => {
            let share: f64 = value
                .trim_end_matches('%')
                .parse()
                .map_err(|_| ScenarioError::invalid_value(bucket.key(), value))?;
            if !share.is_finite() {
                return Err(ScenarioError::invalid_value(bucket.key(), value));
            }
            Ok(ScenarioCommand::set_allocation(bucket, share))
        }
        Err(_) => Err(ScenarioError::UnknownField(name.to_string())),
    }
}

/// Reads a scenario file.
pub fn read_scenario_file(path: &Path) -> Result<ScenarioState> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Logs a warning for every value outside its input bounds.
///
/// Returns the number of problems found.
pub fn warn_out_of_bounds(state: &ScenarioState) -> usize {
    let mut problems = 0;
    for field in ScenarioField::ALL {
        let value = state.get(field);
        if !field.bounds().contains(value) {
            warn!(field = field.key(), value, "Scenario value outside input bounds");
            problems += 1;
        }
    }
    if !state.allocation.is_balanced() {
        warn!(
            total = state.allocation.total(),
            "Scenario allocation does not sum to 100%"
        );
        problems += 1;
    }
    problems
}

/// Builds the store for a command: file (or configured file), currency,
/// then each `--set` override in order.
pub fn load(args: &ScenarioArgs, config: &DeckConfig) -> Result<ScenarioStore> {
    let path = args.scenario.as_ref().or(config.scenario.as_ref());
    let state = match path {
        Some(path) => {
            info!("Loading scenario from {}", path.display());
            let state = read_scenario_file(path)?;
            warn_out_of_bounds(&state);
            state
        }
        None => ScenarioState::default(),
    };

    let mut commands = Vec::with_capacity(args.overrides.len() + 1);

    let currency = match args.currency.as_deref() {
        Some(code) => Some(code.parse::<Currency>().map_err(ScenarioError::from)?),
        None => config.currency(),
    };
    if let Some(currency) = currency {
        commands.push(ScenarioCommand::SetCurrency { currency });
    }

    for assignment in &args.overrides {
        commands.push(parse_assignment(assignment)?);
    }

    let mut store = ScenarioStore::with_state(state);
    store.dispatch_all(commands);
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_field_assignment() {
        assert_eq!(
            parse_assignment("agents=350").unwrap(),
            ScenarioCommand::set_field(ScenarioField::NumberOfAgents, 350.0)
        );
        assert_eq!(
            parse_assignment("avgPropertyValue = A$900,000").unwrap(),
            ScenarioCommand::set_field(ScenarioField::AvgPropertyValue, 900_000.0)
        );
    }

    #[test]
    fn test_parse_field_assignment_is_clamped() {
        assert_eq!(
            parse_assignment("commission_rate=250").unwrap(),
            ScenarioCommand::set_field(ScenarioField::CommissionRate, 100.0)
        );
        assert_eq!(
            parse_assignment("number_of_agents=0").unwrap(),
            ScenarioCommand::set_field(ScenarioField::NumberOfAgents, 1.0)
        );
    }

    #[test]
    fn test_parse_bucket_assignment() {
        assert_eq!(
            parse_assignment("allocation_team=45").unwrap(),
            ScenarioCommand::set_allocation(AllocationBucket::Team, 45.0)
        );
        assert_eq!(
            parse_assignment("allocationRnD=25%").unwrap(),
            ScenarioCommand::set_allocation(AllocationBucket::RnD, 25.0)
        );
    }

    #[test]
    fn test_parse_assignment_errors() {
        assert!(matches!(
            parse_assignment("agents"),
            Err(ScenarioError::Parse(_))
        ));
        assert!(matches!(
            parse_assignment("velocity=3"),
            Err(ScenarioError::UnknownField(_))
        ));
        assert!(matches!(
            parse_assignment("agents=lots"),
            Err(ScenarioError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_assignment("team=NaN"),
            Err(ScenarioError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_defaults() {
        let store = load(&ScenarioArgs::default(), &DeckConfig::default()).unwrap();
        assert_eq!(store.state(), &ScenarioState::default());
    }

    #[test]
    fn test_load_applies_overrides_in_order() {
        let args = ScenarioArgs {
            overrides: vec![
                "agents=100".to_string(),
                "team=50".to_string(),
                "agents=300".to_string(),
            ],
            currency: Some("usd".to_string()),
            ..ScenarioArgs::default()
        };
        let store = load(&args, &DeckConfig::default()).unwrap();
        assert_eq!(store.state().number_of_agents, 300);
        assert_eq!(store.state().currency, Currency::USD);
        assert_eq!(store.state().allocation.team, 50.0);
        assert!(store.state().allocation.is_balanced());
        assert_eq!(store.metrics().top_agents + store.metrics().low_agents, 300);
    }

    #[test]
    fn test_load_uses_config_currency() {
        let config = DeckConfig {
            currency: Some("NZD".to_string()),
            ..DeckConfig::default()
        };
        let store = load(&ScenarioArgs::default(), &config).unwrap();
        assert_eq!(store.state().currency, Currency::NZD);
    }

    #[test]
    fn test_load_rejects_unknown_currency() {
        let args = ScenarioArgs {
            currency: Some("EUR".to_string()),
            ..ScenarioArgs::default()
        };
        let err = load(&args, &DeckConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Scenario(ScenarioError::Currency(_))));
    }

    #[test]
    fn test_load_scenario_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "number_of_agents = 50\ncurrency = \"NZD\"\n\n[allocation]\nteam = 60.0\nrnd = 10.0\npartnerships = 5.0\ninfrastructure = 5.0\ncompliance = 5.0\nsales = 10.0\nbuffer = 5.0"
        )
        .unwrap();

        let args = ScenarioArgs {
            scenario: Some(file.path().to_path_buf()),
            ..ScenarioArgs::default()
        };
        let store = load(&args, &DeckConfig::default()).unwrap();
        assert_eq!(store.state().number_of_agents, 50);
        assert_eq!(store.state().currency, Currency::NZD);
        assert_eq!(store.state().allocation.team, 60.0);
        assert_eq!(store.state().commission_rate, 4.0);
    }

    #[test]
    fn test_load_missing_file() {
        let args = ScenarioArgs {
            scenario: Some(PathBuf::from("/nonexistent/scenario.toml")),
            ..ScenarioArgs::default()
        };
        let err = load(&args, &DeckConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_warn_out_of_bounds_counts_problems() {
        assert_eq!(warn_out_of_bounds(&ScenarioState::default()), 0);

        let mut state = ScenarioState::default().with(ScenarioField::SamPercent, 120.0);
        state.allocation.team = 90.0;
        assert_eq!(warn_out_of_bounds(&state), 2);
    }
}
