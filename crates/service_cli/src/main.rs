//! pitchdeck - Command Line Scenario Calculator for the Listedit Pitch Deck
//!
//! This is the operational entry point for the scenario engine.
//!
//! # Commands
//!
//! - `pitchdeck metrics` - Full before/after metrics for a scenario
//! - `pitchdeck numbers` - Before/after comparison table
//! - `pitchdeck allocate` - Investment allocation across the seven buckets
//! - `pitchdeck valuation` - Market sizing and the valuation curve
//! - `pitchdeck recommend` - Recommendations, insights and quick wins
//! - `pitchdeck defaults` - Default scenario file or field catalogue
//! - `pitchdeck check` - Configuration and scenario file check
//!
//! Every calculating command accepts `--scenario <file>`, repeated
//! `--set FIELD=VALUE` overrides and `--currency`.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate drives `pitch_engine`
//! through its scenario store and renders the results.

use clap::{Parser, Subcommand};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;
mod scenario;

pub use error::{CliError, Result};

use commands::defaults::ScenarioFormat;
use commands::valuation::CurveRange;
use config::DeckConfig;
use scenario::ScenarioArgs;

/// Listedit pitch deck scenario calculator
#[derive(Parser)]
#[command(name = "pitchdeck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "pitchdeck.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the full before/after metrics record
    Metrics {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Output format (json, csv, table)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Show the before/after comparison table
    Numbers {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Output format (json, csv, table)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Split the investment across the allocation buckets
    Allocate {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Investment amount (defaults to the configured amount)
        #[arg(short, long)]
        investment: Option<f64>,

        /// Output format (json, csv, table)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Size the market and project valuation against paying clients
    Valuation {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Region scope (global, anz)
        #[arg(short, long, default_value = "global")]
        region: String,

        /// First client count on the curve
        #[arg(long, default_value = "100")]
        base: u64,

        /// Last client count on the curve
        #[arg(long, default_value = "1000")]
        max: u64,

        /// Client increment between curve points
        #[arg(long, default_value = "100")]
        step: u64,

        /// Output format (json, csv, table)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// List recommendations and insights, optionally after quick wins
    Recommend {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Quick win to apply first (repeatable), e.g. raise-replace
        #[arg(short, long)]
        apply: Vec<String>,

        /// Output format (json, csv, table)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Print the default scenario or the field catalogue
    Defaults {
        /// Scenario encoding
        #[arg(short, long, value_enum, default_value_t = ScenarioFormat::Toml)]
        format: ScenarioFormat,

        /// List accepted fields with bounds instead
        #[arg(long)]
        fields: bool,
    },

    /// Check configuration and scenario file
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = Path::new(&cli.config);
    let config = DeckConfig::load_or_default(config_path)?.with_env_override();

    // Initialise tracing; RUST_LOG wins over the configured level
    let fallback = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Check = cli.command {
        return commands::check::run(&config, config_path);
    }
    config.validate()?;

    match cli.command {
        Commands::Metrics { scenario, format } => {
            commands::metrics::run(&config, &scenario, format.as_deref())
        }
        Commands::Numbers { scenario, format } => {
            commands::numbers::run(&config, &scenario, format.as_deref())
        }
        Commands::Allocate {
            scenario,
            investment,
            format,
        } => commands::allocate::run(&config, &scenario, investment, format.as_deref()),
        Commands::Valuation {
            scenario,
            region,
            base,
            max,
            step,
            format,
        } => commands::valuation::run(
            &config,
            &scenario,
            &region,
            CurveRange { base, max, step },
            format.as_deref(),
        ),
        Commands::Recommend {
            scenario,
            apply,
            format,
        } => commands::recommend::run(&config, &scenario, &apply, format.as_deref()),
        Commands::Defaults { format, fields } => commands::defaults::run(format, fields),
        Commands::Check => commands::check::run(&config, config_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scenario_overrides() {
        let cli = Cli::parse_from([
            "pitchdeck",
            "metrics",
            "--set",
            "agents=300",
            "--set",
            "team=50",
            "--currency",
            "NZD",
            "-f",
            "json",
        ]);
        match cli.command {
            Commands::Metrics { scenario, format } => {
                assert_eq!(scenario.overrides, vec!["agents=300", "team=50"]);
                assert_eq!(scenario.currency.as_deref(), Some("NZD"));
                assert_eq!(format.as_deref(), Some("json"));
            }
            _ => panic!("Expected metrics command"),
        }
        assert_eq!(cli.config, "pitchdeck.toml");
    }

    #[test]
    fn test_parse_valuation_defaults() {
        let cli = Cli::parse_from(["pitchdeck", "-v", "valuation", "--region", "anz"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Valuation {
                region,
                base,
                max,
                step,
                ..
            } => {
                assert_eq!(region, "anz");
                assert_eq!(CurveRange { base, max, step }, CurveRange::default());
            }
            _ => panic!("Expected valuation command"),
        }
    }

    #[test]
    fn test_parse_defaults_format() {
        let cli = Cli::parse_from(["pitchdeck", "defaults", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Commands::Defaults {
                format: ScenarioFormat::Json,
                fields: false
            }
        ));
    }
}
