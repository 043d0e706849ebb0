//! Valuation command implementation
//!
//! Prints market sizing for the chosen region scope, the current ARR and
//! valuation, and the valuation curve across a range of client counts.

use serde::Serialize;
use tracing::info;

use pitch_core::format::{format_currency, format_number};
use pitch_core::types::{Currency, Region, RegionScope};
use pitch_engine::valuation::{market_size_for, valuation_curve, MarketSize, ValuationPoint};
use pitch_engine::ScenarioStore;

use crate::config::DeckConfig;
use crate::output::{to_csv, to_json, OutputFormat, Table};
use crate::scenario::{self, ScenarioArgs};
use crate::Result;

/// Client range for the valuation curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveRange {
    /// First client count
    pub base: u64,
    /// Last client count (inclusive)
    pub max: u64,
    /// Increment between points
    pub step: u64,
}

impl Default for CurveRange {
    fn default() -> Self {
        Self {
            base: 100,
            max: 1_000,
            step: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct RegionRow {
    region: Region,
    name: &'static str,
    agents: u64,
    tam: f64,
}

#[derive(Serialize)]
struct ValuationReport {
    currency: Currency,
    market: MarketSize,
    regions: Vec<RegionRow>,
    paying_clients: f64,
    arr: f64,
    arr_multiple: f64,
    valuation: f64,
    curve: Vec<ValuationPoint>,
}

fn report(store: &ScenarioStore, scope: RegionScope, range: CurveRange) -> Result<ValuationReport> {
    let state = store.state();
    let metrics = store.metrics();
    let price = state.annual_price_per_client;

    let regions = scope
        .regions()
        .iter()
        .map(|region| RegionRow {
            region: *region,
            name: region.name(),
            agents: region.agent_count(),
            tam: region.agent_count() as f64 * price,
        })
        .collect();

    Ok(ValuationReport {
        currency: state.currency,
        market: market_size_for(state, scope),
        regions,
        paying_clients: state.paying_clients,
        arr: metrics.arr,
        arr_multiple: state.arr_multiple,
        valuation: metrics.valuation,
        curve: valuation_curve(range.base, range.max, range.step, price, state.arr_multiple)?,
    })
}

/// Renders the valuation view.
pub fn render(
    store: &ScenarioStore,
    scope: RegionScope,
    range: CurveRange,
    format: OutputFormat,
) -> Result<String> {
    let report = report(store, scope, range)?;
    let currency = report.currency;

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Csv => to_csv(&report.curve),
        OutputFormat::Table => {
            let mut regions = Table::new(["Region", "Agents", "TAM"]).right_align_from(1);
            for row in &report.regions {
                regions.push([
                    row.name.to_string(),
                    format_number(row.agents as f64),
                    format_currency(row.tam, currency),
                ]);
            }

            let mut market = Table::new(["Market", "Value"]).right_align_from(1);
            market.push(["TAM".to_string(), format_currency(report.market.tam, currency)]);
            market.push(["SAM".to_string(), format_currency(report.market.sam, currency)]);
            market.push(["SOM".to_string(), format_currency(report.market.som, currency)]);

            let mut curve = Table::new(["Clients", "ARR", "Valuation"]).right_align_from(1);
            for point in &report.curve {
                curve.push([
                    format_number(point.clients as f64),
                    format_currency(point.arr, currency),
                    format_currency(point.valuation, currency),
                ]);
            }

            Ok(format!(
                "{} market\n{}{}ARR: {} ({} clients); valuation at {}x: {}\n{}",
                scope,
                regions,
                market,
                format_currency(report.arr, currency),
                format_number(report.paying_clients),
                report.arr_multiple,
                format_currency(report.valuation, currency),
                curve
            ))
        }
    }
}

/// Run the valuation command
pub fn run(
    config: &DeckConfig,
    args: &ScenarioArgs,
    region: &str,
    range: CurveRange,
    format: Option<&str>,
) -> Result<()> {
    let format = OutputFormat::resolve(format, config.output_format())?;
    let scope: RegionScope = region.parse()?;
    info!("Sizing {} market...", scope);

    let store = scenario::load(args, config)?;
    super::emit(&render(&store, scope, range, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use pitch_engine::EngineError;

    #[test]
    fn test_global_table() {
        let out = render(
            &ScenarioStore::new(),
            RegionScope::Global,
            CurveRange::default(),
            OutputFormat::Table,
        )
        .unwrap();
        assert!(out.starts_with("Global market"));
        assert!(out.contains("1,500,000"));
        assert!(out.contains("A$9,214,755,000"));
        assert!(out.contains("ARR: A$1,000,000 (200 clients); valuation at 15x: A$15,000,000"));
        assert!(out.contains("A$75,000,000"));
    }

    #[test]
    fn test_anz_json() {
        let out = render(
            &ScenarioStore::new(),
            RegionScope::Anz,
            CurveRange::default(),
            OutputFormat::Json,
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["market"]["scope"], "anz");
        assert_eq!(parsed["market"]["agents"], 158_051);
        assert_eq!(parsed["regions"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["curve"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_curve_csv() {
        let range = CurveRange {
            base: 0,
            max: 200,
            step: 100,
        };
        let out = render(&ScenarioStore::new(), RegionScope::Global, range, OutputFormat::Csv)
            .unwrap();
        assert_eq!(
            out,
            "clients,arr,valuation\n0,0.0,0.0\n100,500000.0,7500000.0\n200,1000000.0,15000000.0\n"
        );
    }

    #[test]
    fn test_invalid_range_is_reported() {
        let range = CurveRange {
            base: 500,
            max: 100,
            step: 100,
        };
        let err = render(&ScenarioStore::new(), RegionScope::Global, range, OutputFormat::Table)
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Engine(EngineError::InvalidRange { base: 500, max: 100 })
        ));
    }

    #[test]
    fn test_oversized_curve_is_reported() {
        let range = CurveRange {
            base: 0,
            max: u64::MAX,
            step: 1,
        };
        let err = render(&ScenarioStore::new(), RegionScope::Global, range, OutputFormat::Json)
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Engine(EngineError::TooManyPoints { .. })
        ));
    }

    #[test]
    fn test_unknown_region() {
        let err = run(
            &DeckConfig::default(),
            &ScenarioArgs::default(),
            "mars",
            CurveRange::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Scenario(_)));
    }
}
