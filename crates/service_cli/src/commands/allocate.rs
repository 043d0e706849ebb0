//! Allocate command implementation
//!
//! Shows how the capital raise splits across the seven allocation buckets.
//! Bucket edits are passed with `--set`, e.g. `--set team=50`, and are
//! rebalanced by the normaliser before the view is built.

use serde::Serialize;
use tracing::{info, warn};

use pitch_core::format::{format_currency, format_percentage};
use pitch_core::types::{AllocationBucket, Currency};
use pitch_engine::ScenarioStore;

use crate::config::DeckConfig;
use crate::output::{to_csv, to_json, OutputFormat, Table};
use crate::scenario::{self, ScenarioArgs};
use crate::{CliError, Result};

/// One bucket of the allocation view.
#[derive(Debug, Clone, Serialize)]
struct BucketRow {
    bucket: AllocationBucket,
    label: &'static str,
    share: f64,
    amount: f64,
}

#[derive(Serialize)]
struct AllocationReport {
    currency: Currency,
    investment: f64,
    buckets: Vec<BucketRow>,
    total: f64,
    imbalance: f64,
    balanced: bool,
}

fn report(store: &ScenarioStore, investment: f64) -> AllocationReport {
    let allocation = &store.state().allocation;
    let buckets = allocation
        .amounts(investment)
        .into_iter()
        .map(|(bucket, amount)| BucketRow {
            bucket,
            label: bucket.label(),
            share: allocation.get(bucket),
            amount,
        })
        .collect();

    AllocationReport {
        currency: store.state().currency,
        investment,
        buckets,
        total: allocation.total(),
        imbalance: allocation.imbalance(),
        balanced: allocation.is_balanced(),
    }
}

/// Renders the allocation view for `investment`.
pub fn render(store: &ScenarioStore, investment: f64, format: OutputFormat) -> Result<String> {
    let report = report(store, investment);

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Csv => to_csv(&report.buckets),
        OutputFormat::Table => {
            let currency = report.currency;
            let mut table = Table::new(["Bucket", "Share", "Amount"]).right_align_from(1);
            for row in &report.buckets {
                table.push([
                    row.label.to_string(),
                    format_percentage(row.share),
                    format_currency(row.amount, currency),
                ]);
            }
            table.push([
                "Total".to_string(),
                format_percentage(report.total),
                format_currency(report.total / 100.0 * investment, currency),
            ]);

            let status = if report.balanced {
                "Allocation is balanced".to_string()
            } else if report.imbalance > 0.0 {
                format!("{} left to allocate", format_percentage(report.imbalance))
            } else {
                format!("Over-allocated by {}", format_percentage(-report.imbalance))
            };
            Ok(format!("{}{}\n", table, status))
        }
    }
}

/// Run the allocate command
pub fn run(
    config: &DeckConfig,
    args: &ScenarioArgs,
    investment: Option<f64>,
    format: Option<&str>,
) -> Result<()> {
    let format = OutputFormat::resolve(format, config.output_format())?;
    let investment = investment.unwrap_or(config.investment_amount);
    if !investment.is_finite() || investment <= 0.0 {
        return Err(CliError::invalid_argument(format!(
            "Investment must be a positive amount, got {}",
            investment
        )));
    }
    info!("Allocating {} across {} buckets", investment, AllocationBucket::ALL.len());

    let store = scenario::load(args, config)?;
    if !store.state().allocation.is_balanced() {
        warn!(
            total = store.state().allocation.total(),
            "Allocation does not sum to 100%"
        );
    }
    super::emit(&render(&store, investment, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitch_core::types::ScenarioCommand;

    #[test]
    fn test_default_table() {
        let out = render(&ScenarioStore::new(), 1_500_000.0, OutputFormat::Table).unwrap();
        assert!(out.contains("Team"));
        assert!(out.contains("A$600,000"));
        assert!(out.contains("Partnerships & Conferences"));
        assert!(out.contains("A$1,500,000"));
        assert!(out.trim_end().ends_with("Allocation is balanced"));
    }

    #[test]
    fn test_edit_rebalances_before_render() {
        let mut store = ScenarioStore::new();
        store.dispatch(ScenarioCommand::set_allocation(AllocationBucket::Team, 50.0));
        let out = render(&store, 1_000_000.0, OutputFormat::Csv).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next().unwrap(), "bucket,label,share,amount");
        assert_eq!(lines.next().unwrap(), "team,Team,50.0,500000.0");
        assert!(lines.next().unwrap().starts_with("rnd,R&D,16.66"));
    }

    #[test]
    fn test_unbalanced_status() {
        let mut state = pitch_core::types::ScenarioState::default();
        state.allocation.buffer = 0.0;
        let out = render(&ScenarioStore::with_state(state), 100.0, OutputFormat::Table).unwrap();
        assert!(out.trim_end().ends_with("5.0% left to allocate"));

        let mut state = pitch_core::types::ScenarioState::default();
        state.allocation.team = 50.0;
        let out = render(&ScenarioStore::with_state(state), 100.0, OutputFormat::Table).unwrap();
        assert!(out.trim_end().ends_with("Over-allocated by 10.0%"));
    }

    #[test]
    fn test_json_report() {
        let out = render(&ScenarioStore::new(), 2_000_000.0, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["balanced"], true);
        assert_eq!(parsed["buckets"].as_array().unwrap().len(), 7);
        assert_eq!(parsed["buckets"][5]["bucket"], "sales");
        assert_eq!(parsed["buckets"][5]["amount"], 300_000.0);
    }

    #[test]
    fn test_rejects_non_positive_investment() {
        let err = run(&DeckConfig::default(), &ScenarioArgs::default(), Some(0.0), None)
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
