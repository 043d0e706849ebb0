//! Metrics command implementation
//!
//! Prints the full before/after metrics record for a scenario.

use serde::Serialize;
use tracing::info;

use pitch_core::format::{explain_repetitive_tasks, format_currency, format_number, format_percentage};
use pitch_core::types::Currency;
use pitch_engine::{CalculatedMetrics, ScenarioStore};

use crate::config::DeckConfig;
use crate::output::{to_csv, to_json, OutputFormat, Table};
use crate::scenario::{self, ScenarioArgs};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Count,
    Money,
    Percent,
}

/// One named figure, as written to CSV.
#[derive(Debug, Clone, Serialize)]
struct MetricRow {
    metric: &'static str,
    value: f64,
}

#[derive(Serialize)]
struct MetricsReport<'a> {
    currency: Currency,
    metrics: &'a CalculatedMetrics,
    profit_delta: f64,
    profit_delta_percent: Option<f64>,
}

fn figures(m: &CalculatedMetrics) -> Vec<(&'static str, &'static str, f64, Unit)> {
    use Unit::{Count, Money, Percent};
    vec![
        ("top_agents", "Top agents", m.top_agents as f64, Count),
        ("low_agents", "Low agents", m.low_agents as f64, Count),
        ("revenue_top_before", "Top revenue (before)", m.revenue_top_before, Money),
        ("revenue_low_before", "Low revenue (before)", m.revenue_low_before, Money),
        ("revenue_total_before", "Total revenue (before)", m.revenue_total_before, Money),
        ("revenue_top_after", "Top revenue (after)", m.revenue_top_after, Money),
        ("revenue_low_after", "Low revenue (after)", m.revenue_low_after, Money),
        ("revenue_total_after", "Total revenue (after)", m.revenue_total_after, Money),
        ("software_cost_before", "Software & services (before)", m.software_cost_before, Money),
        ("software_cost_after", "Software & services (after)", m.software_cost_after, Money),
        ("repetitive_cost_before", "Repetitive tasks (before)", m.repetitive_cost_before, Money),
        ("repetitive_cost_after", "Repetitive tasks (after)", m.repetitive_cost_after, Money),
        ("human_cost_before", "Human costs (before)", m.human_cost_before, Money),
        ("human_cost_after", "Human costs (after)", m.human_cost_after, Money),
        ("total_cost_before", "Total costs (before)", m.total_cost_before, Money),
        ("total_cost_after", "Total costs (after)", m.total_cost_after, Money),
        ("profit_before", "Profit (before)", m.profit_before, Money),
        ("profit_after", "Profit (after)", m.profit_after, Money),
        ("profit_margin_before", "Profit margin (before)", m.profit_margin_before, Percent),
        ("profit_margin_after", "Profit margin (after)", m.profit_margin_after, Percent),
        ("cost_savings", "Cost savings", m.cost_savings, Money),
        ("revenue_increase", "Revenue increase", m.revenue_increase, Money),
        ("total_benefit", "Total benefit", m.total_benefit, Money),
        ("tam", "TAM", m.tam, Money),
        ("sam", "SAM", m.sam, Money),
        ("som", "SOM", m.som, Money),
        ("arr", "ARR", m.arr, Money),
        ("valuation", "Valuation", m.valuation, Money),
    ]
}

/// Renders the metrics for the store's current scenario.
pub fn render(store: &ScenarioStore, format: OutputFormat) -> Result<String> {
    let state = store.state();
    let metrics = store.metrics();

    match format {
        OutputFormat::Json => to_json(&MetricsReport {
            currency: state.currency,
            metrics,
            profit_delta: metrics.profit_delta(),
            profit_delta_percent: metrics.profit_delta_percent(),
        }),
        OutputFormat::Csv => to_csv(
            figures(metrics)
                .into_iter()
                .map(|(metric, _, value, _)| MetricRow { metric, value }),
        ),
        OutputFormat::Table => {
            let mut table = Table::new(["Metric", "Value"]).right_align_from(1);
            for (_, label, value, unit) in figures(metrics) {
                let shown = match unit {
                    Unit::Count => format_number(value),
                    Unit::Money => format_currency(value, state.currency),
                    Unit::Percent => format_percentage(value),
                };
                table.push([label.to_string(), shown]);
            }
            let change = metrics
                .profit_delta_percent()
                .map(format_percentage)
                .unwrap_or_else(|| "n/a".to_string());
            Ok(format!(
                "{}Profit change: {} ({})\n{}\n",
                table,
                format_currency(metrics.profit_delta(), state.currency),
                change,
                explain_repetitive_tasks(state)
            ))
        }
    }
}

/// Run the metrics command
pub fn run(config: &DeckConfig, args: &ScenarioArgs, format: Option<&str>) -> Result<()> {
    let format = OutputFormat::resolve(format, config.output_format())?;
    info!("Computing scenario metrics...");

    let store = scenario::load(args, config)?;
    super::emit(&render(&store, format)?);

    info!("Metrics complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shows_default_figures() {
        let out = render(&ScenarioStore::new(), OutputFormat::Table).unwrap();
        assert!(out.contains("Total revenue (before)"));
        assert!(out.contains("A$27,880,000"));
        assert!(out.contains("A$35,513,000"));
        assert!(out.contains("Profit change: A$18,179,000 (149.8%)"));
        assert!(out.contains("Each agent spends 20 hrs/week"));
    }

    #[test]
    fn test_json_contains_metrics_record() {
        let out = render(&ScenarioStore::new(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["currency"], "AUD");
        assert_eq!(parsed["metrics"]["top_agents"], 10);
        assert_eq!(parsed["metrics"]["revenue_total_before"], 27_880_000.0);
        assert!(parsed["profit_delta_percent"].as_f64().unwrap() > 100.0);
    }

    #[test]
    fn test_csv_has_one_row_per_figure() {
        let out = render(&ScenarioStore::new(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "metric,value");
        assert_eq!(lines.len(), 1 + 28);
        assert!(lines.contains(&"revenue_total_before,27880000.0"));
    }

    #[test]
    fn test_zero_baseline_profit_change_is_not_applicable() {
        let mut store = ScenarioStore::new();
        store.dispatch(pitch_core::types::ScenarioCommand::set_field(
            pitch_core::types::ScenarioField::CommissionRate,
            0.0,
        ));
        let out = render(&store, OutputFormat::Table).unwrap();
        assert!(out.contains("(n/a)"));
        assert!(!out.contains("NaN"));
    }
}
