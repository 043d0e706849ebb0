//! Numbers command implementation
//!
//! Prints the before/after comparison table.

use tracing::info;

use pitch_core::format::{format_currency, format_percentage};
use pitch_core::types::Currency;
use pitch_engine::comparison::{comparison_table, ComparisonRow, Trend, ValueKind};
use pitch_engine::ScenarioStore;

use crate::config::DeckConfig;
use crate::output::{to_csv, to_json, OutputFormat, Table};
use crate::scenario::{self, ScenarioArgs};
use crate::Result;

fn show(value: f64, kind: ValueKind, currency: Currency) -> String {
    match kind {
        ValueKind::Currency => format_currency(value, currency),
        ValueKind::Percentage => format_percentage(value),
    }
}

fn trend_marker(row: &ComparisonRow) -> &'static str {
    match row.trend() {
        Trend::Favourable => "better",
        Trend::Unfavourable => "worse",
        Trend::Unchanged => "-",
    }
}

/// Renders the comparison table for the store's current scenario.
pub fn render(store: &ScenarioStore, format: OutputFormat) -> Result<String> {
    let currency = store.state().currency;
    let rows = comparison_table(store.metrics());

    match format {
        OutputFormat::Json => to_json(&rows),
        OutputFormat::Csv => to_csv(&rows),
        OutputFormat::Table => {
            let mut table = Table::new(["Category", "Before", "After", "Difference", "Change", "Trend"])
                .right_align_from(1);
            for row in &rows {
                let change = row
                    .percent_change
                    .map(format_percentage)
                    .unwrap_or_else(|| "n/a".to_string());
                table.push([
                    row.category.to_string(),
                    show(row.before, row.kind, currency),
                    show(row.after, row.kind, currency),
                    show(row.difference, row.kind, currency),
                    change,
                    trend_marker(row).to_string(),
                ]);
            }
            Ok(table.render())
        }
    }
}

/// Run the numbers command
pub fn run(config: &DeckConfig, args: &ScenarioArgs, format: Option<&str>) -> Result<()> {
    let format = OutputFormat::resolve(format, config.output_format())?;
    info!("Building comparison table...");

    let store = scenario::load(args, config)?;
    super::emit(&render(&store, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitch_core::types::{ScenarioCommand, ScenarioField};

    #[test]
    fn test_table_rows() {
        let out = render(&ScenarioStore::new(), OutputFormat::Table).unwrap();
        assert!(out.contains("│ Revenue Total "));
        assert!(out.contains("A$27,880,000"));
        assert!(out.contains("A$-3,600,000"));
        assert!(out.contains("-100.0%"));
        assert!(out.contains("better"));
    }

    #[test]
    fn test_zero_baseline_row_shows_not_applicable() {
        let mut store = ScenarioStore::new();
        store.dispatch_all([
            ScenarioCommand::set_field(ScenarioField::AssistantPerAgent, 0.0),
            ScenarioCommand::set_field(ScenarioField::MarketingPerAgent, 0.0),
        ]);
        let out = render(&store, OutputFormat::Table).unwrap();
        let human = out.lines().find(|l| l.contains("Human Costs")).unwrap();
        assert!(human.contains("n/a"));
        assert!(human.trim_end().ends_with("- │"));
    }

    #[test]
    fn test_csv_header_and_rows() {
        let out = render(&ScenarioStore::new(), OutputFormat::Csv).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "category,before,after,difference,percent_change,kind,preference"
        );
        assert_eq!(lines.count(), 7);
    }

    #[test]
    fn test_json_rows() {
        let out = render(&ScenarioStore::new(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[6]["category"], "Profit Margin %");
        assert_eq!(rows[6]["kind"], "percentage");
        assert_eq!(rows[1]["preference"], "lower_is_better");
    }
}
