//! Recommend command implementation
//!
//! Evaluates the recommendation rules and insights for a scenario.
//! Quick wins given with `--apply` are dispatched first, so the output
//! reflects the tweaked scenario.

use serde::Serialize;
use tracing::info;

use pitch_engine::recommendations::{
    generate_insights, generate_recommendations, Category, Insight, Priority, QuickWin,
    Recommendation, RecommendationKind,
};
use pitch_engine::ScenarioStore;

use crate::config::DeckConfig;
use crate::output::{to_csv, to_json, OutputFormat, Table};
use crate::scenario::{self, ScenarioArgs};
use crate::{CliError, Result};

/// Flat recommendation record for CSV output.
#[derive(Debug, Clone, Serialize)]
struct RecommendationRow<'a> {
    id: &'a str,
    priority: Priority,
    kind: RecommendationKind,
    category: Category,
    title: &'a str,
    description: &'a str,
    action: Option<&'a str>,
}

impl<'a> From<&'a Recommendation> for RecommendationRow<'a> {
    fn from(rec: &'a Recommendation) -> Self {
        Self {
            id: rec.id,
            priority: rec.priority,
            kind: rec.kind,
            category: rec.category,
            title: rec.title,
            description: rec.description,
            action: rec.action.as_ref().map(|a| a.label.as_str()),
        }
    }
}

#[derive(Serialize)]
struct QuickWinEntry {
    key: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct RecommendReport {
    applied: Vec<QuickWin>,
    recommendations: Vec<Recommendation>,
    insights: Vec<Insight>,
    quick_wins: Vec<QuickWinEntry>,
}

/// Parses `--apply` names.
pub fn parse_quick_wins(names: &[String]) -> Result<Vec<QuickWin>> {
    names
        .iter()
        .map(|name| name.parse::<QuickWin>().map_err(CliError::from))
        .collect()
}

/// Dispatches each quick win against the store's current state, in order.
pub fn apply_quick_wins(store: &mut ScenarioStore, quick_wins: &[QuickWin]) {
    for quick_win in quick_wins {
        info!("Applying quick win: {}", quick_win.label());
        let commands = quick_win.commands(store.state());
        store.dispatch_all(commands);
    }
}

fn priority_name(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "high",
        Priority::Medium => "medium",
        Priority::Low => "low",
    }
}

/// Renders recommendations and insights for the store's scenario.
pub fn render(store: &ScenarioStore, applied: &[QuickWin], format: OutputFormat) -> Result<String> {
    let recommendations = generate_recommendations(store.state(), store.metrics());
    let insights = generate_insights(store.state(), store.metrics());

    match format {
        OutputFormat::Json => to_json(&RecommendReport {
            applied: applied.to_vec(),
            recommendations,
            insights,
            quick_wins: QuickWin::ALL
                .iter()
                .map(|q| QuickWinEntry {
                    key: q.key(),
                    label: q.label(),
                })
                .collect(),
        }),
        OutputFormat::Csv => to_csv(recommendations.iter().map(RecommendationRow::from)),
        OutputFormat::Table => {
            let mut out = String::new();
            if !applied.is_empty() {
                let names: Vec<&str> = applied.iter().map(|q| q.label()).collect();
                out.push_str(&format!("Applied: {}\n", names.join(", ")));
            }

            let mut table = Table::new(["Priority", "Title", "Advice", "Suggested action"]);
            for rec in &recommendations {
                table.push([
                    priority_name(rec.priority).to_string(),
                    rec.title.to_string(),
                    rec.description.to_string(),
                    rec.action
                        .as_ref()
                        .map(|a| a.label.clone())
                        .unwrap_or_default(),
                ]);
            }
            out.push_str(&table.render());

            if !insights.is_empty() {
                out.push_str("\nInsights\n");
                for insight in &insights {
                    out.push_str(&format!("- {}: {}\n", insight.title, insight.description));
                    if let Some(footnote) = insight.footnote {
                        out.push_str(&format!("  {}\n", footnote));
                    }
                }
            }

            out.push_str("\nQuick wins (--apply <name>)\n");
            for quick_win in QuickWin::ALL {
                out.push_str(&format!("- {}: {}\n", quick_win.key(), quick_win.label()));
            }
            Ok(out)
        }
    }
}

/// Run the recommend command
pub fn run(
    config: &DeckConfig,
    args: &ScenarioArgs,
    apply: &[String],
    format: Option<&str>,
) -> Result<()> {
    let format = OutputFormat::resolve(format, config.output_format())?;
    let quick_wins = parse_quick_wins(apply)?;
    info!("Evaluating recommendations...");

    let mut store = scenario::load(args, config)?;
    apply_quick_wins(&mut store, &quick_wins);
    super::emit(&render(&store, &quick_wins, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let out = render(&ScenarioStore::new(), &[], OutputFormat::Table).unwrap();
        assert!(out.contains("Strong ROI Scenario"));
        assert!(out.contains("Reduce After Time to 12%"));
        assert!(out.contains("- Manual Time Recovery:"));
        assert!(out.contains("- shift-to-team: Shift 5% to Team"));
        assert!(!out.contains("Applied:"));
    }

    #[test]
    fn test_apply_quick_wins() {
        let mut store = ScenarioStore::new();
        let wins = parse_quick_wins(&["reduce-after-time".to_string(), "shift-to-team".to_string()])
            .unwrap();
        apply_quick_wins(&mut store, &wins);

        assert_eq!(store.state().after_time_percent, 8.0);
        assert_eq!(store.state().allocation.team, 45.0);
        assert!(store.state().allocation.is_balanced());

        let out = render(&store, &wins, OutputFormat::Table).unwrap();
        assert!(out.starts_with("Applied: Reduce After time to 8%, Shift 5% to Team"));
        assert!(!out.contains("High Manual Time Remaining"));
    }

    #[test]
    fn test_unknown_quick_win() {
        let err = parse_quick_wins(&["free-lunch".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::Engine(_)));
    }

    #[test]
    fn test_csv_rows() {
        let out = render(&ScenarioStore::new(), &[], OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id,priority,kind,category,title,description,action");
        assert!(lines[1].starts_with("profit-strong,high,insight,profit,"));
        assert!(lines[2].starts_with("manual-time-high,medium,tweak,manual,"));
        assert!(lines[2].ends_with(",Reduce After Time to 12%"));
    }

    #[test]
    fn test_json_report() {
        let out = render(&ScenarioStore::new(), &[QuickWin::RaiseReplace], OutputFormat::Json)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["applied"][0], "raise-replace");
        assert_eq!(parsed["recommendations"][0]["id"], "profit-strong");
        assert_eq!(
            parsed["recommendations"][1]["action"]["commands"][0]["type"],
            "set_field"
        );
        assert_eq!(parsed["quick_wins"].as_array().unwrap().len(), 5);
        assert!(parsed["insights"].as_array().unwrap().len() <= 5);
    }
}
