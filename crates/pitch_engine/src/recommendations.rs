//! Rule-based recommendations and insights.
//!
//! The rules read a scenario and its metrics and suggest tweaks. A
//! suggested tweak is a list of [`ScenarioCommand`]s, so applying it goes
//! through the same reducer as any other edit (allocation tweaks are
//! normalised like a manual allocation edit).

use std::fmt;
use std::str::FromStr;

use pitch_core::format::{format_currency, format_percentage};
use pitch_core::math::checked_ratio;
use pitch_core::types::{AllocationBucket, ScenarioCommand, ScenarioField, ScenarioState};

use crate::error::EngineError;
use crate::metrics::CalculatedMetrics;

/// Maximum number of insights returned by [`generate_insights`].
pub const MAX_INSIGHTS: usize = 5;

/// What sort of advice a recommendation is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RecommendationKind {
    /// Optional adjustment
    Tweak,
    /// Observation
    Insight,
    /// Something that undermines the pitch
    Warning,
}

/// Area of the model a recommendation concerns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// Overall profit
    Profit,
    /// Manual task time
    Manual,
    /// Software spend
    Software,
    /// Human support cost
    Human,
    /// Investment allocation
    Allocation,
    /// Valuation assumptions
    Valuation,
}

/// Recommendation priority. Ordered `Low < Medium < High`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    /// Nice to have
    Low,
    /// Worth doing
    Medium,
    /// Do first
    High,
}

/// A one-click change attached to a recommendation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SuggestedAction {
    /// Button label
    pub label: String,
    /// Commands to dispatch, in order
    pub commands: Vec<ScenarioCommand>,
}

impl SuggestedAction {
    fn single(label: impl Into<String>, command: ScenarioCommand) -> Self {
        Self {
            label: label.into(),
            commands: vec![command],
        }
    }
}

/// A piece of advice for the current scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Recommendation {
    /// Stable identifier
    pub id: &'static str,
    /// Advice type
    pub kind: RecommendationKind,
    /// Area concerned
    pub category: Category,
    /// Short title
    pub title: &'static str,
    /// Explanation
    pub description: &'static str,
    /// Optional one-click change
    pub action: Option<SuggestedAction>,
    /// Priority
    pub priority: Priority,
}

/// Evaluates every rule and returns matches, highest priority first.
///
/// Recommendations of equal priority keep rule order.
pub fn generate_recommendations(
    state: &ScenarioState,
    metrics: &CalculatedMetrics,
) -> Vec<Recommendation> {
    let mut out = Vec::new();
    let profit_delta_pct = metrics.profit_delta_percent().unwrap_or(0.0);

    if profit_delta_pct >= 20.0 {
        out.push(Recommendation {
            id: "profit-strong",
            kind: RecommendationKind::Insight,
            category: Category::Profit,
            title: "Strong ROI Scenario",
            description: "Strong uplift: lead with manual-time savings and low-segment lift.",
            action: None,
            priority: Priority::High,
        });
    } else if profit_delta_pct >= 0.0 {
        out.push(Recommendation {
            id: "profit-ok",
            kind: RecommendationKind::Tweak,
            category: Category::Profit,
            title: "Good Results, Room for Improvement",
            description:
                "Good result: consider +10pp to low-segment uplift or reduce remaining manual time.",
            action: Some(SuggestedAction::single(
                "Increase Low Uplift by 10pp",
                ScenarioCommand::set_field(
                    ScenarioField::LowSegmentUplift,
                    (state.low_segment_uplift + 10.0).min(100.0),
                ),
            )),
            priority: Priority::Medium,
        });
    } else {
        out.push(Recommendation {
            id: "profit-negative",
            kind: RecommendationKind::Warning,
            category: Category::Profit,
            title: "Negative Impact Warning",
            description:
                "At current settings, profit dips. Raise replace%, lower seat price, or increase uplift.",
            action: Some(SuggestedAction::single(
                "Increase Replace% to 60%",
                ScenarioCommand::set_field(ScenarioField::SoftwareReplacePercent, 60.0),
            )),
            priority: Priority::High,
        });
    }

    if state.after_time_percent > 20.0 {
        out.push(Recommendation {
            id: "manual-time-high",
            kind: RecommendationKind::Tweak,
            category: Category::Manual,
            title: "High Manual Time Remaining",
            description:
                "Manual time remains high; target 10-15% of baseline with a six-touch cadence.",
            action: Some(SuggestedAction::single(
                "Reduce After Time to 12%",
                ScenarioCommand::set_field(ScenarioField::AfterTimePercent, 12.0),
            )),
            priority: Priority::Medium,
        });
    }

    if metrics.software_cost_after > metrics.software_cost_before {
        out.push(Recommendation {
            id: "software-overlap",
            kind: RecommendationKind::Warning,
            category: Category::Software,
            title: "Software Cost Overlap",
            description:
                "Software cost rises post-Listedit; increase replace% or phase legacy tools faster.",
            action: Some(SuggestedAction::single(
                "Increase Replace% to 70%",
                ScenarioCommand::set_field(ScenarioField::SoftwareReplacePercent, 70.0),
            )),
            priority: Priority::Medium,
        });
    }

    if state.human_replace_percent < 50.0 {
        out.push(Recommendation {
            id: "human-replace-low",
            kind: RecommendationKind::Tweak,
            category: Category::Human,
            title: "Conservative Human Replacement",
            description:
                "Human replacement is modest; pilot call/sms workflows to safely raise to 60-80%.",
            action: Some(SuggestedAction::single(
                "Increase Human Replace to 70%",
                ScenarioCommand::set_field(ScenarioField::HumanReplacePercent, 70.0),
            )),
            priority: Priority::Low,
        });
    }

    let allocation = &state.allocation;
    if allocation.team < 35.0 {
        out.push(Recommendation {
            id: "alloc-team-low",
            kind: RecommendationKind::Warning,
            category: Category::Allocation,
            title: "Team Allocation Too Low",
            description: "Team allocation may be thin for delivery; consider at least 35%.",
            action: Some(SuggestedAction::single(
                "Shift 5% to Team",
                ScenarioCommand::set_allocation(
                    AllocationBucket::Team,
                    (allocation.team + 5.0).min(100.0),
                ),
            )),
            priority: Priority::Medium,
        });
    }

    if allocation.rnd < 15.0 {
        out.push(Recommendation {
            id: "alloc-rd-low",
            kind: RecommendationKind::Warning,
            category: Category::Allocation,
            title: "R&D Under-resourced",
            description: "R&D under 15% risks roadmap velocity; consider at least 15%.",
            action: None,
            priority: Priority::Medium,
        });
    }

    if allocation.sales < 10.0 {
        out.push(Recommendation {
            id: "alloc-sm-low",
            kind: RecommendationKind::Warning,
            category: Category::Allocation,
            title: "Sales & Marketing Mismatch",
            description: "Sales & Marketing under 10% may limit SOM targets; adjust accordingly.",
            action: None,
            priority: Priority::Medium,
        });
    }

    if state.arr_multiple < 10.0 {
        out.push(Recommendation {
            id: "valuation-low-multiple",
            kind: RecommendationKind::Warning,
            category: Category::Valuation,
            title: "Below Growth Corridor",
            description: "Multiple below high-growth corridor; sanity check with 10-23x comps.",
            action: Some(SuggestedAction::single(
                "Set Multiple to 12x",
                ScenarioCommand::set_field(ScenarioField::ArrMultiple, 12.0),
            )),
            priority: Priority::Low,
        });
    }

    // Stable, so equal priorities keep rule order.
    out.sort_by(|a, b| b.priority.cmp(&a.priority));
    out
}

/// Tone of an insight callout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InsightKind {
    /// Good news
    Success,
    /// Needs attention
    Warning,
    /// Neutral observation
    Info,
    /// Productivity lift
    Lift,
    /// Cost reduction
    Cost,
}

/// A narrative callout derived from the scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Insight {
    /// Tone
    pub kind: InsightKind,
    /// Short title
    pub title: &'static str,
    /// Sentence with the scenario's figures filled in
    pub description: String,
    /// Supporting note
    pub footnote: Option<&'static str>,
}

/// Builds up to [`MAX_INSIGHTS`] callouts for the scenario.
pub fn generate_insights(state: &ScenarioState, metrics: &CalculatedMetrics) -> Vec<Insight> {
    let mut out = Vec::new();
    let currency = state.currency;

    let profit_delta_pct = metrics.profit_delta_percent().unwrap_or(0.0);
    if profit_delta_pct >= 20.0 {
        out.push(Insight {
            kind: InsightKind::Success,
            title: "Strong ROI Scenario",
            description: format!(
                "Profit increases by {} with Listedit implementation.",
                format_percentage(profit_delta_pct)
            ),
            footnote: Some("High-impact scenario validates investment in automation."),
        });
    }

    let manual_savings = metrics.repetitive_cost_before - metrics.repetitive_cost_after;
    if manual_savings > 0.0 {
        let per_agent =
            checked_ratio(manual_savings, f64::from(state.number_of_agents)).unwrap_or(0.0);
        let hours_after = state.hours_per_week_per_agent * state.after_time_percent / 100.0;
        out.push(Insight {
            kind: InsightKind::Lift,
            title: "Manual Time Recovery",
            description: format!(
                "Manual time falls from {}h/wk to {:.1}h/wk per agent; that's {}/agent/yr back into selling time.",
                state.hours_per_week_per_agent,
                hours_after,
                format_currency(per_agent, currency)
            ),
            footnote: Some("Freed-up time can be redirected to high-value client interactions."),
        });
    }

    if let Some(top_share) = metrics.top_revenue_share() {
        if top_share > 60.0 {
            out.push(Insight {
                kind: InsightKind::Info,
                title: "Revenue Concentration",
                description: format!(
                    "Top {}% of agents create {} of revenue; raising low segment output by {}% has the bigger ROI.",
                    state.top_performer_ratio,
                    format_percentage(top_share),
                    state.low_segment_uplift
                ),
                footnote: Some("Focus on lifting the long tail for maximum impact."),
            });
        }
    }

    let software_delta = metrics.software_cost_delta();
    if software_delta.abs() > 1_000.0 {
        let rising = software_delta > 0.0;
        out.push(Insight {
            kind: if rising {
                InsightKind::Warning
            } else {
                InsightKind::Cost
            },
            title: "Software Cost Impact",
            description: format!(
                "You're replacing {}% of legacy software while adding {}/agent/yr for Listedit; net change: {}.",
                state.software_replace_percent,
                format_currency(state.price_per_agent, currency),
                format_currency(software_delta, currency)
            ),
            footnote: Some(if rising {
                "Consider higher replacement percentage to reduce overlap."
            } else {
                "Net software cost reduction improves margins."
            }),
        });
    }

    out.truncate(MAX_INSIGHTS);
    out
}

/// Canned one-click tweaks offered alongside the recommendations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum QuickWin {
    /// Remaining manual time to 8% of baseline
    ReduceAfterTime,
    /// Low-segment uplift +10pp, capped at 100
    IncreaseLowUplift,
    /// Software replacement to 60%
    RaiseReplace,
    /// Seat price to 4,500
    LowerSeatPrice,
    /// Team allocation +5pp, capped at 100
    ShiftToTeam,
}

impl QuickWin {
    /// Every quick win in display order.
    pub const ALL: [QuickWin; 5] = [
        QuickWin::ReduceAfterTime,
        QuickWin::IncreaseLowUplift,
        QuickWin::RaiseReplace,
        QuickWin::LowerSeatPrice,
        QuickWin::ShiftToTeam,
    ];

    /// Machine name, as accepted by [`FromStr`].
    pub fn key(&self) -> &'static str {
        match self {
            QuickWin::ReduceAfterTime => "reduce-after-time",
            QuickWin::IncreaseLowUplift => "increase-low-uplift",
            QuickWin::RaiseReplace => "raise-replace",
            QuickWin::LowerSeatPrice => "lower-seat-price",
            QuickWin::ShiftToTeam => "shift-to-team",
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            QuickWin::ReduceAfterTime => "Reduce After time to 8%",
            QuickWin::IncreaseLowUplift => "Increase Low uplift by +10pp",
            QuickWin::RaiseReplace => "Raise Replace% to 60%",
            QuickWin::LowerSeatPrice => "Seat price to $4,500",
            QuickWin::ShiftToTeam => "Shift 5% to Team",
        }
    }

    /// Commands that apply the tweak to `state`.
    pub fn commands(&self, state: &ScenarioState) -> Vec<ScenarioCommand> {
        let command = match self {
            QuickWin::ReduceAfterTime => {
                ScenarioCommand::set_field(ScenarioField::AfterTimePercent, 8.0)
            }
            QuickWin::IncreaseLowUplift => ScenarioCommand::set_field(
                ScenarioField::LowSegmentUplift,
                (state.low_segment_uplift + 10.0).min(100.0),
            ),
            QuickWin::RaiseReplace => {
                ScenarioCommand::set_field(ScenarioField::SoftwareReplacePercent, 60.0)
            }
            QuickWin::LowerSeatPrice => {
                ScenarioCommand::set_field(ScenarioField::PricePerAgent, 4_500.0)
            }
            QuickWin::ShiftToTeam => ScenarioCommand::set_allocation(
                AllocationBucket::Team,
                (state.allocation.team + 5.0).min(100.0),
            ),
        };
        vec![command]
    }
}

impl FromStr for QuickWin {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, EngineError> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|q| q.key() == wanted)
            .ok_or_else(|| EngineError::UnknownQuickWin(s.to_string()))
    }
}

impl fmt::Display for QuickWin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
