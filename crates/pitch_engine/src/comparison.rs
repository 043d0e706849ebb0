//! Before/after comparison table.
//!
//! Flattens [`CalculatedMetrics`] into the rows of the numbers view, each
//! with its difference, relative change and whether the move is good news.

use pitch_core::math::percentage_of;

use crate::metrics::CalculatedMetrics;

/// How a row's values should be displayed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueKind {
    /// Monetary amount
    Currency,
    /// Percentage
    Percentage,
}

/// Direction in which a change counts as favourable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Preference {
    /// Increases are good (revenue, profit, margin)
    HigherIsBetter,
    /// Decreases are good (costs)
    LowerIsBetter,
}

/// Classification of a row's change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Trend {
    /// Moved in the preferred direction
    Favourable,
    /// Moved against the preferred direction
    Unfavourable,
    /// Did not move
    Unchanged,
}

/// One line of the comparison table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonRow {
    /// Row label
    pub category: &'static str,
    /// Value before adoption
    pub before: f64,
    /// Value after adoption
    pub after: f64,
    /// `after - before`
    pub difference: f64,
    /// Relative change (%), `None` when `before` is zero
    pub percent_change: Option<f64>,
    /// Display kind
    pub kind: ValueKind,
    /// Preferred direction
    pub preference: Preference,
}

impl ComparisonRow {
    fn new(
        category: &'static str,
        before: f64,
        after: f64,
        kind: ValueKind,
        preference: Preference,
    ) -> Self {
        let difference = after - before;
        Self {
            category,
            before,
            after,
            difference,
            percent_change: percentage_of(difference, before),
            kind,
            preference,
        }
    }

    /// Classifies the change against the row's preferred direction.
    pub fn trend(&self) -> Trend {
        let improving = match self.preference {
            Preference::HigherIsBetter => self.difference > 0.0,
            Preference::LowerIsBetter => self.difference < 0.0,
        };
        if self.difference == 0.0 {
            Trend::Unchanged
        } else if improving {
            Trend::Favourable
        } else {
            Trend::Unfavourable
        }
    }
}

/// Builds the seven-row comparison table.
///
/// # Examples
///
/// ```
/// use pitch_core::types::ScenarioState;
/// use pitch_engine::comparison::{comparison_table, Trend};
/// use pitch_engine::metrics::compute_metrics;
///
/// let rows = comparison_table(&compute_metrics(&ScenarioState::default()));
/// assert_eq!(rows[0].category, "Revenue Total");
/// assert_eq!(rows[0].trend(), Trend::Favourable);
/// ```
pub fn comparison_table(metrics: &CalculatedMetrics) -> Vec<ComparisonRow> {
    use Preference::{HigherIsBetter, LowerIsBetter};
    use ValueKind::{Currency, Percentage};

    vec![
        ComparisonRow::new(
            "Revenue Total",
            metrics.revenue_total_before,
            metrics.revenue_total_after,
            Currency,
            HigherIsBetter,
        ),
        ComparisonRow::new(
            "Software & Services",
            metrics.software_cost_before,
            metrics.software_cost_after,
            Currency,
            LowerIsBetter,
        ),
        ComparisonRow::new(
            "Repetitive Tasks",
            metrics.repetitive_cost_before,
            metrics.repetitive_cost_after,
            Currency,
            LowerIsBetter,
        ),
        ComparisonRow::new(
            "Human Costs",
            metrics.human_cost_before,
            metrics.human_cost_after,
            Currency,
            LowerIsBetter,
        ),
        ComparisonRow::new(
            "Total Costs",
            metrics.total_cost_before,
            metrics.total_cost_after,
            Currency,
            LowerIsBetter,
        ),
        ComparisonRow::new(
            "Profit",
            metrics.profit_before,
            metrics.profit_after,
            Currency,
            HigherIsBetter,
        ),
        ComparisonRow::new(
            "Profit Margin %",
            metrics.profit_margin_before,
            metrics.profit_margin_after,
            Percentage,
            HigherIsBetter,
        ),
    ]
}
