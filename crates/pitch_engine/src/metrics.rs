//! Before/after scenario metrics.
//!
//! [`compute_metrics`] is a single linear pass over a [`ScenarioState`]:
//! segment the agents, price revenue before and after adoption, cost the
//! three spend categories, then derive profit, margins, market size and
//! valuation. It is pure and total; any finite input produces a complete
//! record, and zero denominators yield 0 instead of NaN or infinity.

use pitch_core::math::{checked_ratio, round_half_up};
use pitch_core::types::region::total_agent_count;
use pitch_core::types::ScenarioState;

/// Working weeks per year used to annualise manual hours.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Derived figures for one scenario snapshot.
///
/// Every field is recomputed from scratch on each call to
/// [`compute_metrics`]; there is no partial update path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculatedMetrics {
    /// Agents in the top-performer segment
    pub top_agents: i64,
    /// Agents in the low-performer segment
    pub low_agents: i64,

    /// Top segment revenue before adoption
    pub revenue_top_before: f64,
    /// Low segment revenue before adoption
    pub revenue_low_before: f64,
    /// Total revenue before adoption
    pub revenue_total_before: f64,
    /// Top segment revenue after adoption
    pub revenue_top_after: f64,
    /// Low segment revenue after adoption
    pub revenue_low_after: f64,
    /// Total revenue after adoption
    pub revenue_total_after: f64,

    /// Software & services cost before adoption
    pub software_cost_before: f64,
    /// Software & services cost after adoption, including seat licences
    pub software_cost_after: f64,
    /// Repetitive-task cost before adoption
    pub repetitive_cost_before: f64,
    /// Repetitive-task cost after adoption
    pub repetitive_cost_after: f64,
    /// Human support cost before adoption
    pub human_cost_before: f64,
    /// Human support cost after adoption
    pub human_cost_after: f64,
    /// Sum of the three cost categories before adoption
    pub total_cost_before: f64,
    /// Sum of the three cost categories after adoption
    pub total_cost_after: f64,

    /// Profit before adoption
    pub profit_before: f64,
    /// Profit after adoption
    pub profit_after: f64,
    /// Profit margin before adoption (%), 0 when revenue is 0
    pub profit_margin_before: f64,
    /// Profit margin after adoption (%), 0 when revenue is 0
    pub profit_margin_after: f64,

    /// Total addressable market
    pub tam: f64,
    /// Serviceable addressable market
    pub sam: f64,
    /// Serviceable obtainable market
    pub som: f64,
    /// Annual recurring revenue
    pub arr: f64,
    /// ARR times the multiple
    pub valuation: f64,

    /// Total cost before minus total cost after
    pub cost_savings: f64,
    /// Total revenue after minus total revenue before
    pub revenue_increase: f64,
    /// Revenue increase plus cost savings
    pub total_benefit: f64,
}

impl CalculatedMetrics {
    /// Absolute change in profit.
    pub fn profit_delta(&self) -> f64 {
        self.profit_after - self.profit_before
    }

    /// Profit change relative to a positive baseline profit (%).
    ///
    /// `None` when the baseline profit is zero or negative, where a
    /// relative change has no meaningful sign.
    pub fn profit_delta_percent(&self) -> Option<f64> {
        if self.profit_before > 0.0 {
            Some(self.profit_delta() / self.profit_before * 100.0)
        } else {
            None
        }
    }

    /// Share of baseline revenue produced by the top segment (%).
    pub fn top_revenue_share(&self) -> Option<f64> {
        checked_ratio(self.revenue_top_before, self.revenue_total_before).map(|r| r * 100.0)
    }

    /// Change in software & services cost (positive means it went up).
    pub fn software_cost_delta(&self) -> f64 {
        self.software_cost_after - self.software_cost_before
    }
}

/// Profit as a percentage of revenue, 0 unless revenue is positive.
#[inline]
fn margin(profit: f64, revenue: f64) -> f64 {
    if revenue > 0.0 {
        profit / revenue * 100.0
    } else {
        0.0
    }
}

/// Splits the headcount into `(top, low)` segments.
///
/// The top segment is rounded half-up and the low segment absorbs the
/// remainder, so the two always add back to the headcount.
///
/// # Examples
///
/// ```
/// use pitch_engine::metrics::segment_agents;
///
/// assert_eq!(segment_agents(200, 5.0), (10, 190));
/// assert_eq!(segment_agents(10, 25.0), (3, 7));
/// ```
pub fn segment_agents(agents: u32, top_ratio_percent: f64) -> (i64, i64) {
    let agents = i64::from(agents);
    // `as` saturates, so extreme ratios cannot overflow.
    let top = round_half_up(agents as f64 * (top_ratio_percent / 100.0)) as i64;
    (top, agents - top)
}

/// Computes the full metrics record for `state`.
///
/// # Examples
///
/// ```
/// use pitch_core::types::ScenarioState;
/// use pitch_engine::metrics::compute_metrics;
///
/// let metrics = compute_metrics(&ScenarioState::default());
/// assert_eq!(metrics.top_agents, 10);
/// assert_eq!(metrics.low_agents, 190);
/// assert_eq!(metrics.revenue_total_before, 27_880_000.0);
/// ```
pub fn compute_metrics(state: &ScenarioState) -> CalculatedMetrics {
    let agents = f64::from(state.number_of_agents);
    let (top_agents, low_agents) = segment_agents(state.number_of_agents, state.top_performer_ratio);
    let top = top_agents as f64;
    let low = low_agents as f64;

    let commission_per_deal = state.avg_property_value * (state.commission_rate / 100.0);

    // Revenue
    let revenue_top_before = top * state.deals_per_year_top * commission_per_deal;
    let revenue_low_before = low * state.deals_per_year_low * commission_per_deal;
    let revenue_total_before = revenue_top_before + revenue_low_before;

    let revenue_top_after = top
        * state.deals_per_year_top
        * (1.0 + state.top_segment_uplift / 100.0)
        * commission_per_deal;
    let revenue_low_after = low
        * state.deals_per_year_low
        * (1.0 + state.low_segment_uplift / 100.0)
        * commission_per_deal;
    let revenue_total_after = revenue_top_after + revenue_low_after;

    // Software & services: partial displacement plus additive seat licences
    let software_cost_before = revenue_total_before * (state.baseline_software_percent / 100.0);
    let software_cost_after = software_cost_before * (1.0 - state.software_replace_percent / 100.0)
        + agents * state.price_per_agent;

    // Repetitive tasks
    let repetitive_cost_before =
        agents * state.hours_per_week_per_agent * WEEKS_PER_YEAR * state.cost_per_hour;
    let repetitive_cost_after = repetitive_cost_before * (state.after_time_percent / 100.0);

    // Human support
    let human_cost_before = agents * (state.assistant_per_agent + state.marketing_per_agent);
    let human_cost_after = human_cost_before * (1.0 - state.human_replace_percent / 100.0);

    let total_cost_before = software_cost_before + repetitive_cost_before + human_cost_before;
    let total_cost_after = software_cost_after + repetitive_cost_after + human_cost_after;

    let profit_before = revenue_total_before - total_cost_before;
    let profit_after = revenue_total_after - total_cost_after;

    // Valuation is independent of the before/after model
    let tam = total_agent_count() as f64 * state.annual_price_per_client;
    let sam = tam * (state.sam_percent / 100.0);
    let som = sam * (state.som_percent / 100.0);
    let arr = state.paying_clients * state.annual_price_per_client;
    let valuation = arr * state.arr_multiple;

    let cost_savings = total_cost_before - total_cost_after;
    let revenue_increase = revenue_total_after - revenue_total_before;

    CalculatedMetrics {
        top_agents,
        low_agents,
        revenue_top_before,
        revenue_low_before,
        revenue_total_before,
        revenue_top_after,
        revenue_low_after,
        revenue_total_after,
        software_cost_before,
        software_cost_after,
        repetitive_cost_before,
        repetitive_cost_after,
        human_cost_before,
        human_cost_after,
        total_cost_before,
        total_cost_after,
        profit_before,
        profit_after,
        profit_margin_before: margin(profit_before, revenue_total_before),
        profit_margin_after: margin(profit_after, revenue_total_after),
        tam,
        sam,
        som,
        arr,
        valuation,
        cost_savings,
        revenue_increase,
        total_benefit: revenue_increase + cost_savings,
    }
}
