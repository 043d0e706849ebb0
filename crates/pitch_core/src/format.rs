//! Display formatting for scenario figures.
//!
//! Amounts are shown as whole units with en-US thousands separators,
//! prefixed by the currency symbol (`A$27,880,000`). Percentages carry one
//! decimal place.

use crate::math::round_half_up;
use crate::types::{Currency, ScenarioState};

/// Groups the digits of a whole number with commas.
fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn whole(value: f64) -> i64 {
    if value.is_finite() {
        round_half_up(value) as i64
    } else {
        0
    }
}

/// Formats a whole number with thousands separators.
///
/// # Examples
///
/// ```
/// use pitch_core::format::format_number;
///
/// assert_eq!(format_number(1_842_951.0), "1,842,951");
/// assert_eq!(format_number(999.5), "1,000");
/// ```
pub fn format_number(value: f64) -> String {
    group_thousands(whole(value))
}

/// Formats an amount in `currency`, rounded to whole units.
///
/// Negative amounts keep the sign after the symbol.
///
/// # Examples
///
/// ```
/// use pitch_core::format::format_currency;
/// use pitch_core::types::Currency;
///
/// assert_eq!(format_currency(27_880_000.0, Currency::AUD), "A$27,880,000");
/// assert_eq!(format_currency(-1_234.4, Currency::NZD), "NZ$-1,234");
/// assert_eq!(format_currency(12.0, Currency::USD), "$12");
/// ```
pub fn format_currency(amount: f64, currency: Currency) -> String {
    format!("{}{}", currency.symbol(), format_number(amount))
}

/// Formats a percentage with one decimal place.
///
/// # Examples
///
/// ```
/// use pitch_core::format::format_percentage;
///
/// assert_eq!(format_percentage(12.5), "12.5%");
/// assert_eq!(format_percentage(40.0), "40.0%");
/// ```
pub fn format_percentage(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}%", value)
    } else {
        "0.0%".to_string()
    }
}

/// One-sentence explanation of the manual-task saving per agent.
pub fn explain_repetitive_tasks(state: &ScenarioState) -> String {
    let annual_hours = state.hours_per_week_per_agent * 52.0;
    let annual_cost = annual_hours * state.cost_per_hour;
    let remaining = annual_cost * (state.after_time_percent / 100.0);
    let savings = annual_cost - remaining;

    format!(
        "Each agent spends {} hrs/week ({}/year); Listedit reduces this to {}% of baseline, saving {} per year.",
        state.hours_per_week_per_agent,
        format_currency(annual_cost, state.currency),
        state.after_time_percent,
        format_currency(savings, state.currency),
    )
}
