//! Scenario inputs and the commands that mutate them.
//!
//! [`ScenarioState`] is the complete input record for one what-if
//! scenario. It starts from [`ScenarioState::default`] and is only changed
//! through [`ScenarioCommand`]s; the reducer that applies them lives in
//! `pitch_engine::store`.

use super::allocation::{Allocation, AllocationBucket};
use super::currency::Currency;
use super::field::ScenarioField;
use crate::math::round_half_up;

/// Complete input record for a scenario.
///
/// No range checks happen here. Percentages outside 0–100, zero revenue
/// drivers and similar inputs are all representable and produce
/// mathematically consistent metrics.
///
/// # Examples
///
/// ```
/// use pitch_core::types::{Currency, ScenarioField, ScenarioState};
///
/// let mut state = ScenarioState::default();
/// assert_eq!(state.currency, Currency::AUD);
/// assert_eq!(state.number_of_agents, 200);
///
/// state.set(ScenarioField::CommissionRate, 3.5);
/// assert_eq!(state.get(ScenarioField::CommissionRate), 3.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScenarioState {
    // General settings
    /// Display currency
    pub currency: Currency,
    /// Agent headcount
    pub number_of_agents: u32,

    // Revenue drivers
    /// Deals per year, top performers
    pub deals_per_year_top: f64,
    /// Deals per year, low performers
    pub deals_per_year_low: f64,
    /// Share of agents who are top performers (%)
    pub top_performer_ratio: f64,
    /// Average property value
    pub avg_property_value: f64,
    /// Commission rate (%)
    pub commission_rate: f64,
    /// Deal-rate uplift, top performers (%)
    pub top_segment_uplift: f64,
    /// Deal-rate uplift, low performers (%)
    pub low_segment_uplift: f64,

    // Software & services
    /// Baseline software spend as % of revenue
    pub baseline_software_percent: f64,
    /// Share of legacy software replaced (%)
    pub software_replace_percent: f64,
    /// Product annual price per agent seat
    pub price_per_agent: f64,

    // Repetitive tasks
    /// Manual-task hours per week per agent
    pub hours_per_week_per_agent: f64,
    /// Cost per manual hour
    pub cost_per_hour: f64,
    /// Manual time remaining after adoption (% of baseline)
    pub after_time_percent: f64,

    // Human costs
    /// Assistant cost per agent per year
    pub assistant_per_agent: f64,
    /// Marketing assistant cost per agent per year
    pub marketing_per_agent: f64,
    /// Share of human support cost displaced (%)
    pub human_replace_percent: f64,

    // Valuation
    /// Paying client count
    pub paying_clients: f64,
    /// Annual price per client
    pub annual_price_per_client: f64,
    /// ARR valuation multiple
    pub arr_multiple: f64,
    /// SAM as % of TAM
    pub sam_percent: f64,
    /// SOM as % of SAM
    pub som_percent: f64,

    /// Investment allocation
    pub allocation: Allocation,
}

impl Default for ScenarioState {
    fn default() -> Self {
        Self {
            currency: Currency::AUD,
            number_of_agents: 200,

            deals_per_year_top: 25.0,
            deals_per_year_low: 3.0,
            top_performer_ratio: 5.0,
            avg_property_value: 850_000.0,
            commission_rate: 4.0,
            top_segment_uplift: 10.0,
            low_segment_uplift: 35.0,

            baseline_software_percent: 10.0,
            software_replace_percent: 50.0,
            price_per_agent: 5_000.0,

            hours_per_week_per_agent: 20.0,
            cost_per_hour: 45.0,
            after_time_percent: 30.0,

            assistant_per_agent: 12_000.0,
            marketing_per_agent: 6_000.0,
            human_replace_percent: 100.0,

            paying_clients: 200.0,
            annual_price_per_client: 5_000.0,
            arr_multiple: 15.0,
            sam_percent: 50.0,
            som_percent: 10.0,

            allocation: Allocation::default(),
        }
    }
}

impl ScenarioState {
    /// Reads a field as `f64`.
    pub fn get(&self, field: ScenarioField) -> f64 {
        match field {
            ScenarioField::NumberOfAgents => f64::from(self.number_of_agents),
            ScenarioField::DealsPerYearTop => self.deals_per_year_top,
            ScenarioField::DealsPerYearLow => self.deals_per_year_low,
            ScenarioField::TopPerformerRatio => self.top_performer_ratio,
            ScenarioField::AvgPropertyValue => self.avg_property_value,
            ScenarioField::CommissionRate => self.commission_rate,
            ScenarioField::TopSegmentUplift => self.top_segment_uplift,
            ScenarioField::LowSegmentUplift => self.low_segment_uplift,
            ScenarioField::BaselineSoftwarePercent => self.baseline_software_percent,
            ScenarioField::SoftwareReplacePercent => self.software_replace_percent,
            ScenarioField::PricePerAgent => self.price_per_agent,
            ScenarioField::HoursPerWeekPerAgent => self.hours_per_week_per_agent,
            ScenarioField::CostPerHour => self.cost_per_hour,
            ScenarioField::AfterTimePercent => self.after_time_percent,
            ScenarioField::AssistantPerAgent => self.assistant_per_agent,
            ScenarioField::MarketingPerAgent => self.marketing_per_agent,
            ScenarioField::HumanReplacePercent => self.human_replace_percent,
            ScenarioField::PayingClients => self.paying_clients,
            ScenarioField::AnnualPricePerClient => self.annual_price_per_client,
            ScenarioField::ArrMultiple => self.arr_multiple,
            ScenarioField::SamPercent => self.sam_percent,
            ScenarioField::SomPercent => self.som_percent,
        }
    }

    /// Writes a field verbatim.
    ///
    /// The agent headcount is integral: the value is rounded half-up and
    /// saturated into `u32` (negative and NaN become 0).
    pub fn set(&mut self, field: ScenarioField, value: f64) {
        match field {
            ScenarioField::NumberOfAgents => {
                // `as` saturates and maps NaN to 0.
                self.number_of_agents = round_half_up(value) as u32;
            }
            ScenarioField::DealsPerYearTop => self.deals_per_year_top = value,
            ScenarioField::DealsPerYearLow => self.deals_per_year_low = value,
            ScenarioField::TopPerformerRatio => self.top_performer_ratio = value,
            ScenarioField::AvgPropertyValue => self.avg_property_value = value,
            ScenarioField::CommissionRate => self.commission_rate = value,
            ScenarioField::TopSegmentUplift => self.top_segment_uplift = value,
            ScenarioField::LowSegmentUplift => self.low_segment_uplift = value,
            ScenarioField::BaselineSoftwarePercent => self.baseline_software_percent = value,
            ScenarioField::SoftwareReplacePercent => self.software_replace_percent = value,
            ScenarioField::PricePerAgent => self.price_per_agent = value,
            ScenarioField::HoursPerWeekPerAgent => self.hours_per_week_per_agent = value,
            ScenarioField::CostPerHour => self.cost_per_hour = value,
            ScenarioField::AfterTimePercent => self.after_time_percent = value,
            ScenarioField::AssistantPerAgent => self.assistant_per_agent = value,
            ScenarioField::MarketingPerAgent => self.marketing_per_agent = value,
            ScenarioField::HumanReplacePercent => self.human_replace_percent = value,
            ScenarioField::PayingClients => self.paying_clients = value,
            ScenarioField::AnnualPricePerClient => self.annual_price_per_client = value,
            ScenarioField::ArrMultiple => self.arr_multiple = value,
            ScenarioField::SamPercent => self.sam_percent = value,
            ScenarioField::SomPercent => self.som_percent = value,
        }
    }

    /// Returns a copy with `field` set to `value`.
    pub fn with(mut self, field: ScenarioField, value: f64) -> Self {
        self.set(field, value);
        self
    }
}

/// A typed mutation of a [`ScenarioState`].
///
/// Allocation edits are kept separate from plain field edits because they
/// go through the normaliser, which rebalances the other six buckets.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ScenarioCommand {
    /// Overwrite one numeric field.
    SetField {
        /// Field to write
        field: ScenarioField,
        /// New value, stored verbatim
        value: f64,
    },
    /// Change the display currency.
    SetCurrency {
        /// New currency
        currency: Currency,
    },
    /// Set one allocation bucket and rebalance the others.
    SetAllocation {
        /// Bucket being edited
        bucket: AllocationBucket,
        /// Requested share (%)
        value: f64,
    },
    /// Restore the default record.
    Reset,
}

impl ScenarioCommand {
    /// Shorthand for [`ScenarioCommand::SetField`].
    pub fn set_field(field: ScenarioField, value: f64) -> Self {
        Self::SetField { field, value }
    }

    /// Shorthand for [`ScenarioCommand::SetAllocation`].
    pub fn set_allocation(bucket: AllocationBucket, value: f64) -> Self {
        Self::SetAllocation { bucket, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let state = ScenarioState::default();
        assert_eq!(state.number_of_agents, 200);
        assert_eq!(state.top_performer_ratio, 5.0);
        assert_eq!(state.commission_rate, 4.0);
        assert_eq!(state.arr_multiple, 15.0);
        assert_eq!(state.sam_percent, 50.0);
        assert_eq!(state.som_percent, 10.0);
        assert_eq!(state.human_replace_percent, 100.0);
        assert_eq!(state.allocation.total(), 100.0);
    }

    #[test]
    fn test_get_set_roundtrip_every_field() {
        let mut state = ScenarioState::default();
        for (i, field) in ScenarioField::ALL.iter().enumerate() {
            let value = 7.0 + i as f64;
            state.set(*field, value);
            assert_eq!(state.get(*field), value, "{}", field);
        }
    }

    #[test]
    fn test_set_agents_rounds_and_saturates() {
        let mut state = ScenarioState::default();
        state.set(ScenarioField::NumberOfAgents, 149.5);
        assert_eq!(state.number_of_agents, 150);

        state.set(ScenarioField::NumberOfAgents, -3.0);
        assert_eq!(state.number_of_agents, 0);

        state.set(ScenarioField::NumberOfAgents, f64::NAN);
        assert_eq!(state.number_of_agents, 0);
    }

    #[test]
    fn test_set_stores_out_of_range_verbatim() {
        let state = ScenarioState::default().with(ScenarioField::CommissionRate, 250.0);
        assert_eq!(state.commission_rate, 250.0);
    }

    #[test]
    fn test_command_constructors() {
        assert_eq!(
            ScenarioCommand::set_field(ScenarioField::ArrMultiple, 12.0),
            ScenarioCommand::SetField {
                field: ScenarioField::ArrMultiple,
                value: 12.0
            }
        );
        assert_eq!(
            ScenarioCommand::set_allocation(AllocationBucket::Team, 45.0),
            ScenarioCommand::SetAllocation {
                bucket: AllocationBucket::Team,
                value: 45.0
            }
        );
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_partial_toml_falls_back_to_defaults() {
            let state: ScenarioState = toml::from_str(
                r#"
                currency = "USD"
                number_of_agents = 50

                [allocation]
                team = 30.0
                "#,
            )
            .unwrap();

            assert_eq!(state.currency, Currency::USD);
            assert_eq!(state.number_of_agents, 50);
            assert_eq!(state.commission_rate, 4.0);
            assert_eq!(state.allocation.team, 30.0);
            assert_eq!(state.allocation.rnd, 20.0);
        }

        #[test]
        fn test_command_json_shape() {
            let json = serde_json::to_string(&ScenarioCommand::set_field(
                ScenarioField::SamPercent,
                40.0,
            ))
            .unwrap();
            assert_eq!(
                json,
                r#"{"type":"set_field","field":"sam_percent","value":40.0}"#
            );

            let reset: ScenarioCommand = serde_json::from_str(r#"{"type":"reset"}"#).unwrap();
            assert_eq!(reset, ScenarioCommand::Reset);
        }
    }
}
