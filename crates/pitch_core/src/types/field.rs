//! Catalogue of editable scenario inputs.
//!
//! Every numeric input except the allocation buckets is named by a
//! [`ScenarioField`]. The catalogue carries the labels and input bounds of
//! the dashboard form, so the input layer can parse and clamp user text
//! before it reaches the engine. The engine itself never clamps.

use std::fmt;
use std::str::FromStr;

use super::error::ScenarioError;

/// Inclusive input bounds for a field. `max` is open-ended when `None`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldBounds {
    /// Smallest accepted value
    pub min: f64,
    /// Largest accepted value, if any
    pub max: Option<f64>,
}

impl FieldBounds {
    const PERCENT: Self = Self {
        min: 0.0,
        max: Some(100.0),
    };
    const NON_NEGATIVE: Self = Self {
        min: 0.0,
        max: None,
    };

    /// Clamps `value` into the bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        let lower = value.max(self.min);
        match self.max {
            Some(max) => lower.min(max),
            None => lower,
        }
    }

    /// Whether `value` already lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

/// Broad grouping used for display.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    /// General settings
    General,
    /// Revenue drivers
    Revenue,
    /// Software and services costs
    Software,
    /// Repetitive manual tasks
    RepetitiveTasks,
    /// Human support costs
    HumanCosts,
    /// Valuation drivers
    Valuation,
}

impl FieldGroup {
    /// Section heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Revenue => "Revenue",
            Self::Software => "Software & Services",
            Self::RepetitiveTasks => "Repetitive Tasks",
            Self::HumanCosts => "Human Costs",
            Self::Valuation => "Valuation",
        }
    }
}

/// A numeric scenario input other than the allocation buckets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScenarioField {
    /// Agent headcount
    NumberOfAgents,
    /// Deals per year, top performers
    DealsPerYearTop,
    /// Deals per year, low performers
    DealsPerYearLow,
    /// Share of agents who are top performers (%)
    TopPerformerRatio,
    /// Average property value
    AvgPropertyValue,
    /// Commission rate (%)
    CommissionRate,
    /// Deal-rate uplift for top performers (%)
    TopSegmentUplift,
    /// Deal-rate uplift for low performers (%)
    LowSegmentUplift,
    /// Baseline software spend as % of revenue
    BaselineSoftwarePercent,
    /// Share of legacy software replaced (%)
    SoftwareReplacePercent,
    /// Product annual price per agent seat
    PricePerAgent,
    /// Manual-task hours per week per agent
    HoursPerWeekPerAgent,
    /// Cost per manual hour
    CostPerHour,
    /// Manual time remaining after adoption (% of baseline)
    AfterTimePercent,
    /// Assistant cost per agent per year
    AssistantPerAgent,
    /// Marketing assistant cost per agent per year
    MarketingPerAgent,
    /// Share of human support cost displaced (%)
    HumanReplacePercent,
    /// Paying client count
    PayingClients,
    /// Annual price per client
    AnnualPricePerClient,
    /// ARR valuation multiple
    ArrMultiple,
    /// Serviceable addressable share of TAM (%)
    SamPercent,
    /// Serviceable obtainable share of SAM (%)
    SomPercent,
}

impl ScenarioField {
    /// All fields in form order.
    pub const ALL: [ScenarioField; 22] = [
        Self::NumberOfAgents,
        Self::DealsPerYearTop,
        Self::DealsPerYearLow,
        Self::TopPerformerRatio,
        Self::AvgPropertyValue,
        Self::CommissionRate,
        Self::TopSegmentUplift,
        Self::LowSegmentUplift,
        Self::BaselineSoftwarePercent,
        Self::SoftwareReplacePercent,
        Self::PricePerAgent,
        Self::HoursPerWeekPerAgent,
        Self::CostPerHour,
        Self::AfterTimePercent,
        Self::AssistantPerAgent,
        Self::MarketingPerAgent,
        Self::HumanReplacePercent,
        Self::PayingClients,
        Self::AnnualPricePerClient,
        Self::ArrMultiple,
        Self::SamPercent,
        Self::SomPercent,
    ];

    /// Snake-case key used in scenario files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::NumberOfAgents => "number_of_agents",
            Self::DealsPerYearTop => "deals_per_year_top",
            Self::DealsPerYearLow => "deals_per_year_low",
            Self::TopPerformerRatio => "top_performer_ratio",
            Self::AvgPropertyValue => "avg_property_value",
            Self::CommissionRate => "commission_rate",
            Self::TopSegmentUplift => "top_segment_uplift",
            Self::LowSegmentUplift => "low_segment_uplift",
            Self::BaselineSoftwarePercent => "baseline_software_percent",
            Self::SoftwareReplacePercent => "software_replace_percent",
            Self::PricePerAgent => "price_per_agent",
            Self::HoursPerWeekPerAgent => "hours_per_week_per_agent",
            Self::CostPerHour => "cost_per_hour",
            Self::AfterTimePercent => "after_time_percent",
            Self::AssistantPerAgent => "assistant_per_agent",
            Self::MarketingPerAgent => "marketing_per_agent",
            Self::HumanReplacePercent => "human_replace_percent",
            Self::PayingClients => "paying_clients",
            Self::AnnualPricePerClient => "annual_price_per_client",
            Self::ArrMultiple => "arr_multiple",
            Self::SamPercent => "sam_percent",
            Self::SomPercent => "som_percent",
        }
    }

    /// Form label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NumberOfAgents => "Number of agents",
            Self::DealsPerYearTop => "Deals/year - Top performers",
            Self::DealsPerYearLow => "Deals/year - Low performers",
            Self::TopPerformerRatio => "Top performer ratio",
            Self::AvgPropertyValue => "Average property value",
            Self::CommissionRate => "Commission rate",
            Self::TopSegmentUplift => "Top segment uplift",
            Self::LowSegmentUplift => "Low segment uplift",
            Self::BaselineSoftwarePercent => "Baseline spend as % of revenue",
            Self::SoftwareReplacePercent => "% replaced by Listedit",
            Self::PricePerAgent => "Listedit annual price per agent",
            Self::HoursPerWeekPerAgent => "Hours/week per agent",
            Self::CostPerHour => "Cost/hour",
            Self::AfterTimePercent => "After time as % of baseline",
            Self::AssistantPerAgent => "Assistant per agent (annual)",
            Self::MarketingPerAgent => "Marketing assistant (VA) per agent (annual)",
            Self::HumanReplacePercent => "Human replacement %",
            Self::PayingClients => "Number of paying clients",
            Self::AnnualPricePerClient => "Annual price per client",
            Self::ArrMultiple => "ARR multiple",
            Self::SamPercent => "SAM %",
            Self::SomPercent => "SOM %",
        }
    }

    /// Form section the field belongs to.
    pub fn group(&self) -> FieldGroup {
        match self {
            Self::NumberOfAgents => FieldGroup::General,
            Self::DealsPerYearTop
            | Self::DealsPerYearLow
            | Self::TopPerformerRatio
            | Self::AvgPropertyValue
            | Self::CommissionRate
            | Self::TopSegmentUplift
            | Self::LowSegmentUplift => FieldGroup::Revenue,
            Self::BaselineSoftwarePercent | Self::SoftwareReplacePercent | Self::PricePerAgent => {
                FieldGroup::Software
            }
            Self::HoursPerWeekPerAgent | Self::CostPerHour | Self::AfterTimePercent => {
                FieldGroup::RepetitiveTasks
            }
            Self::AssistantPerAgent | Self::MarketingPerAgent | Self::HumanReplacePercent => {
                FieldGroup::HumanCosts
            }
            Self::PayingClients
            | Self::AnnualPricePerClient
            | Self::ArrMultiple
            | Self::SamPercent
            | Self::SomPercent => FieldGroup::Valuation,
        }
    }

    /// Input bounds applied by the form.
    pub fn bounds(&self) -> FieldBounds {
        match self {
            Self::NumberOfAgents => FieldBounds {
                min: 1.0,
                max: None,
            },
            Self::HoursPerWeekPerAgent => FieldBounds {
                min: 0.0,
                max: Some(168.0),
            },
            field if field.is_percentage() => FieldBounds::PERCENT,
            _ => FieldBounds::NON_NEGATIVE,
        }
    }

    /// Whether the field is expressed in percent.
    pub fn is_percentage(&self) -> bool {
        matches!(
            self,
            Self::TopPerformerRatio
                | Self::CommissionRate
                | Self::TopSegmentUplift
                | Self::LowSegmentUplift
                | Self::BaselineSoftwarePercent
                | Self::SoftwareReplacePercent
                | Self::AfterTimePercent
                | Self::HumanReplacePercent
                | Self::SamPercent
                | Self::SomPercent
        )
    }

    /// Whether the field only takes whole numbers.
    pub fn is_integral(&self) -> bool {
        matches!(self, Self::NumberOfAgents)
    }

    /// Clamps `value` into this field's bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        self.bounds().clamp(value)
    }

    /// Parses user text the way the form does: thousands separators and
    /// currency symbols are stripped, then the result is clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use pitch_core::types::ScenarioField;
    ///
    /// let field = ScenarioField::AvgPropertyValue;
    /// assert_eq!(field.parse_value("A$850,000").unwrap(), 850_000.0);
    /// assert_eq!(ScenarioField::CommissionRate.parse_value("140").unwrap(), 100.0);
    /// ```
    pub fn parse_value(&self, text: &str) -> Result<f64, ScenarioError> {
        let cleaned: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        let value: f64 = cleaned
            .parse()
            .map_err(|_| ScenarioError::invalid_value(self.key(), text))?;
        if !value.is_finite() {
            return Err(ScenarioError::invalid_value(self.key(), text));
        }
        Ok(self.clamp(value))
    }
}

fn compact(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

impl FromStr for ScenarioField {
    type Err = ScenarioError;

    /// Accepts snake_case keys, the dashboard's camelCase names and a few
    /// short aliases (case-insensitive).
    fn from_str(s: &str) -> Result<Self, ScenarioError> {
        let wanted = compact(s);
        if let Some(field) = Self::ALL.iter().find(|f| compact(f.key()) == wanted) {
            return Ok(*field);
        }
        match wanted.as_str() {
            "agents" => Ok(Self::NumberOfAgents),
            "listeditpriceperagent" | "seatprice" => Ok(Self::PricePerAgent),
            "multiple" => Ok(Self::ArrMultiple),
            "sam" => Ok(Self::SamPercent),
            "som" => Ok(Self::SomPercent),
            _ => Err(ScenarioError::UnknownField(s.to_string())),
        }
    }
}

impl fmt::Display for ScenarioField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
