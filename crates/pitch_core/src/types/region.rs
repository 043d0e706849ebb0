//! Real-estate agent populations by region.
//!
//! These figures size the addressable market. They are fixed reference
//! data, not scenario inputs.

use std::fmt;
use std::str::FromStr;

use super::error::ScenarioError;

/// Markets with a known agent population.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// New Zealand
    NZ,
    /// Australia
    AUS,
    /// Canada
    CAN,
    /// United Kingdom
    UK,
    /// United States
    US,
    /// Ireland
    Ireland,
}

impl Region {
    /// All regions in table order.
    pub const ALL: [Region; 6] = [
        Region::NZ,
        Region::AUS,
        Region::CAN,
        Region::UK,
        Region::US,
        Region::Ireland,
    ];

    /// Licensed agent population.
    pub const fn agent_count(&self) -> u64 {
        match self {
            Region::NZ => 16_051,
            Region::AUS => 142_000,
            Region::CAN => 160_000,
            Region::UK => 18_700,
            Region::US => 1_500_000,
            Region::Ireland => 6_200,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Region::NZ => "NZ",
            Region::AUS => "AUS",
            Region::CAN => "CAN",
            Region::UK => "UK",
            Region::US => "US",
            Region::Ireland => "Ireland",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sum of agent populations over every region.
///
/// # Examples
///
/// ```
/// use pitch_core::types::region::total_agent_count;
///
/// assert_eq!(total_agent_count(), 1_842_951);
/// ```
pub fn total_agent_count() -> u64 {
    RegionScope::Global.agent_count()
}

/// Which slice of the table a market-size view covers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RegionScope {
    /// Every region
    #[default]
    Global,
    /// New Zealand and Australia
    Anz,
}

impl RegionScope {
    /// Regions included in the scope.
    pub fn regions(&self) -> &'static [Region] {
        match self {
            RegionScope::Global => &Region::ALL,
            RegionScope::Anz => &[Region::NZ, Region::AUS],
        }
    }

    /// Agent population across the scope.
    pub fn agent_count(&self) -> u64 {
        self.regions().iter().map(Region::agent_count).sum()
    }
}

impl FromStr for RegionScope {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, ScenarioError> {
        match s.trim().to_lowercase().as_str() {
            "global" | "all" => Ok(RegionScope::Global),
            "anz" => Ok(RegionScope::Anz),
            other => Err(ScenarioError::parse(format!(
                "unknown region scope '{}', expected global or anz",
                other
            ))),
        }
    }
}

impl fmt::Display for RegionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionScope::Global => f.write_str("Global"),
            RegionScope::Anz => f.write_str("ANZ"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_agent_count() {
        let sum: u64 = Region::ALL.iter().map(|r| r.agent_count()).sum();
        assert_eq!(sum, 1_842_951);
        assert_eq!(total_agent_count(), sum);
    }

    #[test]
    fn test_anz_scope() {
        assert_eq!(RegionScope::Anz.agent_count(), 158_051);
        assert_eq!(RegionScope::Anz.regions().len(), 2);
    }

    #[test]
    fn test_scope_parse() {
        assert_eq!("ANZ".parse::<RegionScope>().unwrap(), RegionScope::Anz);
        assert_eq!(" global".parse::<RegionScope>().unwrap(), RegionScope::Global);
        assert!("emea".parse::<RegionScope>().is_err());
    }
}
