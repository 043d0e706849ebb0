//! Investment allocation buckets.
//!
//! The raise is split across seven named buckets whose percentages are meant
//! to sum to 100. The sum is a soft invariant: [`Allocation`] will hold any
//! values, and [`Allocation::is_balanced`] reports whether the split is
//! currently presentable. Keeping the sum at 100 is the job of the
//! normaliser in `pitch_engine::allocation`.

use std::fmt;
use std::str::FromStr;

use super::error::ScenarioError;

/// Tolerance used when deciding whether an allocation is balanced.
pub const BALANCE_TOLERANCE: f64 = 0.1;

/// One of the seven investment-use categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AllocationBucket {
    /// Team
    Team,
    /// Research and development
    #[cfg_attr(feature = "serde", serde(rename = "rnd"))]
    RnD,
    /// Partnerships and conferences
    Partnerships,
    /// Infrastructure
    Infrastructure,
    /// Compliance and legal
    Compliance,
    /// Sales and marketing
    Sales,
    /// Unallocated buffer
    Buffer,
}

impl AllocationBucket {
    /// All buckets in display order.
    pub const ALL: [AllocationBucket; 7] = [
        AllocationBucket::Team,
        AllocationBucket::RnD,
        AllocationBucket::Partnerships,
        AllocationBucket::Infrastructure,
        AllocationBucket::Compliance,
        AllocationBucket::Sales,
        AllocationBucket::Buffer,
    ];

    /// Position of the bucket in [`AllocationBucket::ALL`].
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Machine name used in scenario files and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::RnD => "rnd",
            Self::Partnerships => "partnerships",
            Self::Infrastructure => "infrastructure",
            Self::Compliance => "compliance",
            Self::Sales => "sales",
            Self::Buffer => "buffer",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Team => "Team",
            Self::RnD => "R&D",
            Self::Partnerships => "Partnerships & Conferences",
            Self::Infrastructure => "Infrastructure",
            Self::Compliance => "Compliance & Legal",
            Self::Sales => "Sales & Marketing",
            Self::Buffer => "Buffer",
        }
    }
}

impl FromStr for AllocationBucket {
    type Err = ScenarioError;

    /// Accepts the machine key, the dashboard's `allocationXxx` field name,
    /// or the label (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use pitch_core::types::AllocationBucket;
    ///
    /// assert_eq!("team".parse::<AllocationBucket>().unwrap(), AllocationBucket::Team);
    /// assert_eq!("allocationRnD".parse::<AllocationBucket>().unwrap(), AllocationBucket::RnD);
    /// assert_eq!("R&D".parse::<AllocationBucket>().unwrap(), AllocationBucket::RnD);
    /// ```
    fn from_str(s: &str) -> Result<Self, ScenarioError> {
        let normalised: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let key = normalised
            .strip_prefix("allocation")
            .unwrap_or(normalised.as_str());

        match key {
            "team" => Ok(Self::Team),
            "rnd" | "rd" | "researchanddevelopment" => Ok(Self::RnD),
            "partnerships" | "partnershipsconferences" => Ok(Self::Partnerships),
            "infrastructure" | "infra" => Ok(Self::Infrastructure),
            "compliance" | "compliancelegal" => Ok(Self::Compliance),
            "sales" | "salesmarketing" | "salesandmarketing" => Ok(Self::Sales),
            "buffer" => Ok(Self::Buffer),
            _ => Err(ScenarioError::UnknownBucket(s.to_string())),
        }
    }
}

impl fmt::Display for AllocationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentages for all seven buckets.
///
/// # Examples
///
/// ```
/// use pitch_core::types::{Allocation, AllocationBucket};
///
/// let allocation = Allocation::default();
/// assert_eq!(allocation.get(AllocationBucket::Team), 40.0);
/// assert_eq!(allocation.total(), 100.0);
/// assert!(allocation.is_balanced());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Allocation {
    /// Team share (%)
    pub team: f64,
    /// R&D share (%)
    pub rnd: f64,
    /// Partnerships & conferences share (%)
    pub partnerships: f64,
    /// Infrastructure share (%)
    pub infrastructure: f64,
    /// Compliance & legal share (%)
    pub compliance: f64,
    /// Sales & marketing share (%)
    pub sales: f64,
    /// Buffer share (%)
    pub buffer: f64,
}

impl Default for Allocation {
    fn default() -> Self {
        Self {
            team: 40.0,
            rnd: 20.0,
            partnerships: 5.0,
            infrastructure: 10.0,
            compliance: 5.0,
            sales: 15.0,
            buffer: 5.0,
        }
    }
}

impl Allocation {
    /// Allocation with every bucket at zero.
    pub fn zeroed() -> Self {
        Self::from_values([0.0; 7])
    }

    /// Builds an allocation from values in [`AllocationBucket::ALL`] order.
    pub fn from_values(values: [f64; 7]) -> Self {
        let [team, rnd, partnerships, infrastructure, compliance, sales, buffer] = values;
        Self {
            team,
            rnd,
            partnerships,
            infrastructure,
            compliance,
            sales,
            buffer,
        }
    }

    /// Values in [`AllocationBucket::ALL`] order.
    pub fn values(&self) -> [f64; 7] {
        [
            self.team,
            self.rnd,
            self.partnerships,
            self.infrastructure,
            self.compliance,
            self.sales,
            self.buffer,
        ]
    }

    /// Share held by `bucket`.
    pub fn get(&self, bucket: AllocationBucket) -> f64 {
        match bucket {
            AllocationBucket::Team => self.team,
            AllocationBucket::RnD => self.rnd,
            AllocationBucket::Partnerships => self.partnerships,
            AllocationBucket::Infrastructure => self.infrastructure,
            AllocationBucket::Compliance => self.compliance,
            AllocationBucket::Sales => self.sales,
            AllocationBucket::Buffer => self.buffer,
        }
    }

    /// Overwrites the share held by `bucket` without rebalancing.
    pub fn set(&mut self, bucket: AllocationBucket, value: f64) {
        let slot = match bucket {
            AllocationBucket::Team => &mut self.team,
            AllocationBucket::RnD => &mut self.rnd,
            AllocationBucket::Partnerships => &mut self.partnerships,
            AllocationBucket::Infrastructure => &mut self.infrastructure,
            AllocationBucket::Compliance => &mut self.compliance,
            AllocationBucket::Sales => &mut self.sales,
            AllocationBucket::Buffer => &mut self.buffer,
        };
        *slot = value;
    }

    /// Iterates `(bucket, share)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (AllocationBucket, f64)> + '_ {
        AllocationBucket::ALL.into_iter().map(move |b| (b, self.get(b)))
    }

    /// Sum of all seven shares.
    pub fn total(&self) -> f64 {
        self.values().iter().sum()
    }

    /// Signed distance of the total from 100 (`100 - total`).
    pub fn imbalance(&self) -> f64 {
        100.0 - self.total()
    }

    /// Whether the total is within [`BALANCE_TOLERANCE`] of 100.
    pub fn is_balanced(&self) -> bool {
        self.imbalance().abs() < BALANCE_TOLERANCE
    }

    /// Splits `investment` across the buckets by share.
    ///
    /// # Examples
    ///
    /// ```
    /// use pitch_core::types::{Allocation, AllocationBucket};
    ///
    /// let amounts = Allocation::default().amounts(1_500_000.0);
    /// assert_eq!(amounts[0], (AllocationBucket::Team, 600_000.0));
    /// ```
    pub fn amounts(&self, investment: f64) -> Vec<(AllocationBucket, f64)> {
        self.iter()
            .map(|(bucket, share)| (bucket, share / 100.0 * investment))
            .collect()
    }
}
