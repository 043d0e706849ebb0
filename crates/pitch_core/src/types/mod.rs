//! Scenario input types.
//!
//! This module provides:
//! - `currency`: the three display currencies and their symbols
//! - `allocation`: the seven investment buckets and their shares
//! - `field`: the catalogue of numeric inputs with labels and bounds
//! - `state`: the scenario record and the commands that mutate it
//! - `region`: fixed agent populations used to size the market
//! - `error`: input-layer error types
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod allocation;
pub mod currency;
pub mod error;
pub mod field;
pub mod region;
pub mod state;

pub use allocation::{Allocation, AllocationBucket, BALANCE_TOLERANCE};
pub use currency::Currency;
pub use error::{CurrencyError, ScenarioError};
pub use field::{FieldBounds, FieldGroup, ScenarioField};
pub use region::{Region, RegionScope};
pub use state::{ScenarioCommand, ScenarioState};
