//! # pitch_engine: Scenario Projections for the Listedit Pitch Deck
//!
//! ## Layer 2 (Projection) Role
//!
//! pitch_engine turns a [`ScenarioState`](pitch_core::types::ScenarioState)
//! into everything the deck displays:
//! - Before/after metrics (`metrics::compute_metrics`)
//! - Allocation rebalancing (`allocation::normalize_allocation`)
//! - The comparison table (`comparison`)
//! - Market sizing and the valuation curve (`valuation`)
//! - Recommendations, insights and quick wins (`recommendations`)
//! - A command reducer and a store that keeps metrics current (`store`)
//!
//! The metrics engine and the normaliser are pure and total. Only the
//! valuation curve validates its shape parameters (`error::EngineError`).
//!
//! ## Usage Examples
//!
//! ```rust
//! use pitch_core::types::{AllocationBucket, ScenarioCommand, ScenarioField};
//! use pitch_engine::store::ScenarioStore;
//!
//! let mut store = ScenarioStore::new();
//! store.dispatch(ScenarioCommand::set_field(ScenarioField::NumberOfAgents, 400.0));
//! store.dispatch(ScenarioCommand::set_allocation(AllocationBucket::Team, 50.0));
//!
//! assert_eq!(store.metrics().top_agents + store.metrics().low_agents, 400);
//! assert!(store.state().allocation.is_balanced());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisation for metrics and derived views

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod allocation;
pub mod comparison;
pub mod error;
pub mod metrics;
pub mod recommendations;
pub mod store;
pub mod valuation;

pub use allocation::normalize_allocation;
pub use error::{EngineError, EngineResult};
pub use metrics::{compute_metrics, CalculatedMetrics};
pub use store::ScenarioStore;
