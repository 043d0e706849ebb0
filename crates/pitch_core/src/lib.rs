//! # pitch_core: Scenario Inputs for the Listedit Pitch Deck
//!
//! ## Layer 1 (Foundation) Role
//!
//! pitch_core is the bottom layer of the workspace, providing:
//! - The scenario input record and its defaults (`types::state`)
//! - Typed mutation commands (`types::state::ScenarioCommand`)
//! - Allocation buckets (`types::allocation`)
//! - The field catalogue with input bounds (`types::field`)
//! - Currencies and region reference data (`types::currency`, `types::region`)
//! - Rounding helpers (`math`) and display formatting (`format`)
//!
//! It has no dependency on other workspace crates. The metrics engine and
//! the allocation normaliser live one layer up in `pitch_engine`.
//!
//! ## Usage Examples
//!
//! ```rust
//! use pitch_core::format::format_currency;
//! use pitch_core::types::{ScenarioField, ScenarioState};
//!
//! let state = ScenarioState::default().with(ScenarioField::NumberOfAgents, 150.0);
//! assert_eq!(state.number_of_agents, 150);
//! assert_eq!(format_currency(850_000.0, state.currency), "A$850,000");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisation for every public data type

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod format;
pub mod math;
pub mod types;
