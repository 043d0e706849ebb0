//! Error types for the engine's auxiliary views.
//!
//! `compute_metrics` and `normalize_allocation` are total and never fail.
//! Only helpers that take shape parameters, such as the valuation curve,
//! or names, such as quick wins, can reject their input.

use thiserror::Error;

/// Engine error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Curve step of zero would never terminate.
    #[error("Invalid step: must be greater than zero")]
    InvalidStep,

    /// Curve range is inverted.
    #[error("Invalid range: base {base} exceeds max {max}")]
    InvalidRange {
        /// Lower end requested
        base: u64,
        /// Upper end requested
        max: u64,
    },

    /// Curve would hold more points than the engine will build.
    #[error("Too many curve points: {requested} requested, limit is {limit}")]
    TooManyPoints {
        /// Points the range and step describe
        requested: u64,
        /// Largest curve allowed
        limit: u64,
    },

    /// Quick-win name not recognised.
    #[error("Unknown quick win: {0}")]
    UnknownQuickWin(String),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
