//! Error types for the input layer.
//!
//! The metrics engine and the allocation normaliser are total and never
//! return errors. Failures only arise while turning user text into typed
//! inputs:
//! - `CurrencyError`: unknown currency codes
//! - `ScenarioError`: unknown field or bucket names and unparsable values

use thiserror::Error;

/// Currency-related errors.
///
/// # Examples
/// ```
/// use pitch_core::types::CurrencyError;
///
/// let err = CurrencyError::UnknownCurrency("EUR".to_string());
/// assert_eq!(format!("{}", err), "Unknown currency: EUR (expected AUD, NZD or USD)");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Currency code outside the supported set.
    #[error("Unknown currency: {0} (expected AUD, NZD or USD)")]
    UnknownCurrency(String),
}

/// Errors raised while parsing scenario edits.
///
/// # Variants
/// - `UnknownField`: name does not match any scenario input
/// - `UnknownBucket`: name does not match any allocation bucket
/// - `InvalidValue`: value text is not a finite number
/// - `Parse`: malformed `field=value` assignment
///
/// # Examples
/// ```
/// use pitch_core::types::ScenarioError;
///
/// let err = ScenarioError::UnknownField("agentz".to_string());
/// assert_eq!(format!("{}", err), "Unknown scenario field: agentz");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    /// Field name not recognised.
    #[error("Unknown scenario field: {0}")]
    UnknownField(String),

    /// Allocation bucket name not recognised.
    #[error("Unknown allocation bucket: {0}")]
    UnknownBucket(String),

    /// Value could not be parsed as a finite number.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// Field the value was meant for
        field: String,
        /// Offending value text
        value: String,
    },

    /// Assignment text is malformed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Currency failure surfaced through a scenario edit.
    #[error(transparent)]
    Currency(#[from] CurrencyError),
}

impl ScenarioError {
    /// Create an invalid value error.
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
