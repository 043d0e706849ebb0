//! Display currencies for scenario figures.
//!
//! The dashboard quotes every monetary figure in one of three currencies.
//! The currency only affects how numbers are labelled; no conversion is
//! applied anywhere in the engine.
//!
//! # Examples
//!
//! ```
//! use pitch_core::types::currency::Currency;
//!
//! let aud = Currency::AUD;
//! assert_eq!(aud.code(), "AUD");
//! assert_eq!(aud.symbol(), "A$");
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// Closed set of display currencies.
///
/// # Variants
/// - `AUD`: Australian Dollar, shown as `A$`
/// - `NZD`: New Zealand Dollar, shown as `NZ$`
/// - `USD`: United States Dollar, shown as `$`
///
/// # Examples
///
/// ```
/// use pitch_core::types::currency::Currency;
///
/// let nzd: Currency = "nzd".parse().unwrap();
/// assert_eq!(nzd, Currency::NZD);
/// assert_eq!(nzd.symbol(), "NZ$");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// Australian Dollar
    #[default]
    AUD,

    /// New Zealand Dollar
    NZD,

    /// United States Dollar
    USD,
}

impl Currency {
    /// All supported currencies in display order.
    pub const ALL: [Currency; 3] = [Currency::AUD, Currency::NZD, Currency::USD];

    /// Returns the ISO 4217 three-letter currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::AUD => "AUD",
            Currency::NZD => "NZD",
            Currency::USD => "USD",
        }
    }

    /// Returns the symbol prefixed to formatted amounts.
    ///
    /// # Examples
    ///
    /// ```
    /// use pitch_core::types::currency::Currency;
    ///
    /// assert_eq!(Currency::AUD.symbol(), "A$");
    /// assert_eq!(Currency::NZD.symbol(), "NZ$");
    /// assert_eq!(Currency::USD.symbol(), "$");
    /// ```
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::AUD => "A$",
            Currency::NZD => "NZ$",
            Currency::USD => "$",
        }
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses a currency code (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        match s.trim().to_uppercase().as_str() {
            "AUD" => Ok(Currency::AUD),
            "NZD" => Ok(Currency::NZD),
            "USD" => Ok(Currency::USD),
            _ => Err(CurrencyError::UnknownCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
