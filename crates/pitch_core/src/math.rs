//! Rounding and ratio helpers shared by the engine and the input layer.
//!
//! Rounding follows the dashboard's convention: halves round towards
//! positive infinity (`2.5 -> 3`, `-2.5 -> -2`), which differs from
//! [`f64::round`] for negative halves.

/// Rounds to the nearest integer, halves towards positive infinity.
///
/// # Examples
///
/// ```
/// use pitch_core::math::round_half_up;
///
/// assert_eq!(round_half_up(9.5), 10.0);
/// assert_eq!(round_half_up(-2.5), -2.0);
/// assert_eq!(round_half_up(0.49), 0.0);
/// ```
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    // Compare the fractional part instead of adding 0.5, which can round
    // up just below a half and past odd integers above 2^52.
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Rounds to `places` decimal places using [`round_half_up`].
///
/// Non-finite input maps to `0.0` so downstream displays never see NaN.
///
/// # Examples
///
/// ```
/// use pitch_core::math::round_to_places;
///
/// assert_eq!(round_to_places(16.666_666, 2), 16.67);
/// assert_eq!(round_to_places(f64::NAN, 2), 0.0);
/// ```
pub fn round_to_places(x: f64, places: u32) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    let scale = 10f64.powi(places as i32);
    round_half_up(x * scale) / scale
}

/// Divides `numerator` by `denominator`, `None` when the denominator is zero.
#[inline]
pub fn checked_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Expresses `part` as a percentage of `whole`, `None` when `whole` is zero.
///
/// # Examples
///
/// ```
/// use pitch_core::math::percentage_of;
///
/// assert_eq!(percentage_of(25.0, 200.0), Some(12.5));
/// assert_eq!(percentage_of(25.0, 0.0), None);
/// ```
#[inline]
pub fn percentage_of(part: f64, whole: f64) -> Option<f64> {
    checked_ratio(part, whole).map(|r| r * 100.0)
}
