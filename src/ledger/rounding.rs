//! Centralized rounding and rate conversions.
//!
//! Every rounded quantity in the ledger goes through these helpers so that
//! energy-balance drift stays bounded and reproducible.

use super::types::POINTS_PER_KWH;

/// Rounds to 2 decimal places (half away from zero).
///
/// # Examples
///
/// ```
/// use energy_credits::ledger::rounding::round_to_2;
///
/// assert_eq!(round_to_2(0.1 + 0.2), 0.3);
/// assert_eq!(round_to_2(43.004), 43.0);
/// ```
pub fn round_to_2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Points earned by selling `kwh`, rounded to the nearest whole point.
///
/// Returns `None` if the result is negative, not finite, or does not fit a
/// signed point delta.
pub fn points_for_kwh(kwh: f64) -> Option<i64> {
    let points = (kwh * POINTS_PER_KWH as f64).round();
    // `i64::MAX as f64` is 2^63, the first value that no longer fits.
    (points.is_finite() && points >= 0.0 && points < i64::MAX as f64).then(|| points as i64)
}

/// Energy bought with `points`, rounded to 2 decimal places.
pub fn kwh_for_points(points: u64) -> f64 {
    round_to_2(points as f64 / POINTS_PER_KWH as f64)
}
