//! Boundary validation for user-entered quantities.
//!
//! Presentation layers hand over free text (or loosely typed numbers); these
//! functions turn it into validated amounts before the ledger sees it. Zero,
//! negative, and non-finite values are rejected with
//! [`LedgerError::InvalidAmount`] rather than silently ignored.

use super::error::{LedgerError, LedgerResult};
use super::types::MAX_STORED_ENERGY_KWH;

/// Checks that a kWh amount is finite, strictly positive, and no larger than
/// [`MAX_STORED_ENERGY_KWH`].
///
/// # Errors
///
/// Returns [`LedgerError::InvalidAmount`] for NaN, infinities, zero, negatives,
/// or amounts above the storage bound.
pub fn require_positive_kwh(amount_kwh: f64) -> LedgerResult<f64> {
    if !amount_kwh.is_finite() {
        return Err(LedgerError::invalid_amount(format!(
            "{amount_kwh} is not a finite kWh amount"
        )));
    }
    if amount_kwh <= 0.0 {
        return Err(LedgerError::invalid_amount(format!(
            "kWh amount must be > 0, got {amount_kwh}"
        )));
    }
    if amount_kwh > MAX_STORED_ENERGY_KWH {
        return Err(LedgerError::invalid_amount(format!(
            "kWh amount must be <= {MAX_STORED_ENERGY_KWH}, got {amount_kwh}"
        )));
    }
    Ok(amount_kwh)
}

/// Checks that a point amount is strictly positive and returns it unsigned.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidAmount`] for zero or negatives.
pub fn require_positive_points(points: i64) -> LedgerResult<u64> {
    u64::try_from(points)
        .ok()
        .filter(|&p| p > 0)
        .ok_or_else(|| LedgerError::invalid_amount(format!("points must be > 0, got {points}")))
}

/// Parses free-text kWh input (`"5"`, `" 2.5 "`).
///
/// # Errors
///
/// Returns [`LedgerError::InvalidAmount`] if the text is not a number or
/// fails [`require_positive_kwh`].
pub fn parse_kwh(raw: &str) -> LedgerResult<f64> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| LedgerError::invalid_amount(format!("\"{trimmed}\" is not a number")))?;
    require_positive_kwh(value)
}

/// Parses free-text point input. Only whole numbers are accepted.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidAmount`] if the text is not an integer or
/// fails [`require_positive_points`].
pub fn parse_points(raw: &str) -> LedgerResult<i64> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| LedgerError::invalid_amount(format!("\"{trimmed}\" is not a whole number")))?;
    require_positive_points(value)?;
    Ok(value)
}
