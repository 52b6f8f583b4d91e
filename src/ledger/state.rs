//! Ledger state and its pure sell/buy transitions.

use chrono::{NaiveDateTime, SubsecRound};

use super::error::{LedgerError, LedgerResult};
use super::history::History;
use super::input::{require_positive_kwh, require_positive_points};
use super::rounding::{kwh_for_points, points_for_kwh, round_to_2};
use super::types::{LedgerSnapshot, MAX_STORED_ENERGY_KWH, Transaction};

/// Balances plus transaction log for one user session.
///
/// Transitions are pure: [`LedgerState::sell_energy`] and
/// [`LedgerState::buy_energy`] borrow the current state and return either a
/// new state (balances updated *and* one transaction recorded) or an error.
/// The borrowed state is never modified, so a rejected operation cannot leave a
/// half-applied state behind.
///
/// # Invariants
/// - `stored_energy_kwh` is finite, `>= 0` and `<= MAX_STORED_ENERGY_KWH`
/// - `credit_points >= 0` (by type)
/// - history holds at most 20 entries, newest first
/// - transaction ids are unique and increase with insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerState {
    credit_points: u64,
    stored_energy_kwh: f64,
    history: History,
    next_id: u64,
}

impl LedgerState {
    /// Creates a ledger with seed balances and a seed history.
    ///
    /// New transaction ids continue after the highest seed id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmount`] if `stored_energy_kwh` is
    /// negative, not finite, or above [`MAX_STORED_ENERGY_KWH`], or if the seed
    /// ids leave no room for another transaction.
    pub fn new(credit_points: u64, stored_energy_kwh: f64, seed: History) -> LedgerResult<Self> {
        let stored_energy_kwh = check_stored_energy(stored_energy_kwh)?;
        let next_id = match seed.max_id() {
            Some(max) => max.checked_add(1).ok_or_else(id_space_exhausted)?,
            None => 1,
        };
        Ok(Self {
            credit_points,
            stored_energy_kwh,
            history: seed,
            next_id,
        })
    }

    /// Creates a ledger with the given balances and an empty history.
    ///
    /// # Errors
    ///
    /// See [`LedgerState::new`].
    pub fn with_balances(credit_points: u64, stored_energy_kwh: f64) -> LedgerResult<Self> {
        Self::new(credit_points, stored_energy_kwh, History::new())
    }

    pub fn credit_points(&self) -> u64 {
        self.credit_points
    }

    pub fn stored_energy_kwh(&self) -> f64 {
        self.stored_energy_kwh
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Energy the current point balance would buy, rounded to 2 decimals.
    pub fn estimated_value_kwh(&self) -> f64 {
        kwh_for_points(self.credit_points)
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            credit_points: self.credit_points,
            stored_energy_kwh: self.stored_energy_kwh,
            estimated_value_kwh: self.estimated_value_kwh(),
            transactions: self.history.to_vec(),
        }
    }

    /// Sells `amount_kwh` of stored energy for points.
    ///
    /// Earns `round(amount_kwh * 25)` points; stored energy becomes
    /// `round_to_2(stored - amount_kwh)`. A `Sell` transaction with
    /// `+earned` points and `+amount_kwh` is recorded at the front.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] if `amount_kwh` is not finite and positive,
    ///   the credit balance would overflow, or no transaction id is left
    /// - [`LedgerError::InsufficientEnergy`] if `amount_kwh` exceeds stored energy
    pub fn sell_energy(&self, amount_kwh: f64, at: NaiveDateTime) -> LedgerResult<Self> {
        let amount_kwh = require_positive_kwh(amount_kwh)?;
        if amount_kwh > self.stored_energy_kwh {
            return Err(LedgerError::InsufficientEnergy {
                requested_kwh: amount_kwh,
                available_kwh: self.stored_energy_kwh,
            });
        }

        let earned = earned_points(amount_kwh)?;
        let credit_points = self
            .credit_points
            .checked_add(earned.unsigned_abs())
            .ok_or_else(|| LedgerError::invalid_amount("credit balance would overflow"))?;
        let stored = check_stored_energy(round_to_2(self.stored_energy_kwh - amount_kwh))?;
        let following_id = self.following_id()?;
        let tx = Transaction::sell(self.next_id, amount_kwh, earned, at.trunc_subsecs(0));

        let mut next = self.clone();
        next.credit_points = credit_points;
        next.stored_energy_kwh = stored;
        next.history.record(tx);
        next.next_id = following_id;
        Ok(next)
    }

    /// Spends `points` to buy stored energy.
    ///
    /// Buys `round_to_2(points / 25)` kWh; stored energy becomes
    /// `round_to_2(stored + bought)`. A `Buy` transaction with `-points` and
    /// `-bought` kWh is recorded at the front.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidAmount`] if `points <= 0`, stored energy would
    ///   exceed [`MAX_STORED_ENERGY_KWH`], or no transaction id is left
    /// - [`LedgerError::InsufficientCredits`] if `points` exceeds the balance
    pub fn buy_energy(&self, points: i64, at: NaiveDateTime) -> LedgerResult<Self> {
        let spent = require_positive_points(points)?;
        if spent > self.credit_points {
            return Err(LedgerError::InsufficientCredits {
                requested_points: spent,
                available_points: self.credit_points,
            });
        }

        let kwh_bought = kwh_for_points(spent);
        let stored = check_stored_energy(round_to_2(self.stored_energy_kwh + kwh_bought))?;
        let following_id = self.following_id()?;
        let tx = Transaction::buy(self.next_id, points, kwh_bought, at.trunc_subsecs(0));

        let mut next = self.clone();
        next.credit_points = self.credit_points - spent;
        next.stored_energy_kwh = stored;
        next.history.record(tx);
        next.next_id = following_id;
        Ok(next)
    }

    fn following_id(&self) -> LedgerResult<u64> {
        self.next_id.checked_add(1).ok_or_else(id_space_exhausted)
    }
}

fn id_space_exhausted() -> LedgerError {
    LedgerError::invalid_amount("transaction id space exhausted")
}

fn earned_points(amount_kwh: f64) -> LedgerResult<i64> {
    points_for_kwh(amount_kwh)
        .ok_or_else(|| LedgerError::invalid_amount("points earned would overflow"))
}

/// Stored energy must stay finite, non-negative and within the storage bound.
fn check_stored_energy(kwh: f64) -> LedgerResult<f64> {
    if kwh.is_finite() && (0.0..=MAX_STORED_ENERGY_KWH).contains(&kwh) {
        Ok(kwh)
    } else {
        Err(LedgerError::invalid_amount(format!(
            "stored energy must be within 0..={MAX_STORED_ENERGY_KWH} kWh, got {kwh}"
        )))
    }
}

/// Points a sell of `amount_kwh` would earn, without touching any state.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidAmount`] for non-positive, non-finite, or
/// out-of-range input.
pub fn quote_sell_points(amount_kwh: f64) -> LedgerResult<u64> {
    let amount_kwh = require_positive_kwh(amount_kwh)?;
    earned_points(amount_kwh).map(i64::unsigned_abs)
}

/// Energy a buy with `points` would yield, without touching any state.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidAmount`] for non-positive input.
pub fn quote_buy_kwh(points: i64) -> LedgerResult<f64> {
    require_positive_points(points).map(kwh_for_points)
}
