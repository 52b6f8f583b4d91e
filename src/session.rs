//! Stateful ledger session used by the CLI, API, and TUI.
//!
//! Owns exactly one [`LedgerState`] and swaps it for the successor state only
//! when a transition succeeds, so balance and history updates are
//! all-or-nothing. This is also the layer that logs.

use std::path::Path;

use tracing::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::io::export::{self, ExportError};
use crate::ledger::input::{parse_kwh, parse_points};
use crate::ledger::{LedgerError, LedgerResult, LedgerSnapshot, LedgerState, Transaction};

/// One user's ledger plus the clock that stamps its transactions.
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    state: LedgerState,
    clock: C,
}

impl Session<SystemClock> {
    /// Creates a session stamped with local wall-clock time.
    pub fn with_system_clock(state: LedgerState) -> Self {
        Self::new(state, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn new(state: LedgerState, clock: C) -> Self {
        Self { state, clock }
    }

    /// Current ledger state.
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.snapshot()
    }

    /// Sells `amount_kwh` of stored energy and returns the recorded transaction.
    ///
    /// # Errors
    ///
    /// See [`LedgerState::sell_energy`]. The session is unchanged on error.
    pub fn sell_energy(&mut self, amount_kwh: f64) -> LedgerResult<&Transaction> {
        let result = self.state.sell_energy(amount_kwh, self.clock.now());
        self.commit("sell", result)
    }

    /// Spends `points` on stored energy and returns the recorded transaction.
    ///
    /// # Errors
    ///
    /// See [`LedgerState::buy_energy`]. The session is unchanged on error.
    pub fn buy_energy(&mut self, points: i64) -> LedgerResult<&Transaction> {
        let result = self.state.buy_energy(points, self.clock.now());
        self.commit("buy", result)
    }

    /// Parses free-text kWh input and sells it.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmount`] for unparseable input, otherwise
    /// as [`Session::sell_energy`].
    pub fn sell_input(&mut self, raw: &str) -> LedgerResult<&Transaction> {
        match parse_kwh(raw) {
            Ok(kwh) => self.sell_energy(kwh),
            Err(e) => self.reject("sell", e),
        }
    }

    /// Parses free-text point input and buys energy with it.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmount`] for unparseable input, otherwise
    /// as [`Session::buy_energy`].
    pub fn buy_input(&mut self, raw: &str) -> LedgerResult<&Transaction> {
        match parse_points(raw) {
            Ok(points) => self.buy_energy(points),
            Err(e) => self.reject("buy", e),
        }
    }

    /// Transaction history as CSV text, newest first.
    ///
    /// # Errors
    ///
    /// Returns an `ExportError` if encoding fails.
    pub fn history_csv(&self) -> Result<String, ExportError> {
        export::history_csv(self.state.history())
    }

    /// Writes the transaction history to a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an `ExportError` if the file cannot be written.
    pub fn export_history(&self, path: &Path) -> Result<(), ExportError> {
        export::export_history(self.state.history(), path)?;
        info!(
            path = %path.display(),
            rows = self.state.history().len(),
            "exported transaction history"
        );
        Ok(())
    }

    fn commit(
        &mut self,
        op: &str,
        result: LedgerResult<LedgerState>,
    ) -> LedgerResult<&Transaction> {
        match result {
            Ok(next) => {
                self.state = next;
                let tx = self
                    .state
                    .history()
                    .latest()
                    .ok_or_else(|| LedgerError::invalid_amount("transaction was not recorded"))?;
                info!(
                    op,
                    id = tx.id,
                    points = tx.points_delta,
                    kwh = tx.energy_delta_kwh,
                    credit_points = self.state.credit_points(),
                    stored_energy_kwh = self.state.stored_energy_kwh(),
                    "committed"
                );
                Ok(tx)
            }
            Err(e) => self.reject(op, e),
        }
    }

    fn reject(&self, op: &str, err: LedgerError) -> LedgerResult<&Transaction> {
        warn!(op, error = %err, "rejected");
        Err(err)
    }
}
