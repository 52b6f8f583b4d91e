//! Ledger error model.

use thiserror::Error;

/// Result type used by ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Recoverable rejection of a ledger operation.
///
/// A rejected operation never partially applies: balances and history are
/// left exactly as they were.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    /// A sell requested more energy than is currently stored.
    #[error("insufficient stored energy: requested {requested_kwh} kWh, {available_kwh} kWh available")]
    InsufficientEnergy {
        requested_kwh: f64,
        available_kwh: f64,
    },

    /// A buy requested more points than are currently held.
    #[error("insufficient credits: requested {requested_points} pts, {available_points} pts available")]
    InsufficientCredits {
        requested_points: u64,
        available_points: u64,
    },

    /// Input was non-numeric, non-finite, or not strictly positive.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

impl LedgerError {
    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }
}
