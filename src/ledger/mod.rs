//! Energy-credit ledger: balances, conversions, and the bounded transaction log.
//!
//! Nothing in this module logs or performs I/O; see [`crate::session`] for the
//! stateful wrapper used by the CLI, API, and TUI.

pub mod error;
pub mod history;
/// Boundary parsing and validation of user-entered amounts.
pub mod input;
pub mod rounding;
pub mod state;
pub mod types;

pub use error::{LedgerError, LedgerResult};
pub use history::History;
pub use state::{LedgerState, quote_buy_kwh, quote_sell_points};
pub use types::{
    HISTORY_CAPACITY, LedgerSnapshot, MAX_STORED_ENERGY_KWH, POINTS_PER_KWH, TIMESTAMP_FORMAT,
    Transaction, TransactionKind,
};
