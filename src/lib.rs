//! Energy-credit ledger for a renewable microgrid dashboard.
//!
//! Stored energy is sold to the grid for credit points and points are spent
//! to buy energy back, at a fixed 25 points per kWh.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod clock;
pub mod config;
pub mod io;
pub mod ledger;
pub mod logging;
pub mod session;
#[cfg(feature = "tui")]
pub mod tui;
