//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use energy_credits::clock::SteppingClock;
use energy_credits::config::SessionConfig;
use energy_credits::ledger::LedgerState;
use energy_credits::session::Session;

/// First timestamp handed out by test clocks (2025-10-01 08:00:00).
pub fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .expect("valid fixture date")
}

/// Clock advancing one minute per transaction.
pub fn minute_clock() -> SteppingClock {
    SteppingClock::new(start(), 60)
}

/// Session with the given balances and no history.
pub fn session_with(credit_points: u64, stored_energy_kwh: f64) -> Session<SteppingClock> {
    let state = LedgerState::with_balances(credit_points, stored_energy_kwh)
        .expect("fixture balances are valid");
    Session::new(state, minute_clock())
}

/// Demo session: 1200 pts, 48 kWh, seed ids 1..=3.
pub fn demo_session() -> Session<SteppingClock> {
    let state = SessionConfig::demo()
        .build_state()
        .expect("demo preset builds");
    Session::new(state, minute_clock())
}

/// Total value held, in points: credits plus stored energy at the fixed rate.
pub fn total_value_points(state: &LedgerState) -> f64 {
    state.credit_points() as f64 + state.stored_energy_kwh() * 25.0
}
