//! Time sources for stamping transactions.

use std::cell::Cell;

use chrono::{Local, NaiveDateTime, SubsecRound, TimeDelta};

/// Supplies the creation time for new transactions.
pub trait Clock {
    /// Current wall time, whole seconds.
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(0)
    }
}

/// Deterministic clock that advances by a fixed step on every reading.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use energy_credits::clock::{Clock, SteppingClock};
///
/// let start = NaiveDate::from_ymd_opt(2025, 10, 1)
///     .and_then(|d| d.and_hms_opt(8, 0, 0))
///     .unwrap();
/// let clock = SteppingClock::new(start, 60);
/// assert_eq!(clock.now(), start);
/// assert_eq!(clock.now().format("%H:%M").to_string(), "08:01");
/// ```
#[derive(Debug, Clone)]
pub struct SteppingClock {
    next: Cell<NaiveDateTime>,
    step: TimeDelta,
}

impl SteppingClock {
    /// Creates a clock starting at `start` and advancing `step_secs` per reading.
    pub fn new(start: NaiveDateTime, step_secs: i64) -> Self {
        Self {
            next: Cell::new(start.trunc_subsecs(0)),
            step: TimeDelta::seconds(step_secs),
        }
    }

    /// A clock frozen at `at`.
    pub fn fixed(at: NaiveDateTime) -> Self {
        Self::new(at, 0)
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> NaiveDateTime {
        let current = self.next.get();
        self.next.set(current + self.step);
        current
    }
}
