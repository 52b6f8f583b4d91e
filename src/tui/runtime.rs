//! Dashboard application state.

use std::path::PathBuf;

use crate::clock::{Clock, SystemClock};
use crate::ledger::input::{parse_kwh, parse_points};
use crate::ledger::{LedgerSnapshot, TransactionKind, quote_buy_kwh, quote_sell_points};
use crate::session::Session;

/// Longest text accepted in an amount field.
const MAX_INPUT_LEN: usize = 12;

/// Which amount field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sell,
    Buy,
}

/// Outcome shown on the status line.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// TUI application state.
pub struct App<C: Clock = SystemClock> {
    /// The ledger being edited.
    session: Session<C>,
    /// Where `e` writes the history CSV.
    export_path: PathBuf,
    /// Field receiving input.
    pub focus: Focus,
    /// Raw text of the sell field (kWh).
    pub sell_input: String,
    /// Raw text of the buy field (points).
    pub buy_input: String,
    /// Result of the last action, if any.
    pub status: Option<Status>,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl<C: Clock> App<C> {
    pub fn new(session: Session<C>, export_path: PathBuf) -> Self {
        Self {
            session,
            export_path,
            focus: Focus::Sell,
            sell_input: String::new(),
            buy_input: String::new(),
            status: None,
            quit: false,
        }
    }

    /// Current balances and history for rendering.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.session.snapshot()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sell => Focus::Buy,
            Focus::Buy => Focus::Sell,
        };
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            Focus::Sell => &mut self.sell_input,
            Focus::Buy => &mut self.buy_input,
        }
    }

    /// Appends a digit or decimal point to the focused field.
    pub fn push_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.') {
            return;
        }
        let input = self.focused_input();
        if input.len() < MAX_INPUT_LEN {
            input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.focused_input().pop();
    }

    /// Submits the focused field as a sell or buy.
    ///
    /// A committed trade clears the field; a rejected one leaves it for editing.
    pub fn submit(&mut self) {
        let result = match self.focus {
            Focus::Sell => self.session.sell_input(&self.sell_input),
            Focus::Buy => self.session.buy_input(&self.buy_input),
        }
        .map(|tx| match tx.kind {
            TransactionKind::Sell => format!(
                "Sold {} kWh for {} pts",
                tx.energy_delta_kwh, tx.points_delta
            ),
            TransactionKind::Buy => format!(
                "Bought {} kWh for {} pts",
                -tx.energy_delta_kwh,
                -tx.points_delta
            ),
        });

        match result {
            Ok(message) => {
                self.focused_input().clear();
                self.status = Some(Status::Info(message));
            }
            Err(e) => self.status = Some(Status::Error(e.to_string())),
        }
    }

    /// Writes the history CSV to the export path.
    pub fn export(&mut self) {
        self.status = Some(match self.session.export_history(&self.export_path) {
            Ok(()) => Status::Info(format!("Exported to {}", self.export_path.display())),
            Err(e) => Status::Error(format!("export failed: {e}")),
        });
    }

    /// Points the sell field would earn, if it holds a valid amount.
    pub fn sell_quote(&self) -> Option<u64> {
        parse_kwh(&self.sell_input)
            .and_then(quote_sell_points)
            .ok()
    }

    /// kWh the buy field would yield, if it holds a valid amount.
    pub fn buy_quote(&self) -> Option<f64> {
        parse_points(&self.buy_input)
            .and_then(quote_buy_kwh)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::clock::SteppingClock;
    use crate::ledger::LedgerState;

    fn make_app(credits: u64, energy: f64) -> App<SteppingClock> {
        let start = NaiveDate::from_ymd_opt(2025, 10, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let state = LedgerState::with_balances(credits, energy).unwrap();
        let session = Session::new(state, SteppingClock::new(start, 60));
        App::new(session, std::env::temp_dir().join("tui-runtime-test.csv"))
    }

    fn type_text(app: &mut App<SteppingClock>, text: &str) {
        for c in text.chars() {
            app.push_char(c);
        }
    }

    #[test]
    fn sell_submit_commits_and_clears_input() {
        let mut app = make_app(1200, 48.0);
        type_text(&mut app, "5");
        assert_eq!(app.sell_quote(), Some(125));

        app.submit();

        let snap = app.snapshot();
        assert_eq!(snap.credit_points, 1325);
        assert_eq!(snap.stored_energy_kwh, 43.0);
        assert!(app.sell_input.is_empty());
        assert_eq!(
            app.status,
            Some(Status::Info("Sold 5 kWh for 125 pts".to_string()))
        );
    }

    #[test]
    fn rejected_buy_keeps_input_and_reports_error() {
        let mut app = make_app(100, 10.0);
        app.toggle_focus();
        type_text(&mut app, "500");
        assert_eq!(app.buy_quote(), Some(20.0));

        app.submit();

        assert_eq!(app.buy_input, "500");
        assert!(matches!(app.status, Some(Status::Error(_))));
        assert_eq!(app.snapshot().credit_points, 100);
        assert!(app.snapshot().transactions.is_empty());
    }

    #[test]
    fn empty_submit_is_rejected() {
        let mut app = make_app(100, 10.0);
        app.submit();
        assert!(matches!(app.status, Some(Status::Error(_))));
        assert!(app.snapshot().transactions.is_empty());
    }

    #[test]
    fn only_digits_and_dot_are_accepted() {
        let mut app = make_app(0, 0.0);
        type_text(&mut app, "1a2.-5");
        assert_eq!(app.sell_input, "12.5");
        app.backspace();
        assert_eq!(app.sell_input, "12.");
    }

    #[test]
    fn input_length_is_capped() {
        let mut app = make_app(0, 0.0);
        type_text(&mut app, &"9".repeat(MAX_INPUT_LEN + 5));
        assert_eq!(app.sell_input.len(), MAX_INPUT_LEN);
    }

    #[test]
    fn quotes_are_none_for_invalid_text() {
        let mut app = make_app(0, 0.0);
        assert_eq!(app.sell_quote(), None);
        type_text(&mut app, "0");
        assert_eq!(app.sell_quote(), None);

        app.toggle_focus();
        type_text(&mut app, "2.5");
        assert_eq!(app.buy_quote(), None);
    }

    #[test]
    fn sell_quote_is_none_beyond_storage_bound() {
        let mut app = make_app(0, 0.0);
        type_text(&mut app, "999999999999");
        assert_eq!(app.sell_quote(), Some(24_999_999_999_975));
        app.sell_input = "4000000000000".to_string();
        assert_eq!(app.sell_quote(), None);
    }

    #[test]
    fn toggle_focus_alternates() {
        let mut app = make_app(0, 0.0);
        assert_eq!(app.focus, Focus::Sell);
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Buy);
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Sell);
    }
}
