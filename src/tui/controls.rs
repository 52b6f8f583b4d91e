//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;
use crate::clock::Clock;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key<C: Clock>(app: &mut App<C>, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Char('e') => app.export(),
        KeyCode::Char(c) => app.push_char(c),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => app.submit(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::clock::SteppingClock;
    use crate::ledger::LedgerState;
    use crate::session::Session;
    use crate::tui::runtime::Focus;

    fn press(app: &mut App<SteppingClock>, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn make_app() -> App<SteppingClock> {
        let at = NaiveDate::from_ymd_opt(2025, 10, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let state = LedgerState::with_balances(1200, 48.0).unwrap();
        App::new(
            Session::new(state, SteppingClock::fixed(at)),
            std::env::temp_dir().join("tui-controls-test.csv"),
        )
    }

    #[test]
    fn typing_and_enter_sells() {
        let mut app = make_app();
        press(&mut app, KeyCode::Char('8'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.snapshot().stored_energy_kwh, 40.0);
        assert_eq!(app.snapshot().credit_points, 1400);
    }

    #[test]
    fn tab_then_enter_buys() {
        let mut app = make_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Buy);
        for c in "200".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.snapshot().credit_points, 1000);
        assert_eq!(app.snapshot().stored_energy_kwh, 56.0);
    }

    #[test]
    fn quit_keys() {
        let mut app = make_app();
        press(&mut app, KeyCode::Esc);
        assert!(app.quit);

        let mut app = make_app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.quit);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = make_app();
        let mut key = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(app.sell_input.is_empty());
    }
}
