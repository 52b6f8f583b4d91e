//! Color constants and style helpers for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::ledger::TransactionKind;

/// Credits card color.
pub const CREDITS_COLOR: Color = Color::Cyan;
/// Stored energy card color.
pub const ENERGY_COLOR: Color = Color::Green;
/// Estimated value card color.
pub const VALUE_COLOR: Color = Color::Magenta;
/// Sell rows and sell quote.
pub const SELL_COLOR: Color = Color::Green;
/// Buy rows and buy quote.
pub const BUY_COLOR: Color = Color::Yellow;
/// Status line color after a rejection.
pub const ERROR_COLOR: Color = Color::Red;
/// Border of the focused input.
pub const FOCUS_COLOR: Color = Color::Cyan;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Returns the row color for a transaction kind.
pub fn kind_color(kind: TransactionKind) -> Color {
    match kind {
        TransactionKind::Sell => SELL_COLOR,
        TransactionKind::Buy => BUY_COLOR,
    }
}

/// Border style for an input box.
pub fn input_border(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(FOCUS_COLOR)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(FOOTER_FG)
    }
}
