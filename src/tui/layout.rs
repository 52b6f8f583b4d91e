//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::runtime::{App, Focus, Status};
use super::style;
use crate::clock::Clock;
use crate::ledger::{HISTORY_CAPACITY, LedgerSnapshot};

/// Renders the full TUI frame.
pub fn render<C: Clock>(frame: &mut Frame, app: &App<C>) {
    let snapshot = app.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // stat cards
            Constraint::Length(3), // sell / buy inputs
            Constraint::Min(5),    // transactions
            Constraint::Length(1), // status
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_cards(frame, &snapshot, chunks[1]);
    render_inputs(frame, app, chunks[2]);
    render_transactions(frame, &snapshot, chunks[3]);
    render_status(frame, app, chunks[4]);
    render_footer(frame, chunks[5]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " ENERGY CREDITS ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Sell stored energy for points, spend points on energy "),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Credits, stored energy, estimated value.
fn render_cards(frame: &mut Frame, snapshot: &LedgerSnapshot, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let cards = [
        (
            " Credits ",
            format!("{} pts", snapshot.credit_points),
            style::CREDITS_COLOR,
        ),
        (
            " Stored Energy ",
            format!("{} kWh", snapshot.stored_energy_kwh),
            style::ENERGY_COLOR,
        ),
        (
            " Estimated Value ",
            format!("≈ {} kWh", snapshot.estimated_value_kwh),
            style::VALUE_COLOR,
        ),
    ];

    for ((title, value, color), area) in cards.into_iter().zip(chunks.iter()) {
        let card = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(card, *area);
    }
}

fn render_inputs<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let sell_quote = app
        .sell_quote()
        .map_or_else(|| "—".to_string(), |p| format!("+{p} pts"));
    let buy_quote = app
        .buy_quote()
        .map_or_else(|| "—".to_string(), |k| format!("+{k} kWh"));

    let boxes = [
        (
            " Sell (kWh) ",
            &app.sell_input,
            sell_quote,
            style::SELL_COLOR,
            app.focus == Focus::Sell,
        ),
        (
            " Buy (points) ",
            &app.buy_input,
            buy_quote,
            style::BUY_COLOR,
            app.focus == Focus::Buy,
        ),
    ];

    for ((title, input, quote, color, focused), area) in boxes.into_iter().zip(chunks.iter()) {
        let cursor = if focused { "▏" } else { "" };
        let line = Line::from(vec![
            Span::raw(format!(" {input}{cursor}")),
            Span::raw("  → "),
            Span::styled(quote, Style::default().fg(color)),
        ]);
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(style::input_border(focused));
        frame.render_widget(Paragraph::new(line).block(block), *area);
    }
}

/// Recent transactions, newest first.
fn render_transactions(frame: &mut Frame, snapshot: &LedgerSnapshot, area: Rect) {
    let lines: Vec<Line> = if snapshot.transactions.is_empty() {
        vec![Line::from("  No transactions yet")]
    } else {
        snapshot
            .transactions
            .iter()
            .map(|tx| {
                Line::from(Span::styled(
                    format!("  {tx}"),
                    Style::default().fg(style::kind_color(tx.kind)),
                ))
            })
            .collect()
    };

    let title = format!(
        " Recent Transactions ({}/{HISTORY_CAPACITY}) ",
        snapshot.transactions.len()
    );
    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status<C: Clock>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let line = match &app.status {
        Some(Status::Info(msg)) => Line::from(format!(" {msg}")),
        Some(Status::Error(msg)) => Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(style::ERROR_COLOR),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " Tab:Switch  0-9/.:Amount  Enter:Submit  Bksp:Delete  e:Export CSV  q:Quit",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
