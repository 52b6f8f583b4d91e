//! Integration tests for CSV history export.

mod common;

use std::fs;

use energy_credits::io::export::{HEADER, read_history};
use energy_credits::ledger::TransactionKind;

#[test]
fn three_entry_history_exports_header_plus_three_rows() {
    let session = common::demo_session();

    let csv = session.history_csv().expect("export should succeed");
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], HEADER.join(","));

    let parsed: Vec<(u64, TransactionKind, i64, f64, String)> = lines[1..]
        .iter()
        .map(|line| {
            let cols: Vec<&str> = line.split(',').collect();
            assert_eq!(cols.len(), 5, "row {line:?}");
            (
                cols[0].parse().expect("id"),
                TransactionKind::from_wire(cols[1]).expect("type"),
                cols[2].parse().expect("points"),
                cols[3].parse().expect("kwh"),
                cols[4].to_string(),
            )
        })
        .collect();

    let expected: Vec<(u64, TransactionKind, i64, f64, String)> = session
        .state()
        .history()
        .iter()
        .map(|tx| (tx.id, tx.kind, tx.points_delta, tx.energy_delta_kwh, tx.date()))
        .collect();
    assert_eq!(parsed, expected);
}

#[test]
fn exported_file_reads_back_after_trading() {
    let mut session = common::demo_session();
    session.sell_input("2.25").expect("sell");
    session.buy_input("30").expect("buy");

    let path = std::env::temp_dir().join(format!(
        "energy-credits-export-{}.csv",
        std::process::id()
    ));
    session.export_history(&path).expect("file export should succeed");

    let text = fs::read_to_string(&path).expect("exported file is readable");
    let _ = fs::remove_file(&path);

    assert_eq!(text.lines().count(), 6);
    assert!(text.lines().nth(1).is_some_and(|l| l.starts_with("5,buy,-30,-1.2,")));
    assert!(text.lines().nth(2).is_some_and(|l| l.starts_with("4,sell,56,2.25,")));

    let back = read_history(text.as_bytes()).expect("round trip parses");
    assert_eq!(back, session.state().history().to_vec());
}

#[test]
fn seed_dates_gain_seconds_on_export() {
    let session = common::demo_session();
    let csv = session.history_csv().expect("export should succeed");

    let first_row = csv.lines().nth(1).expect("first row");
    assert_eq!(first_row, "1,sell,200,8,2025-09-28 09:12:00");
}

#[test]
fn empty_history_exports_header_only() {
    let session = common::session_with(10, 1.0);
    let csv = session.history_csv().expect("export should succeed");
    assert_eq!(csv, "id,type,points,kwh,date\n");
}
