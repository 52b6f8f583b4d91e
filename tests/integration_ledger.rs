//! Integration tests for ledger operations through a session.

mod common;

use energy_credits::ledger::{HISTORY_CAPACITY, LedgerError, TransactionKind};

#[test]
fn scenario_sell_five_kwh() {
    let mut session = common::session_with(1200, 48.0);

    let tx = session.sell_energy(5.0).expect("sell should commit").clone();

    assert_eq!(tx.kind, TransactionKind::Sell);
    assert_eq!(tx.points_delta, 125);
    assert_eq!(tx.energy_delta_kwh, 5.0);
    assert_eq!(tx.timestamp, common::start());

    let state = session.state();
    assert_eq!(state.credit_points(), 1325);
    assert_eq!(state.stored_energy_kwh(), 43.0);
    assert_eq!(state.history().latest(), Some(&tx));
}

#[test]
fn scenario_buy_two_hundred_points() {
    let mut session = common::session_with(1200, 48.0);

    let tx = session.buy_energy(200).expect("buy should commit").clone();

    assert_eq!(tx.kind, TransactionKind::Buy);
    assert_eq!(tx.points_delta, -200);
    assert_eq!(tx.energy_delta_kwh, -8.0);

    let state = session.state();
    assert_eq!(state.credit_points(), 1000);
    assert_eq!(state.stored_energy_kwh(), 56.0);
    assert_eq!(state.history().latest(), Some(&tx));
}

#[test]
fn scenario_buy_with_insufficient_credits() {
    let mut session = common::session_with(100, 10.0);
    let before = session.snapshot();

    let err = session.buy_energy(500).expect_err("buy should be rejected");

    assert_eq!(
        err,
        LedgerError::InsufficientCredits {
            requested_points: 500,
            available_points: 100,
        }
    );
    assert_eq!(session.snapshot(), before);
}

#[test]
fn scenario_sell_with_insufficient_energy() {
    let mut session = common::session_with(0, 5.0);
    let before = session.snapshot();

    let err = session.sell_energy(10.0).expect_err("sell should be rejected");

    assert!(matches!(err, LedgerError::InsufficientEnergy { .. }));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn invalid_amounts_are_rejected_without_side_effects() {
    let mut session = common::session_with(500, 20.0);
    let before = session.snapshot();

    for raw in ["", "abc", "0", "-3", "NaN", "inf"] {
        let err = session.sell_input(raw).expect_err("sell input should be rejected");
        assert!(matches!(err, LedgerError::InvalidAmount(_)), "{raw:?} gave {err:?}");
    }
    for raw in ["", "2.5", "0", "-10", "1e3"] {
        let err = session.buy_input(raw).expect_err("buy input should be rejected");
        assert!(matches!(err, LedgerError::InvalidAmount(_)), "{raw:?} gave {err:?}");
    }

    assert_eq!(session.snapshot(), before);
}

#[test]
fn selling_everything_and_spending_everything_reach_zero() {
    let mut session = common::session_with(300, 7.5);

    session.sell_energy(7.5).expect("sell all energy");
    assert_eq!(session.state().stored_energy_kwh(), 0.0);

    let credits = session.state().credit_points() as i64;
    session.buy_energy(credits).expect("spend all credits");
    assert_eq!(session.state().credit_points(), 0);
}

#[test]
fn whole_unit_trades_conserve_value() {
    let mut session = common::session_with(1000, 40.0);
    let before = common::total_value_points(session.state());

    session.sell_energy(4.0).expect("sell");
    session.buy_energy(50).expect("buy");
    session.sell_energy(12.0).expect("sell");
    session.buy_energy(325).expect("buy");

    let after = common::total_value_points(session.state());
    assert!((after - before).abs() < 1e-9, "before={before} after={after}");
}

#[test]
fn demo_session_continues_ids_and_keeps_newest_first() {
    let mut session = common::demo_session();
    assert_eq!(session.state().history().len(), 3);

    session.sell_energy(5.0).expect("sell");
    session.buy_energy(200).expect("buy");

    let ids: Vec<u64> = session.state().history().iter().map(|tx| tx.id).collect();
    assert_eq!(ids, vec![5, 4, 1, 2, 3]);

    let snap = session.snapshot();
    assert_eq!(snap.credit_points, 1125);
    assert_eq!(snap.stored_energy_kwh, 51.0);
    assert_eq!(snap.estimated_value_kwh, 45.0);
    assert!(snap.transactions[0].timestamp > snap.transactions[1].timestamp);
}

#[test]
fn history_keeps_only_the_most_recent_entries() {
    let mut session = common::session_with(0, 100.0);

    for _ in 0..(HISTORY_CAPACITY + 5) {
        session.sell_energy(1.0).expect("sell");
    }

    let history = session.state().history();
    assert_eq!(history.len(), HISTORY_CAPACITY);
    assert_eq!(history.latest().map(|tx| tx.id), Some(25));
    assert_eq!(history.get(HISTORY_CAPACITY - 1).map(|tx| tx.id), Some(6));
    // Balances reflect every trade, not only the retained ones.
    assert_eq!(session.state().credit_points(), 625);
    assert_eq!(session.state().stored_energy_kwh(), 75.0);
}

#[test]
fn fractional_sell_rounds_points_and_energy() {
    let mut session = common::session_with(0, 10.0);

    let tx = session.sell_input("1.234").expect("sell").clone();

    assert_eq!(tx.points_delta, 31);
    assert_eq!(tx.energy_delta_kwh, 1.234);
    assert_eq!(session.state().stored_energy_kwh(), 8.77);
}
