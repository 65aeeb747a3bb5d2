// Copyright (c) 2026 Hearthbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use hearthbook::ledger::{fund_progress, payment_method_balance, BalanceSource, FundStatus};
use hearthbook::models::{NewTransaction, TransactionKind};
use hearthbook::{cli, commands, db, store, utils};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO families(name) VALUES('Test Family')", [])
        .unwrap();
    utils::set_current_family(&conn, 1).unwrap();
    conn.execute("INSERT INTO persons(family_id, name) VALUES(1, 'Ana')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO payment_methods(family_id, name) VALUES(1, 'Cash')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO funds(family_id, name, monthly_goal) VALUES(1, 'Emergency', '1000')",
        [],
    )
    .unwrap();
    conn
}

fn fund_entry(kind: TransactionKind, amount: &str, date: &str) -> NewTransaction {
    NewTransaction {
        client_id: None,
        kind,
        amount: Decimal::from_str_exact(amount).unwrap(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        person_id: 1,
        payment_method_id: 1,
        category_id: None,
        fund_id: Some(1),
        note: None,
    }
}

#[test]
fn derived_fund_value_tracks_movements_across_months() {
    let mut conn = setup();
    store::insert_transaction(
        &mut conn,
        1,
        &fund_entry(TransactionKind::FundDeposit, "300", "2026-06-15"),
    )
    .unwrap();
    store::insert_transaction(
        &mut conn,
        1,
        &fund_entry(TransactionKind::FundDeposit, "200", "2026-07-01"),
    )
    .unwrap();
    store::insert_transaction(
        &mut conn,
        1,
        &fund_entry(TransactionKind::FundWithdrawal, "100", "2026-07-20"),
    )
    .unwrap();

    let funds = store::list_funds(&conn, 1).unwrap();
    let history = store::list_all_transactions(&conn, 1).unwrap();
    let progress = fund_progress(&funds[0], &history);

    assert_eq!(progress.current, Decimal::from_str_exact("400").unwrap());
    assert_eq!(progress.status, FundStatus::Low);
    // the stored cache agrees with the derivation
    assert_eq!(funds[0].current_amount, progress.current);
}

#[test]
fn stored_cache_drift_is_visible() {
    let mut conn = setup();
    store::insert_transaction(
        &mut conn,
        1,
        &fund_entry(TransactionKind::FundDeposit, "500", "2026-07-01"),
    )
    .unwrap();
    // simulate an out-of-band edit to the cached column
    conn.execute("UPDATE funds SET current_amount='900' WHERE id=1", [])
        .unwrap();

    let funds = store::list_funds(&conn, 1).unwrap();
    let history = store::list_all_transactions(&conn, 1).unwrap();
    let derived = fund_progress(&funds[0], &history).current;

    assert_eq!(funds[0].current_amount, Decimal::from_str_exact("900").unwrap());
    assert_eq!(derived, Decimal::from_str_exact("500").unwrap());
    assert_ne!(funds[0].current_amount, derived);
}

#[test]
fn stored_and_recomputed_method_balances_agree_after_store_writes() {
    let mut conn = setup();
    conn.execute(
        "INSERT INTO categories(family_id, name, kind) VALUES(1, 'Salary', 'personal_income')",
        [],
    )
    .unwrap();
    let income = NewTransaction {
        client_id: None,
        kind: TransactionKind::PersonalIncome,
        amount: Decimal::from_str_exact("250.75").unwrap(),
        date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
        person_id: 1,
        payment_method_id: 1,
        category_id: Some(1),
        fund_id: None,
        note: None,
    };
    store::insert_transaction(&mut conn, 1, &income).unwrap();
    store::insert_transaction(
        &mut conn,
        1,
        &fund_entry(TransactionKind::FundDeposit, "50", "2026-07-02"),
    )
    .unwrap();

    let methods = store::list_payment_methods(&conn, 1).unwrap();
    let history = store::list_all_transactions(&conn, 1).unwrap();
    let stored = payment_method_balance(&methods[0], &history, BalanceSource::Stored);
    let recomputed = payment_method_balance(&methods[0], &history, BalanceSource::Recomputed);

    assert_eq!(stored, Decimal::from_str_exact("200.75").unwrap());
    assert_eq!(stored, recomputed);
}

#[test]
fn set_goal_through_cli_trims_inputs() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "hearthbook",
        "fund",
        "set-goal",
        "--name",
        " Emergency ",
        "--goal",
        " 1500.00 ",
    ]);
    if let Some(("fund", sub)) = matches.subcommand() {
        commands::funds::handle(&conn, sub).unwrap();
    } else {
        panic!("fund command not parsed");
    }

    let goal: String = conn
        .query_row("SELECT monthly_goal FROM funds WHERE id=1", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(goal, "1500.00");
}

#[test]
fn negative_goal_is_rejected() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "hearthbook",
        "fund",
        "set-goal",
        "--name",
        "Emergency",
        "--goal=-5",
    ]);
    if let Some(("fund", sub)) = matches.subcommand() {
        let err = commands::funds::handle(&conn, sub).unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    } else {
        panic!("fund command not parsed");
    }
}
