// Copyright (c) 2026 Hearthbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
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
    conn.execute(
        "INSERT INTO persons(family_id, name) VALUES(1, 'Ana')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO payment_methods(family_id, name, icon) VALUES(1, 'Cash', '💵')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO categories(family_id, name, kind) VALUES(1, 'Groceries', 'household_expense')",
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

fn entry(kind: TransactionKind, amount: &str, date: &str) -> NewTransaction {
    NewTransaction {
        client_id: None,
        kind,
        amount: Decimal::from_str_exact(amount).unwrap(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        person_id: 1,
        payment_method_id: 1,
        category_id: Some(1),
        fund_id: None,
        note: None,
    }
}

#[test]
fn insert_updates_stored_method_balance() {
    let mut conn = setup();
    store::insert_transaction(
        &mut conn,
        1,
        &entry(TransactionKind::HouseholdExpense, "120.50", "2026-07-03"),
    )
    .unwrap()
    .unwrap();

    let balance: String = conn
        .query_row(
            "SELECT current_balance FROM payment_methods WHERE id=1",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(balance, "-120.50");
}

#[test]
fn fund_deposit_updates_fund_cache() {
    let mut conn = setup();
    let mut deposit = entry(TransactionKind::FundDeposit, "200", "2026-07-03");
    deposit.category_id = None;
    deposit.fund_id = Some(1);
    store::insert_transaction(&mut conn, 1, &deposit)
        .unwrap()
        .unwrap();

    let amount: String = conn
        .query_row("SELECT current_amount FROM funds WHERE id=1", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(amount, "200");
}

#[test]
fn rejects_non_positive_amounts() {
    let mut conn = setup();
    let err = store::insert_transaction(
        &mut conn,
        1,
        &entry(TransactionKind::HouseholdExpense, "0", "2026-07-03"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("greater than zero"));
}

#[test]
fn rejects_expense_without_category() {
    let mut conn = setup();
    let mut e = entry(TransactionKind::HouseholdExpense, "10", "2026-07-03");
    e.category_id = None;
    let err = store::insert_transaction(&mut conn, 1, &e).unwrap_err();
    assert!(err.to_string().contains("category is required"));
}

#[test]
fn rejects_income_without_category() {
    let mut conn = setup();
    let mut e = entry(TransactionKind::PersonalIncome, "10", "2026-07-03");
    e.category_id = None;
    let err = store::insert_transaction(&mut conn, 1, &e).unwrap_err();
    assert!(err.to_string().contains("category is required"));
}

#[test]
fn rejects_fund_movement_without_fund() {
    let mut conn = setup();
    let mut e = entry(TransactionKind::FundDeposit, "10", "2026-07-03");
    e.category_id = None;
    let err = store::insert_transaction(&mut conn, 1, &e).unwrap_err();
    assert!(err.to_string().contains("fund is required"));
}

#[test]
fn insert_is_idempotent_on_client_id() {
    let mut conn = setup();
    let mut e = entry(TransactionKind::HouseholdExpense, "50", "2026-07-03");
    e.client_id = Some("01JTESTULIDXXXXXXXXXXXXXXX".to_string());

    assert!(store::insert_transaction(&mut conn, 1, &e).unwrap().is_some());
    assert!(store::insert_transaction(&mut conn, 1, &e).unwrap().is_none());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
    // the balance delta was applied exactly once
    let balance: String = conn
        .query_row(
            "SELECT current_balance FROM payment_methods WHERE id=1",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(balance, "-50");
}

#[test]
fn delete_reverses_balance_updates() {
    let mut conn = setup();
    let mut deposit = entry(TransactionKind::FundDeposit, "200", "2026-07-03");
    deposit.category_id = None;
    deposit.fund_id = Some(1);
    let t = store::insert_transaction(&mut conn, 1, &deposit)
        .unwrap()
        .unwrap();

    store::delete_transaction(&mut conn, 1, t.id).unwrap();

    let balance: String = conn
        .query_row(
            "SELECT current_balance FROM payment_methods WHERE id=1",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(balance, "0");
    let amount: String = conn
        .query_row("SELECT current_amount FROM funds WHERE id=1", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(amount, "0");
}

#[test]
fn list_is_scoped_to_the_month() {
    let mut conn = setup();
    store::insert_transaction(
        &mut conn,
        1,
        &entry(TransactionKind::HouseholdExpense, "10", "2026-07-31"),
    )
    .unwrap();
    store::insert_transaction(
        &mut conn,
        1,
        &entry(TransactionKind::HouseholdExpense, "20", "2026-08-01"),
    )
    .unwrap();

    let july = store::list_transactions(&conn, 1, "2026-07").unwrap();
    assert_eq!(july.len(), 1);
    assert_eq!(july[0].amount, Decimal::from_str_exact("10").unwrap());
    let august = store::list_transactions(&conn, 1, "2026-08").unwrap();
    assert_eq!(august.len(), 1);
}

#[test]
fn unknown_kind_rows_are_skipped_by_list() {
    let mut conn = setup();
    store::insert_transaction(
        &mut conn,
        1,
        &entry(TransactionKind::HouseholdExpense, "10", "2026-07-03"),
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(client_id, family_id, kind, amount, date, person_id, payment_method_id)
         VALUES('legacy-row', 1, 'loan_payment', '99', '2026-07-04', 1, 1)",
        [],
    )
    .unwrap();

    let july = store::list_transactions(&conn, 1, "2026-07").unwrap();
    assert_eq!(july.len(), 1);
}

#[test]
fn tx_add_through_cli_trims_and_records() {
    let mut conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "hearthbook",
        "tx",
        "add",
        "--type",
        "household_expense",
        "--amount",
        " 33.40 ",
        "--date",
        " 2026-07-10 ",
        "--person",
        " Ana ",
        "--method",
        " Cash ",
        "--category",
        " Groceries ",
    ]);
    if let Some(("tx", sub)) = matches.subcommand() {
        commands::transactions::handle(&mut conn, sub).unwrap();
    } else {
        panic!("tx command not parsed");
    }

    let (amount, kind): (String, String) = conn
        .query_row("SELECT amount, kind FROM transactions", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(amount, "33.40");
    assert_eq!(kind, "household_expense");
}
