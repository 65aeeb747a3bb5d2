// Copyright (c) Hearthbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use hearthbook::models::{NewTransaction, TransactionKind};
use hearthbook::{db, outbox, store, utils};
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
        "INSERT INTO categories(family_id, name, kind) VALUES(1, 'Groceries', 'household_expense')",
        [],
    )
    .unwrap();
    conn
}

fn entry(amount: &str) -> NewTransaction {
    NewTransaction {
        client_id: None,
        kind: TransactionKind::HouseholdExpense,
        amount: Decimal::from_str_exact(amount).unwrap(),
        date: NaiveDate::from_ymd_opt(2026, 7, 5).unwrap(),
        person_id: 1,
        payment_method_id: 1,
        category_id: Some(1),
        fund_id: None,
        note: None,
    }
}

#[test]
fn queue_then_replay_records_once() {
    let mut conn = setup();
    let client_id = outbox::queue(&conn, 1, &entry("42")).unwrap();
    assert_eq!(outbox::pending(&conn, 1).unwrap().len(), 1);

    let outcome = outbox::replay(&mut conn, 1).unwrap();
    assert_eq!(outcome.replayed, 1);
    assert_eq!(outcome.skipped, 0);
    assert!(outbox::pending(&conn, 1).unwrap().is_empty());

    let stored: String = conn
        .query_row(
            "SELECT client_id FROM transactions WHERE amount='42'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(stored, client_id);
}

#[test]
fn replay_is_idempotent() {
    let mut conn = setup();
    outbox::queue(&conn, 1, &entry("10")).unwrap();
    outbox::replay(&mut conn, 1).unwrap();

    let outcome = outbox::replay(&mut conn, 1).unwrap();
    assert_eq!(outcome.replayed, 0);
    assert_eq!(outcome.skipped, 0);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn replay_skips_entries_already_recorded() {
    let mut conn = setup();
    let mut e = entry("77");
    e.client_id = Some("01JSHAREDCLIENTIDXXXXXXXXX".to_string());
    outbox::queue(&conn, 1, &e).unwrap();
    // the write made it through before the queue was replayed
    store::insert_transaction(&mut conn, 1, &e).unwrap();

    let outcome = outbox::replay(&mut conn, 1).unwrap();
    assert_eq!(outcome.replayed, 0);
    assert_eq!(outcome.skipped, 1);
    assert!(outbox::pending(&conn, 1).unwrap().is_empty());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
    // no double-applied balance
    let balance: String = conn
        .query_row(
            "SELECT current_balance FROM payment_methods WHERE id=1",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(balance, "-77");
}

#[test]
fn queue_validates_before_parking() {
    let conn = setup();
    let err = outbox::queue(&conn, 1, &entry("0")).unwrap_err();
    assert!(err.to_string().contains("greater than zero"));
    assert!(outbox::pending(&conn, 1).unwrap().is_empty());
}

#[test]
fn drop_entry_discards_without_recording() {
    let mut conn = setup();
    let client_id = outbox::queue(&conn, 1, &entry("5")).unwrap();
    assert!(outbox::drop_entry(&conn, 1, &client_id).unwrap());
    assert!(!outbox::drop_entry(&conn, 1, &client_id).unwrap());

    outbox::replay(&mut conn, 1).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}
