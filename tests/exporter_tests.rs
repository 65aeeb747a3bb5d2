// Copyright (c) Hearthbook.
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

fn record(conn: &mut Connection, amount: &str, date: &str) {
    let e = NewTransaction {
        client_id: None,
        kind: TransactionKind::HouseholdExpense,
        amount: Decimal::from_str_exact(amount).unwrap(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        person_id: 1,
        payment_method_id: 1,
        category_id: Some(1),
        fund_id: None,
        note: Some("weekly shop".to_string()),
    };
    store::insert_transaction(conn, 1, &e).unwrap();
}

#[test]
fn export_csv_writes_all_columns() {
    let mut conn = setup();
    record(&mut conn, "12.30", "2026-07-02");
    record(&mut conn, "7.80", "2026-07-09");

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ledger.csv");
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "hearthbook",
        "export",
        "transactions",
        "--format",
        "csv",
        "--out",
        out.to_str().unwrap(),
    ]);
    if let Some(("export", sub)) = matches.subcommand() {
        commands::exporter::handle(&conn, sub).unwrap();
    } else {
        panic!("export command not parsed");
    }

    let content = std::fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,type,amount,person,method,category,fund,note"
    );
    let first = lines.next().unwrap();
    assert!(first.contains("2026-07-02"));
    assert!(first.contains("household_expense"));
    assert!(first.contains("Groceries"));
    assert_eq!(lines.count(), 1);
}

#[test]
fn export_json_round_trips() {
    let mut conn = setup();
    record(&mut conn, "99.99", "2026-07-15");

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ledger.json");
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "hearthbook",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        out.to_str().unwrap(),
    ]);
    if let Some(("export", sub)) = matches.subcommand() {
        commands::exporter::handle(&conn, sub).unwrap();
    } else {
        panic!("export command not parsed");
    }

    let items: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let arr = items.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["amount"], "99.99");
    assert_eq!(arr[0]["person"], "Ana");
    assert_eq!(arr[0]["fund"], serde_json::Value::Null);
}
