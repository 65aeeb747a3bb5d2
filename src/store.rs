// Copyright (c) 2026 Hearthbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Connection-backed stores: transactions scoped to a family and month, and
//! the reference entities (persons, payment methods, categories, funds).
//!
//! Inserts keep the stored payment-method balance and fund amount columns in
//! step with the history; the aggregator in `ledger` never reads the
//! database itself.

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use ulid::Ulid;

use crate::models::{
    Category, Fund, NewTransaction, PaymentMethod, Person, Transaction, TransactionKind,
};
use crate::utils::{month_end, month_start};

pub fn create_family(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute("INSERT INTO families(name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

/// The starter category set every new family gets, mirroring family setup.
pub fn seed_default_categories(conn: &Connection, family_id: i64) -> Result<()> {
    let defaults: &[(&str, &str, &str, &str)] = &[
        ("Groceries", "household_expense", "#F59E0B", "🛒"),
        ("Services", "household_expense", "#3B82F6", "💡"),
        ("Transport", "household_expense", "#10B981", "🚌"),
        ("Health", "household_expense", "#EF4444", "💊"),
        ("Salary", "personal_income", "#22C55E", "💼"),
        ("Extras", "personal_income", "#A855F7", "✨"),
        ("Sales", "business_income", "#F97316", "💰"),
        ("Supplies", "business_expense", "#8B5CF6", "🧁"),
        ("Savings", "fund", "#0EA5E9", "🏦"),
    ];
    for (name, kind, color, icon) in defaults {
        conn.execute(
            "INSERT INTO categories(family_id, name, kind, color, icon) VALUES (?1,?2,?3,?4,?5)
             ON CONFLICT(family_id, name, kind) DO NOTHING",
            params![family_id, name, kind, color, icon],
        )?;
    }
    Ok(())
}

/// One calendar month of movements, newest first. Rows whose kind column no
/// longer parses are skipped; `doctor` lists them.
pub fn list_transactions(conn: &Connection, family_id: i64, month: &str) -> Result<Vec<Transaction>> {
    let start = month_start(month)?;
    let end = month_end(month)?;
    let mut stmt = conn.prepare(
        "SELECT id, client_id, kind, amount, date, person_id, payment_method_id, category_id, fund_id, note
         FROM transactions
         WHERE family_id=?1 AND date>=?2 AND date<=?3
         ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![family_id, start.to_string(), end.to_string()])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let kind_s: String = r.get(2)?;
        let Some(kind) = TransactionKind::parse(&kind_s) else {
            continue;
        };
        let amount_s: String = r.get(3)?;
        let date_s: String = r.get(4)?;
        out.push(Transaction {
            id: r.get(0)?,
            client_id: r.get(1)?,
            family_id,
            kind,
            amount: amount_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in transactions", amount_s))?,
            date: chrono::NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")?,
            person_id: r.get(5)?,
            payment_method_id: r.get(6)?,
            category_id: r.get(7)?,
            fund_id: r.get(8)?,
            note: r.get(9)?,
        });
    }
    Ok(out)
}

/// The family's full history, oldest first. Running figures (fund standing,
/// recomputed method balances) need every movement, not one period's.
pub fn list_all_transactions(conn: &Connection, family_id: i64) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, client_id, kind, amount, date, person_id, payment_method_id, category_id, fund_id, note
         FROM transactions
         WHERE family_id=?1
         ORDER BY date, id",
    )?;
    let mut rows = stmt.query(params![family_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let kind_s: String = r.get(2)?;
        let Some(kind) = TransactionKind::parse(&kind_s) else {
            continue;
        };
        let amount_s: String = r.get(3)?;
        let date_s: String = r.get(4)?;
        out.push(Transaction {
            id: r.get(0)?,
            client_id: r.get(1)?,
            family_id,
            kind,
            amount: amount_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in transactions", amount_s))?,
            date: chrono::NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")?,
            person_id: r.get(5)?,
            payment_method_id: r.get(6)?,
            category_id: r.get(7)?,
            fund_id: r.get(8)?,
            note: r.get(9)?,
        });
    }
    Ok(out)
}

/// Validate and record a movement, updating the stored balances in the same
/// SQLite transaction. Returns `None` when the client id was already
/// recorded, which makes outbox replay safe to repeat.
pub fn insert_transaction(
    conn: &mut Connection,
    family_id: i64,
    new: &NewTransaction,
) -> Result<Option<Transaction>> {
    new.validate()?;
    let client_id = new
        .client_id
        .clone()
        .unwrap_or_else(|| Ulid::new().to_string());

    let tx = conn.transaction()?;
    let already: Option<i64> = tx
        .query_row(
            "SELECT id FROM transactions WHERE client_id=?1",
            params![&client_id],
            |r| r.get(0),
        )
        .optional()?;
    if already.is_some() {
        return Ok(None);
    }

    tx.execute(
        "INSERT INTO transactions(client_id, family_id, kind, amount, date, person_id, payment_method_id, category_id, fund_id, note)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)",
        params![
            &client_id,
            family_id,
            new.kind.as_str(),
            new.amount.to_string(),
            new.date.to_string(),
            new.person_id,
            new.payment_method_id,
            new.category_id,
            new.fund_id,
            new.note.as_deref(),
        ],
    )?;
    let id = tx.last_insert_rowid();

    apply_balance_delta(&tx, new.payment_method_id, new.kind.signed(new.amount))?;
    if let Some(fund_id) = new.fund_id {
        let delta = match new.kind {
            TransactionKind::FundDeposit => new.amount,
            TransactionKind::FundWithdrawal => -new.amount,
            _ => Decimal::ZERO,
        };
        apply_fund_delta(&tx, fund_id, delta)?;
    }
    tx.commit()?;

    Ok(Some(Transaction {
        id,
        client_id,
        family_id,
        kind: new.kind,
        amount: new.amount,
        date: new.date,
        person_id: new.person_id,
        payment_method_id: new.payment_method_id,
        category_id: new.category_id,
        fund_id: new.fund_id,
        note: new.note.clone(),
    }))
}

/// Remove a movement and back out its balance contributions. Movements are
/// otherwise immutable; there is no edit.
pub fn delete_transaction(conn: &mut Connection, family_id: i64, id: i64) -> Result<()> {
    let tx = conn.transaction()?;
    let row: Option<(String, String, i64, Option<i64>)> = tx
        .query_row(
            "SELECT kind, amount, payment_method_id, fund_id FROM transactions WHERE id=?1 AND family_id=?2",
            params![id, family_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    let (kind_s, amount_s, method_id, fund_id) =
        row.ok_or_else(|| anyhow!("Transaction {} not found", id))?;
    let kind = TransactionKind::parse(&kind_s)
        .ok_or_else(|| anyhow!("Transaction {} has unknown kind '{}'", id, kind_s))?;
    let amount = amount_s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}' in transactions", amount_s))?;

    apply_balance_delta(&tx, method_id, -kind.signed(amount))?;
    if let Some(fund_id) = fund_id {
        let delta = match kind {
            TransactionKind::FundDeposit => -amount,
            TransactionKind::FundWithdrawal => amount,
            _ => Decimal::ZERO,
        };
        apply_fund_delta(&tx, fund_id, delta)?;
    }
    tx.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    tx.commit()?;
    Ok(())
}

fn apply_balance_delta(conn: &Connection, method_id: i64, delta: Decimal) -> Result<()> {
    let current_s: String = conn
        .query_row(
            "SELECT current_balance FROM payment_methods WHERE id=?1",
            params![method_id],
            |r| r.get(0),
        )
        .with_context(|| format!("Payment method {} not found", method_id))?;
    let current = current_s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid balance '{}' for payment method {}", current_s, method_id))?;
    conn.execute(
        "UPDATE payment_methods SET current_balance=?1 WHERE id=?2",
        params![(current + delta).to_string(), method_id],
    )?;
    Ok(())
}

fn apply_fund_delta(conn: &Connection, fund_id: i64, delta: Decimal) -> Result<()> {
    let current_s: String = conn
        .query_row(
            "SELECT current_amount FROM funds WHERE id=?1",
            params![fund_id],
            |r| r.get(0),
        )
        .with_context(|| format!("Fund {} not found", fund_id))?;
    let current = current_s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}' for fund {}", current_s, fund_id))?;
    conn.execute(
        "UPDATE funds SET current_amount=?1 WHERE id=?2",
        params![(current + delta).to_string(), fund_id],
    )?;
    Ok(())
}

pub fn list_persons(conn: &Connection, family_id: i64) -> Result<Vec<Person>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, avatar_color, is_active FROM persons WHERE family_id=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![family_id], |r| {
        Ok(Person {
            id: r.get(0)?,
            family_id,
            name: r.get(1)?,
            avatar_color: r.get(2)?,
            is_active: r.get::<_, i64>(3)? != 0,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn list_payment_methods(conn: &Connection, family_id: i64) -> Result<Vec<PaymentMethod>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, icon, opening_balance, current_balance
         FROM payment_methods WHERE family_id=?1 ORDER BY name",
    )?;
    let mut rows = stmt.query(params![family_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let name: String = r.get(1)?;
        let opening_s: String = r.get(3)?;
        let current_s: String = r.get(4)?;
        out.push(PaymentMethod {
            id: r.get(0)?,
            family_id,
            icon: r.get(2)?,
            opening_balance: opening_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid opening balance '{}' for {}", opening_s, name))?,
            current_balance: current_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid balance '{}' for {}", current_s, name))?,
            name,
        });
    }
    Ok(out)
}

pub fn list_categories(conn: &Connection, family_id: i64) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, kind, color, icon FROM categories WHERE family_id=?1 ORDER BY name",
    )?;
    let rows = stmt.query_map(params![family_id], |r| {
        Ok(Category {
            id: r.get(0)?,
            family_id,
            name: r.get(1)?,
            kind: r.get(2)?,
            color: r.get(3)?,
            icon: r.get(4)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn list_funds(conn: &Connection, family_id: i64) -> Result<Vec<Fund>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, icon, monthly_goal, opening_balance, current_amount
         FROM funds WHERE family_id=?1 ORDER BY name",
    )?;
    let mut rows = stmt.query(params![family_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let name: String = r.get(1)?;
        let goal_s: String = r.get(3)?;
        let opening_s: String = r.get(4)?;
        let current_s: String = r.get(5)?;
        out.push(Fund {
            id: r.get(0)?,
            family_id,
            icon: r.get(2)?,
            monthly_goal: goal_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid goal '{}' for fund {}", goal_s, name))?,
            opening_balance: opening_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid opening balance '{}' for fund {}", opening_s, name))?,
            current_amount: current_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' for fund {}", current_s, name))?,
            name,
        });
    }
    Ok(out)
}
