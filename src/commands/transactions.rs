// Copyright (c) 2026 Hearthbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{apply_filters, KindFilter, TxFilter};
use crate::models::{NewTransaction, Transaction, TransactionKind};
use crate::outbox;
use crate::store;
use crate::utils::{
    current_family, current_month, id_for_category, id_for_fund, id_for_method, id_for_person,
    maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table,
};
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let family_id = current_family(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => add(conn, family_id, sub)?,
        Some(("list", sub)) => list(conn, family_id, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store::delete_transaction(conn, family_id, id)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &mut Connection, family_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let kind_s = sub.get_one::<String>("type").unwrap().trim();
    let kind = TransactionKind::parse(kind_s)
        .ok_or_else(|| anyhow!("Unknown movement type '{}'", kind_s))?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d.trim())?,
        None => chrono::Utc::now().date_naive(),
    };
    let person_id = id_for_person(conn, family_id, sub.get_one::<String>("person").unwrap().trim())?;
    let payment_method_id =
        id_for_method(conn, family_id, sub.get_one::<String>("method").unwrap().trim())?;
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(id_for_category(conn, family_id, name.trim())?),
        None => None,
    };
    let fund_id = match sub.get_one::<String>("fund") {
        Some(name) => Some(id_for_fund(conn, family_id, name.trim())?),
        None => None,
    };

    let new = NewTransaction {
        client_id: None,
        kind,
        amount,
        date,
        person_id,
        payment_method_id,
        category_id,
        fund_id,
        note: sub.get_one::<String>("note").map(|s| s.to_string()),
    };

    if sub.get_flag("queue") {
        let client_id = outbox::queue(conn, family_id, &new)?;
        println!("Queued {} for later replay (id {})", kind.as_str(), client_id);
        return Ok(());
    }

    match store::insert_transaction(conn, family_id, &new)? {
        Some(t) => println!("Recorded {} of {} on {}", kind.as_str(), t.amount, t.date),
        None => println!("Already recorded; nothing to do"),
    }
    Ok(())
}

#[derive(Serialize)]
struct TransactionRow {
    id: i64,
    date: String,
    kind: &'static str,
    detail: String,
    person: String,
    method: String,
    amount: String,
    note: String,
}

fn list(conn: &Connection, family_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(mth) => parse_month(mth.trim())?,
        None => current_month(),
    };

    let mut filter = TxFilter::default();
    if let Some(kind_s) = sub.get_one::<String>("type") {
        let kind_s = kind_s.trim();
        if kind_s != "all" {
            filter.kind = Some(
                KindFilter::parse(kind_s)
                    .with_context(|| format!("Unknown type filter '{}'", kind_s))?,
            );
        }
    }
    if let Some(name) = sub.get_one::<String>("person") {
        filter.person_id = Some(id_for_person(conn, family_id, name.trim())?);
    }
    if let Some(name) = sub.get_one::<String>("method") {
        filter.payment_method_id = Some(id_for_method(conn, family_id, name.trim())?);
    }
    if let Some(d) = sub.get_one::<String>("date") {
        filter.date = Some(parse_date(d.trim())?);
    }

    let transactions = store::list_transactions(conn, family_id, &month)?;
    let mut filtered = apply_filters(&transactions, &filter);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        filtered.truncate(*limit);
    }

    let persons = store::list_persons(conn, family_id)?;
    let methods = store::list_payment_methods(conn, family_id)?;
    let categories = store::list_categories(conn, family_id)?;
    let funds = store::list_funds(conn, family_id)?;

    let data: Vec<TransactionRow> = filtered
        .iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            kind: t.kind.as_str(),
            detail: detail_label(t, &categories, &funds),
            person: persons
                .iter()
                .find(|p| p.id == t.person_id)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            method: methods
                .iter()
                .find(|pm| pm.id == t.payment_method_id)
                .map(|pm| pm.name.clone())
                .unwrap_or_default(),
            amount: format!(
                "{}{}",
                if t.kind.is_credit() { "+" } else { "-" },
                t.amount
            ),
            note: t.note.clone().unwrap_or_default(),
        })
        .collect();

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No movements for {}", month);
            return Ok(());
        }
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.to_string(),
                    r.detail.clone(),
                    r.person.clone(),
                    r.method.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Detail", "Person", "Method", "Amount", "Note"],
                rows
            )
        );
    }
    Ok(())
}

/// Category or fund name for display; a dangling reference degrades to a
/// generic label instead of failing the listing.
fn detail_label(
    t: &Transaction,
    categories: &[crate::models::Category],
    funds: &[crate::models::Fund],
) -> String {
    if t.kind.is_fund_movement() {
        let fund = t
            .fund_id
            .and_then(|id| funds.iter().find(|f| f.id == id))
            .map(|f| f.name.clone());
        return match t.kind {
            TransactionKind::FundDeposit => {
                format!("Deposit to {}", fund.unwrap_or_else(|| "fund".into()))
            }
            _ => format!("Withdrawal from {}", fund.unwrap_or_else(|| "fund".into())),
        };
    }
    let category = t
        .category_id
        .and_then(|id| categories.iter().find(|c| c.id == id))
        .map(|c| c.name.clone());
    category.unwrap_or_else(|| {
        match t.kind {
            TransactionKind::PersonalIncome => "Income",
            TransactionKind::HouseholdExpense => "Expense",
            TransactionKind::BusinessIncome => "Sales",
            TransactionKind::BusinessExpense => "Supplies",
            _ => "Movement",
        }
        .to_string()
    })
}
