// Copyright (c) 2026 Hearthbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{
    category_ranking, final_balance, fund_progress, monthly_totals, payment_method_balance,
    BalanceSource, MonthlyTotals,
};
use crate::models::TransactionKind;
use crate::store;
use crate::utils::{
    current_family, current_month, fmt_money, get_balance_source, maybe_print_json, parse_month,
    pretty_table,
};
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let family_id = current_family(conn)?;
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, family_id, sub)?,
        Some(("balances", sub)) => balances(conn, family_id, sub)?,
        Some(("categories", sub)) => categories(conn, family_id, sub)?,
        Some(("funds", sub)) => funds_overview(conn, family_id, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct Summary {
    month: String,
    totals: MonthlyTotals,
    business_result: Decimal,
    monthly_savings: Decimal,
    final_balance: Decimal,
    message: String,
}

fn summary(conn: &Connection, family_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(mth) => parse_month(mth.trim())?,
        None => current_month(),
    };
    let transactions = store::list_transactions(conn, family_id, &month)?;
    let totals = monthly_totals(&transactions);
    let balance = final_balance(&totals);

    let message = if balance >= Decimal::ZERO {
        "Great teamwork, keep it up."
    } else {
        "Time to review spending together. No blame, one team."
    };
    let summary = Summary {
        month: month.clone(),
        business_result: totals.business_result(),
        monthly_savings: totals.fund_deposits,
        final_balance: balance,
        message: message.to_string(),
        totals,
    };

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        let rows = vec![
            vec!["Income".to_string(), fmt_money(&summary.totals.income)],
            vec![
                "Household expenses".to_string(),
                fmt_money(&summary.totals.household_expense),
            ],
            vec![
                "Business result".to_string(),
                fmt_money(&summary.business_result),
            ],
            vec![
                "Monthly savings".to_string(),
                fmt_money(&summary.monthly_savings),
            ],
            vec![
                "Final balance".to_string(),
                fmt_money(&summary.final_balance),
            ],
        ];
        println!("{}", pretty_table(&[month.as_str(), "Amount"], rows));
        println!("{}", summary.message);
    }
    Ok(())
}

fn balances(conn: &Connection, family_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let source = if sub.get_flag("recomputed") {
        BalanceSource::Recomputed
    } else {
        get_balance_source(conn)?
    };
    let methods = store::list_payment_methods(conn, family_id)?;
    let transactions = store::list_all_transactions(conn, family_id)?;

    let mut data = Vec::new();
    let mut total = Decimal::ZERO;
    for pm in &methods {
        let balance = payment_method_balance(pm, &transactions, source);
        total += balance;
        data.push(vec![format!("{} {}", pm.icon, pm.name), fmt_money(&balance)]);
    }
    data.push(vec!["Total".to_string(), fmt_money(&total)]);

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let header = format!("Balance ({})", source.as_str());
        println!("{}", pretty_table(&["Method", &header], data));
    }
    Ok(())
}

fn categories(conn: &Connection, family_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(mth) => parse_month(mth.trim())?,
        None => current_month(),
    };
    let kind_s = sub.get_one::<String>("type").unwrap().trim();
    let kind = TransactionKind::parse(kind_s)
        .ok_or_else(|| anyhow!("Unknown movement type '{}'", kind_s))?;

    let transactions = store::list_transactions(conn, family_id, &month)?;
    let categories = store::list_categories(conn, family_id)?;
    let ranking = category_ranking(&transactions, kind, &categories);

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ranking)? {
        let rows = ranking
            .iter()
            .enumerate()
            .map(|(i, (name, total))| {
                vec![(i + 1).to_string(), name.clone(), fmt_money(total)]
            })
            .collect();
        println!("{}", pretty_table(&["#", "Category", "Total"], rows));
    }
    Ok(())
}

// The short fund strip from the dashboard; `fund list` has the full view.
fn funds_overview(conn: &Connection, family_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let funds = store::list_funds(conn, family_id)?;
    let transactions = store::list_all_transactions(conn, family_id)?;

    let mut data = Vec::new();
    for f in &funds {
        let progress = fund_progress(f, &transactions);
        data.push(vec![
            format!("{} {}", f.icon, f.name),
            fmt_money(&progress.current),
            format!("{:.1}%", progress.goal_percentage),
            progress.status.as_str().to_string(),
        ]);
    }

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(&["Fund", "Current", "Progress", "Status"], data)
        );
    }
    Ok(())
}
