// Copyright (c) 2026 Hearthbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{fund_progress, FundProgress};
use crate::store;
use crate::utils::{
    current_family, fmt_money, id_for_fund, maybe_print_json, parse_decimal, pretty_table,
};
use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let family_id = current_family(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => add(conn, family_id, sub)?,
        Some(("list", sub)) => list(conn, family_id, sub)?,
        Some(("set-goal", sub)) => set_goal(conn, family_id, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, family_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let icon = sub.get_one::<String>("icon").unwrap();
    let goal = parse_decimal(sub.get_one::<String>("goal").unwrap().trim())?;
    if goal < Decimal::ZERO {
        return Err(anyhow!("Monthly goal must not be negative"));
    }
    let opening = parse_decimal(sub.get_one::<String>("opening").unwrap().trim())?;
    conn.execute(
        "INSERT INTO funds(family_id, name, icon, monthly_goal, opening_balance, current_amount)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        params![family_id, name, icon, goal.to_string(), opening.to_string()],
    )?;
    println!("Added fund '{}' with goal {}", name, fmt_money(&goal));
    Ok(())
}

#[derive(Serialize)]
struct FundRow {
    name: String,
    icon: String,
    goal: Decimal,
    #[serde(flatten)]
    progress: FundProgress,
}

fn list(conn: &Connection, family_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let funds = store::list_funds(conn, family_id)?;
    let transactions = store::list_all_transactions(conn, family_id)?;

    let data: Vec<FundRow> = funds
        .iter()
        .map(|f| FundRow {
            name: f.name.clone(),
            icon: f.icon.clone(),
            goal: f.monthly_goal,
            progress: fund_progress(f, &transactions),
        })
        .collect();

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    format!("{} {}", r.icon, r.name),
                    fmt_money(&r.progress.current),
                    fmt_money(&r.goal),
                    format!("{:.1}%", r.progress.goal_percentage),
                    fmt_money(&r.progress.missing),
                    r.progress.status.as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Fund", "Current", "Goal", "Progress", "Missing", "Status"],
                rows
            )
        );
    }
    Ok(())
}

fn set_goal(conn: &Connection, family_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let goal = parse_decimal(sub.get_one::<String>("goal").unwrap().trim())?;
    if goal < Decimal::ZERO {
        return Err(anyhow!("Monthly goal must not be negative"));
    }
    let fund_id = id_for_fund(conn, family_id, name)?;
    conn.execute(
        "UPDATE funds SET monthly_goal=?1 WHERE id=?2",
        params![goal.to_string(), fund_id],
    )?;
    println!("Goal for '{}' set to {}", name, fmt_money(&goal));
    Ok(())
}
