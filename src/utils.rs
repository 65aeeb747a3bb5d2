// Copyright (c) 2026 Hearthbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::ledger::BalanceSource;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("$ {}", d.round_dp(2))
}

pub fn current_month() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m").to_string()
}

pub fn month_start(month: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'", month))
}

pub fn month_end(month: &str) -> Result<NaiveDate> {
    let parts: Vec<&str> = month.split('-').collect();
    if parts.len() != 2 {
        return Err(anyhow::anyhow!("Invalid month '{}'", month));
    }
    let y: i32 = parts[0].parse()?;
    let m: u32 = parts[1].parse()?;
    let last_day = match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if chrono::NaiveDate::from_ymd_opt(y, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return Err(anyhow::anyhow!("Invalid month number {}", m)),
    };
    NaiveDate::from_ymd_opt(y, m, last_day)
        .ok_or_else(|| anyhow::anyhow!("Invalid month '{}'", month))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Active family settings
pub fn current_family(conn: &Connection) -> Result<i64> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='family_id'", [], |r| {
            r.get(0)
        })
        .optional()?;
    let raw = v.context("No family configured yet; run `hearthbook init` first")?;
    raw.parse::<i64>()
        .with_context(|| format!("Invalid family id '{}' in settings", raw))
}

pub fn set_current_family(conn: &Connection, family_id: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('family_id', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![family_id.to_string()],
    )?;
    Ok(())
}

pub fn get_balance_source(conn: &Connection) -> Result<BalanceSource> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='balance_source'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    match v {
        Some(s) => BalanceSource::parse(&s)
            .with_context(|| format!("Invalid balance_source '{}' in settings", s)),
        None => Ok(BalanceSource::Stored),
    }
}

pub fn set_balance_source(conn: &Connection, source: BalanceSource) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('balance_source', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![source.as_str()],
    )?;
    Ok(())
}

pub fn id_for_person(conn: &Connection, family_id: i64, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM persons WHERE family_id=?1 AND name=?2")?;
    let id: i64 = stmt
        .query_row(params![family_id, name], |r| r.get(0))
        .with_context(|| format!("Person '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_method(conn: &Connection, family_id: i64, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM payment_methods WHERE family_id=?1 AND name=?2")?;
    let id: i64 = stmt
        .query_row(params![family_id, name], |r| r.get(0))
        .with_context(|| format!("Payment method '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_category(conn: &Connection, family_id: i64, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM categories WHERE family_id=?1 AND name=?2")?;
    let id: i64 = stmt
        .query_row(params![family_id, name], |r| r.get(0))
        .with_context(|| format!("Category '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_fund(conn: &Connection, family_id: i64, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM funds WHERE family_id=?1 AND name=?2")?;
    let id: i64 = stmt
        .query_row(params![family_id, name], |r| r.get(0))
        .with_context(|| format!("Fund '{}' not found", name))?;
    Ok(id)
}
