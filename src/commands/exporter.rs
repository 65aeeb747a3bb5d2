// Copyright (c) Hearthbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{params, Connection};
use serde_json::json;

use crate::utils::current_family;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let family_id = current_family(conn)?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT t.date, t.kind, t.amount, p.name, pm.name, c.name, f.name, t.note
         FROM transactions t
         LEFT JOIN persons p ON t.person_id=p.id
         LEFT JOIN payment_methods pm ON t.payment_method_id=pm.id
         LEFT JOIN categories c ON t.category_id=c.id
         LEFT JOIN funds f ON t.fund_id=f.id
         WHERE t.family_id=?1
         ORDER BY t.date, t.id",
    )?;
    let rows = stmt.query_map(params![family_id], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, Option<String>>(4)?,
            r.get::<_, Option<String>>(5)?,
            r.get::<_, Option<String>>(6)?,
            r.get::<_, Option<String>>(7)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date", "type", "amount", "person", "method", "category", "fund", "note",
            ])?;
            for row in rows {
                let (d, k, amt, person, method, cat, fund, note) = row?;
                wtr.write_record([
                    d,
                    k,
                    amt,
                    person.unwrap_or_default(),
                    method.unwrap_or_default(),
                    cat.unwrap_or_default(),
                    fund.unwrap_or_default(),
                    note.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, k, amt, person, method, cat, fund, note) = row?;
                items.push(json!({
                    "date": d, "type": k, "amount": amt, "person": person,
                    "method": method, "category": cat, "fund": fund, "note": note
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
