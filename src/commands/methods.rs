// Copyright (c) 2026 Hearthbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{current_family, fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let family_id = current_family(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let icon = sub.get_one::<String>("icon").unwrap();
            let opening = parse_decimal(sub.get_one::<String>("opening").unwrap().trim())?;
            // A fresh method's running balance starts at its opening balance.
            conn.execute(
                "INSERT INTO payment_methods(family_id, name, icon, opening_balance, current_balance)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                params![family_id, name, icon, opening.to_string()],
            )?;
            println!("Added payment method '{}' ({})", name, icon);
        }
        Some(("list", sub)) => {
            let methods = store::list_payment_methods(conn, family_id)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &methods)? {
                let rows = methods
                    .iter()
                    .map(|pm| {
                        vec![
                            format!("{} {}", pm.icon, pm.name),
                            fmt_money(&pm.opening_balance),
                            fmt_money(&pm.current_balance),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Method", "Opening", "Balance"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}
