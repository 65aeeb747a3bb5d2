// Copyright (c) Hearthbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{current_family, maybe_print_json, pretty_table};
use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};

const CATEGORY_KINDS: &[&str] = &[
    "personal_income",
    "household_expense",
    "business_income",
    "business_expense",
    "fund",
];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let family_id = current_family(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let kind = sub.get_one::<String>("type").unwrap().trim();
            if !CATEGORY_KINDS.contains(&kind) {
                return Err(anyhow!(
                    "Unknown category type '{}' (use one of: {})",
                    kind,
                    CATEGORY_KINDS.join(", ")
                ));
            }
            let color = sub.get_one::<String>("color").unwrap();
            let icon = sub.get_one::<String>("icon").unwrap();
            conn.execute(
                "INSERT INTO categories(family_id, name, kind, color, icon) VALUES (?1,?2,?3,?4,?5)",
                params![family_id, name, kind, color, icon],
            )?;
            println!("Added category '{}' ({})", name, kind);
        }
        Some(("list", sub)) => {
            let categories = store::list_categories(conn, family_id)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
                let rows = categories
                    .iter()
                    .map(|c| {
                        vec![
                            format!("{} {}", c.icon, c.name),
                            c.kind.clone(),
                            c.color.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Category", "Type", "Color"], rows));
            }
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            conn.execute(
                "DELETE FROM categories WHERE family_id=?1 AND name=?2",
                params![family_id, name],
            )?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
