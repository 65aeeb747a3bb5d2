// Copyright (c) 2026 Hearthbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{current_family, id_for_person, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let family_id = current_family(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let color = sub.get_one::<String>("color").unwrap();
            conn.execute(
                "INSERT INTO persons(family_id, name, avatar_color) VALUES (?1, ?2, ?3)",
                params![family_id, name, color],
            )?;
            println!("Added person '{}'", name);
        }
        Some(("list", sub)) => {
            let persons = store::list_persons(conn, family_id)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &persons)? {
                let rows = persons
                    .iter()
                    .map(|p| {
                        vec![
                            p.name.clone(),
                            p.avatar_color.clone(),
                            if p.is_active { "active" } else { "inactive" }.to_string(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Name", "Color", "Status"], rows));
            }
        }
        Some(("activate", sub)) => set_active(conn, family_id, sub, true)?,
        Some(("deactivate", sub)) => set_active(conn, family_id, sub, false)?,
        _ => {}
    }
    Ok(())
}

fn set_active(
    conn: &Connection,
    family_id: i64,
    sub: &clap::ArgMatches,
    active: bool,
) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    let id = id_for_person(conn, family_id, name)?;
    conn.execute(
        "UPDATE persons SET is_active=?1 WHERE id=?2",
        params![active as i64, id],
    )?;
    println!(
        "Person '{}' is now {}",
        name,
        if active { "active" } else { "inactive" }
    );
    Ok(())
}
