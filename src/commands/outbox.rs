// Copyright (c) Hearthbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::outbox;
use crate::utils::{current_family, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let family_id = current_family(conn)?;
    match m.subcommand() {
        Some(("list", sub)) => {
            let entries = outbox::pending(conn, family_id)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entries)? {
                if entries.is_empty() {
                    println!("Outbox is empty");
                    return Ok(());
                }
                let rows = entries
                    .iter()
                    .map(|e| {
                        vec![
                            e.client_id.clone(),
                            e.queued_at.clone(),
                            e.entry.kind.as_str().to_string(),
                            e.entry.amount.to_string(),
                            e.entry.date.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Client id", "Queued at", "Type", "Amount", "Date"], rows)
                );
            }
        }
        Some(("replay", _)) => {
            let outcome = outbox::replay(conn, family_id)?;
            println!(
                "Replayed {} entries ({} already recorded)",
                outcome.replayed, outcome.skipped
            );
        }
        Some(("drop", sub)) => {
            let client_id = sub.get_one::<String>("id").unwrap().trim();
            if outbox::drop_entry(conn, family_id, client_id)? {
                println!("Dropped outbox entry '{}'", client_id);
            } else {
                println!("No outbox entry '{}'", client_id);
            }
        }
        _ => {}
    }
    Ok(())
}
