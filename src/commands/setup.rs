// Copyright (c) Hearthbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

use crate::store;
use crate::utils::set_current_family;

/// Create the family on first run and seed the starter categories.
/// Re-running against an existing family is a no-op.
pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let name = m.get_one::<String>("family").unwrap().trim();

    let existing: Option<i64> = conn
        .query_row("SELECT value FROM settings WHERE key='family_id'", [], |r| {
            r.get::<_, String>(0)
        })
        .optional()?
        .and_then(|v| v.parse().ok());
    if let Some(id) = existing {
        let family: String =
            conn.query_row("SELECT name FROM families WHERE id=?1", [id], |r| r.get(0))?;
        println!("Family '{}' already set up", family);
        return Ok(());
    }

    let family_id = store::create_family(conn, name)?;
    set_current_family(conn, family_id)?;
    store::seed_default_categories(conn, family_id)?;
    println!("Created family '{}' with default categories", name);
    Ok(())
}
