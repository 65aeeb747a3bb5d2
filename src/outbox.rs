// Copyright (c) Hearthbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Offline submission queue. A movement entered while the store is
//! unreachable is validated, given a client id, and parked here; replay
//! pushes it through the normal insert path. The client id makes replay
//! idempotent: an entry that already landed is dropped, never duplicated.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::Serialize;
use ulid::Ulid;

use crate::models::NewTransaction;
use crate::store;

#[derive(Debug, Clone, Serialize)]
pub struct OutboxEntry {
    pub client_id: String,
    pub queued_at: String,
    pub entry: NewTransaction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayOutcome {
    /// Entries inserted by this replay.
    pub replayed: usize,
    /// Entries whose client id was already recorded.
    pub skipped: usize,
}

/// Park a validated movement for later replay; returns its client id.
pub fn queue(conn: &Connection, family_id: i64, new: &NewTransaction) -> Result<String> {
    new.validate()?;
    let client_id = new
        .client_id
        .clone()
        .unwrap_or_else(|| Ulid::new().to_string());
    let mut entry = new.clone();
    entry.client_id = Some(client_id.clone());
    conn.execute(
        "INSERT INTO outbox(client_id, family_id, payload) VALUES (?1,?2,?3)
         ON CONFLICT(client_id) DO NOTHING",
        params![&client_id, family_id, serde_json::to_string(&entry)?],
    )?;
    Ok(client_id)
}

pub fn pending(conn: &Connection, family_id: i64) -> Result<Vec<OutboxEntry>> {
    let mut stmt = conn.prepare(
        "SELECT client_id, queued_at, payload FROM outbox WHERE family_id=?1 ORDER BY id",
    )?;
    let mut rows = stmt.query(params![family_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let client_id: String = r.get(0)?;
        let payload: String = r.get(2)?;
        let entry: NewTransaction = serde_json::from_str(&payload)
            .with_context(|| format!("Invalid outbox payload for '{}'", client_id))?;
        out.push(OutboxEntry {
            client_id,
            queued_at: r.get(1)?,
            entry,
        });
    }
    Ok(out)
}

/// Push every queued entry through the store. Safe to run repeatedly; an
/// entry is removed from the queue once it is known to be recorded.
pub fn replay(conn: &mut Connection, family_id: i64) -> Result<ReplayOutcome> {
    let entries = pending(conn, family_id)?;
    let mut outcome = ReplayOutcome::default();
    for item in entries {
        let inserted = store::insert_transaction(conn, family_id, &item.entry)
            .with_context(|| format!("Replay failed for outbox entry '{}'", item.client_id))?;
        if inserted.is_some() {
            outcome.replayed += 1;
        } else {
            outcome.skipped += 1;
        }
        conn.execute(
            "DELETE FROM outbox WHERE client_id=?1",
            params![&item.client_id],
        )?;
    }
    Ok(outcome)
}

/// Discard a queued entry without recording it.
pub fn drop_entry(conn: &Connection, family_id: i64, client_id: &str) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM outbox WHERE family_id=?1 AND client_id=?2",
        params![family_id, client_id],
    )?;
    Ok(n > 0)
}
