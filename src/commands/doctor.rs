// Copyright (c) Hearthbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{fund_progress, payment_method_balance, BalanceSource};
use crate::store;
use crate::utils::{current_family, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let family_id = current_family(conn)?;
    let mut rows = Vec::new();

    // 1) Kind values the ledger no longer understands
    let mut stmt = conn.prepare(
        "SELECT id, kind FROM transactions WHERE family_id=?1 AND kind NOT IN
         ('personal_income','household_expense','business_income','business_expense','fund_deposit','fund_withdrawal')",
    )?;
    let mut cur = stmt.query(params![family_id])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let kind: String = r.get(1)?;
        rows.push(vec!["unknown_kind".into(), format!("tx {} '{}'", id, kind)]);
    }

    // 2) Stored balances that drifted from the transaction history
    let transactions = store::list_all_transactions(conn, family_id)?;
    for pm in store::list_payment_methods(conn, family_id)? {
        let stored = payment_method_balance(&pm, &transactions, BalanceSource::Stored);
        let derived = payment_method_balance(&pm, &transactions, BalanceSource::Recomputed);
        if stored != derived {
            rows.push(vec![
                "method_balance_drift".into(),
                format!("{}: stored {} vs derived {}", pm.name, stored, derived),
            ]);
        }
    }
    for fund in store::list_funds(conn, family_id)? {
        let derived = fund_progress(&fund, &transactions).current;
        if fund.current_amount != derived {
            rows.push(vec![
                "fund_amount_drift".into(),
                format!("{}: stored {} vs derived {}", fund.name, fund.current_amount, derived),
            ]);
        }
    }

    // 3) Movements pointing at reference rows that no longer exist
    for (issue, sql) in [
        (
            "missing_person",
            "SELECT t.id FROM transactions t LEFT JOIN persons p ON t.person_id=p.id
             WHERE t.family_id=?1 AND p.id IS NULL",
        ),
        (
            "missing_method",
            "SELECT t.id FROM transactions t LEFT JOIN payment_methods pm ON t.payment_method_id=pm.id
             WHERE t.family_id=?1 AND pm.id IS NULL",
        ),
        (
            "missing_category",
            "SELECT t.id FROM transactions t LEFT JOIN categories c ON t.category_id=c.id
             WHERE t.family_id=?1 AND t.category_id IS NOT NULL AND c.id IS NULL",
        ),
        (
            "missing_fund",
            "SELECT t.id FROM transactions t LEFT JOIN funds f ON t.fund_id=f.id
             WHERE t.family_id=?1 AND t.fund_id IS NOT NULL AND f.id IS NULL",
        ),
    ] {
        let mut stmt = conn.prepare(sql)?;
        let mut cur = stmt.query(params![family_id])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            rows.push(vec![issue.into(), format!("tx {}", id)]);
        }
    }

    // 4) Amounts that should have been rejected at entry
    for t in &transactions {
        if t.amount <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_amount".into(),
                format!("tx {} amount {}", t.id, t.amount),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
