// Copyright (c) 2026 Hearthbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over an in-memory snapshot of one period's movements.
//!
//! Nothing here touches the database or mutates its inputs; commands load a
//! month of transactions plus the reference entities and hand them over.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, Fund, PaymentMethod, Transaction, TransactionKind};

/// Per-kind sums for one period. Fund withdrawals land in no bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub income: Decimal,
    pub household_expense: Decimal,
    pub business_income: Decimal,
    pub business_expense: Decimal,
    pub fund_deposits: Decimal,
}

impl MonthlyTotals {
    pub fn business_result(&self) -> Decimal {
        self.business_income - self.business_expense
    }
}

pub fn monthly_totals(transactions: &[Transaction]) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();
    for t in transactions {
        match t.kind {
            TransactionKind::PersonalIncome => totals.income += t.amount,
            TransactionKind::HouseholdExpense => totals.household_expense += t.amount,
            TransactionKind::BusinessIncome => totals.business_income += t.amount,
            TransactionKind::BusinessExpense => totals.business_expense += t.amount,
            TransactionKind::FundDeposit => totals.fund_deposits += t.amount,
            TransactionKind::FundWithdrawal => {}
        }
    }
    totals
}

/// The month's bottom line. Fund deposits are deliberately not subtracted;
/// savings are reported as their own figure next to this one.
pub fn final_balance(totals: &MonthlyTotals) -> Decimal {
    totals.income - totals.household_expense + totals.business_result()
}

/// Where a payment-method balance comes from. The two strategies are kept
/// apart on purpose; `doctor` reports when they disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceSource {
    /// Read the incrementally maintained `current_balance` column.
    Stored,
    /// Replay the signed transaction history on top of the opening balance.
    Recomputed,
}

impl BalanceSource {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stored" => Some(BalanceSource::Stored),
            "recomputed" => Some(BalanceSource::Recomputed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceSource::Stored => "stored",
            BalanceSource::Recomputed => "recomputed",
        }
    }
}

pub fn payment_method_balance(
    method: &PaymentMethod,
    transactions: &[Transaction],
    source: BalanceSource,
) -> Decimal {
    match source {
        BalanceSource::Stored => method.current_balance,
        BalanceSource::Recomputed => {
            let mut balance = method.opening_balance;
            for t in transactions {
                if t.payment_method_id == method.id {
                    balance += t.kind.signed(t.amount);
                }
            }
            balance
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FundStatus {
    Critical,
    Low,
    Ok,
}

impl FundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FundStatus::Critical => "critical",
            FundStatus::Low => "low",
            FundStatus::Ok => "ok",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundProgress {
    pub current: Decimal,
    pub goal_percentage: Decimal,
    pub missing: Decimal,
    pub status: FundStatus,
}

/// Derive a fund's standing from its movement history. The fund's stored
/// `current_amount` is ignored here; history is authoritative.
pub fn fund_progress(fund: &Fund, transactions: &[Transaction]) -> FundProgress {
    let mut current = fund.opening_balance;
    for t in transactions {
        if t.fund_id != Some(fund.id) {
            continue;
        }
        match t.kind {
            TransactionKind::FundDeposit => current += t.amount,
            TransactionKind::FundWithdrawal => current -= t.amount,
            _ => {}
        }
    }

    let hundred = Decimal::ONE_HUNDRED;
    let goal_percentage = if fund.monthly_goal > Decimal::ZERO {
        (current / fund.monthly_goal * hundred).min(hundred)
    } else {
        Decimal::ZERO
    };
    let missing = (fund.monthly_goal - current).max(Decimal::ZERO);

    // Exactly 25 is Low and exactly 50 is Ok; the comparisons are strict.
    let status = if goal_percentage < Decimal::from(25) {
        FundStatus::Critical
    } else if goal_percentage < Decimal::from(50) {
        FundStatus::Low
    } else {
        FundStatus::Ok
    };

    FundProgress {
        current,
        goal_percentage,
        missing,
        status,
    }
}

/// Category totals for one kind, largest first. Ties keep the order in which
/// a category was first seen in the input. Movements without a resolvable
/// category are left out rather than lumped under a fallback bucket.
pub fn category_ranking(
    transactions: &[Transaction],
    kind: TransactionKind,
    categories: &[Category],
) -> Vec<(String, Decimal)> {
    let mut order: Vec<i64> = Vec::new();
    let mut totals: std::collections::HashMap<i64, Decimal> = std::collections::HashMap::new();

    for t in transactions {
        if t.kind != kind {
            continue;
        }
        let Some(cat_id) = t.category_id else {
            continue;
        };
        if !categories.iter().any(|c| c.id == cat_id) {
            continue;
        }
        if !totals.contains_key(&cat_id) {
            order.push(cat_id);
        }
        *totals.entry(cat_id).or_insert(Decimal::ZERO) += t.amount;
    }

    let mut ranking: Vec<(String, Decimal)> = order
        .into_iter()
        .map(|id| {
            let name = categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            (name, totals[&id])
        })
        .collect();
    // sort_by is stable, so equal totals keep first-encounter order
    ranking.sort_by(|a, b| b.1.cmp(&a.1));
    ranking
}

/// A kind filter as picked in the history view; the two umbrella values
/// expand to their kind pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    One(TransactionKind),
    Business,
    Fund,
}

impl KindFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "business" => Some(KindFilter::Business),
            "fund" => Some(KindFilter::Fund),
            other => TransactionKind::parse(other).map(KindFilter::One),
        }
    }

    pub fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::One(k) => kind == *k,
            KindFilter::Business => matches!(
                kind,
                TransactionKind::BusinessIncome | TransactionKind::BusinessExpense
            ),
            KindFilter::Fund => kind.is_fund_movement(),
        }
    }
}

/// History filters; `None` fields (the "all" selections) do not constrain.
#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    pub kind: Option<KindFilter>,
    pub person_id: Option<i64>,
    pub payment_method_id: Option<i64>,
    pub date: Option<NaiveDate>,
}

pub fn apply_filters(transactions: &[Transaction], filter: &TxFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| {
            filter.kind.map_or(true, |k| k.matches(t.kind))
                && filter.person_id.map_or(true, |p| t.person_id == p)
                && filter
                    .payment_method_id
                    .map_or(true, |m| t.payment_method_id == m)
                && filter.date.map_or(true, |d| t.date == d)
        })
        .cloned()
        .collect()
}
