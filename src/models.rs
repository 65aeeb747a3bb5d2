// Copyright (c) 2026 Hearthbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The six movement kinds of the household ledger.
///
/// Income kinds and `FundWithdrawal` add to a balance; expense kinds and
/// `FundDeposit` subtract from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    PersonalIncome,
    HouseholdExpense,
    BusinessIncome,
    BusinessExpense,
    FundDeposit,
    FundWithdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::PersonalIncome => "personal_income",
            TransactionKind::HouseholdExpense => "household_expense",
            TransactionKind::BusinessIncome => "business_income",
            TransactionKind::BusinessExpense => "business_expense",
            TransactionKind::FundDeposit => "fund_deposit",
            TransactionKind::FundWithdrawal => "fund_withdrawal",
        }
    }

    /// Unknown strings yield `None`; callers decide whether to skip or report.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "personal_income" => Some(TransactionKind::PersonalIncome),
            "household_expense" => Some(TransactionKind::HouseholdExpense),
            "business_income" => Some(TransactionKind::BusinessIncome),
            "business_expense" => Some(TransactionKind::BusinessExpense),
            "fund_deposit" => Some(TransactionKind::FundDeposit),
            "fund_withdrawal" => Some(TransactionKind::FundWithdrawal),
            _ => None,
        }
    }

    /// Sign convention: income and fund withdrawals credit a balance.
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            TransactionKind::PersonalIncome
                | TransactionKind::BusinessIncome
                | TransactionKind::FundWithdrawal
        )
    }

    pub fn is_fund_movement(&self) -> bool {
        matches!(
            self,
            TransactionKind::FundDeposit | TransactionKind::FundWithdrawal
        )
    }

    /// Amount with the sign it contributes to a running balance.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        if self.is_credit() { amount } else { -amount }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub family_id: i64,
    pub name: String,
    pub avatar_color: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: i64,
    pub family_id: i64,
    pub name: String,
    pub icon: String,
    pub opening_balance: Decimal,
    pub current_balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub family_id: i64,
    pub name: String,
    /// Matches a transaction-kind family; both fund kinds share "fund".
    pub kind: String,
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fund {
    pub id: i64,
    pub family_id: i64,
    pub name: String,
    pub icon: String,
    pub monthly_goal: Decimal,
    pub opening_balance: Decimal,
    /// Cache of the derived value; the transaction history is authoritative.
    pub current_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub client_id: String,
    pub family_id: i64,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub person_id: i64,
    pub payment_method_id: i64,
    pub category_id: Option<i64>,
    pub fund_id: Option<i64>,
    pub note: Option<String>,
}

/// A movement as entered by the user, before it has a row id.
///
/// `client_id` is generated at entry when absent and is the idempotence key
/// for outbox replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub client_id: Option<String>,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub person_id: i64,
    pub payment_method_id: i64,
    pub category_id: Option<i64>,
    pub fund_id: Option<i64>,
    pub note: Option<String>,
}

impl NewTransaction {
    /// Entry-time checks; nothing invalid reaches the store or aggregator.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        if self.kind.is_fund_movement() {
            if self.fund_id.is_none() {
                return Err(ValidationError::FundRequired(self.kind.as_str()));
            }
        } else if self.category_id.is_none() {
            return Err(ValidationError::CategoryRequired(self.kind.as_str()));
        }
        Ok(())
    }
}
