// Copyright (c) Hearthbook.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejections raised at entry time, before a movement reaches the store.
///
/// Missing reference rows discovered later (a transaction pointing at a
/// person or category that is no longer loaded) are not errors: display
/// falls back to a generic label and grouped aggregates skip the row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("a category is required for {0} movements")]
    CategoryRequired(&'static str),
    #[error("a fund is required for {0} movements")]
    FundRequired(&'static str),
}
