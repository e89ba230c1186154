//! The module contains the `Expense` type and its backing table.
//!
//! An expense is immutable after creation: it can only be read or deleted.
use core::fmt;

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::Amount;

/// A single recorded monetary outlay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i32,
    pub amount: Amount,
    pub memo: String,
    pub created_on: NaiveDate,
}

impl fmt::Display for Expense {
    /// Renders the report row: right-aligned id (3), date (10) and
    /// amount (12), memo unpadded, fields joined with `" | "`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.created_on.format("%Y-%m-%d").to_string();
        write!(
            f,
            "{:>3} | {:>10} | {:>12} | {}",
            self.id,
            date,
            self.amount.to_string(),
            self.memo
        )
    }
}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            amount: Amount::new(model.amount_minor),
            memo: model.memo,
            created_on: model.created_on,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub amount_minor: i64,
    pub memo: String,
    pub created_on: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Expense {
    /// Builds the insert model for a new expense. The id stays unset so the
    /// store assigns the next value of the identity sequence.
    pub(crate) fn insert_model(amount: Amount, memo: &str, created_on: NaiveDate) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            amount_minor: ActiveValue::Set(amount.cents()),
            memo: ActiveValue::Set(memo.to_owned()),
            created_on: ActiveValue::Set(created_on),
        }
    }
}
