//! Expense records and the validated input tuple used to create them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Identifier assigned to an expense at creation. Never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub u64);

impl ExpenseId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for ExpenseId {
    fn from(value: u64) -> Self {
        ExpenseId(value)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub category: Category,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

impl Expense {
    /// Builds a record from a draft under the supplied id.
    pub fn new(id: ExpenseId, draft: ExpenseDraft) -> Self {
        let ExpenseDraft {
            category,
            amount,
            description,
            date,
        } = draft;
        Self {
            id,
            category,
            amount,
            description,
            date,
        }
    }

    /// Copies the editable fields back into a draft, e.g. to prefill an edit form.
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            category: self.category.clone(),
            amount: self.amount,
            description: self.description.clone(),
            date: self.date,
        }
    }
}

/// Field values submitted through the input boundary, without an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub category: Category,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

impl ExpenseDraft {
    pub fn new(
        category: impl Into<Category>,
        amount: f64,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            category: category.into(),
            amount,
            description: description.into(),
            date,
        }
    }

    /// Checks that the amount is a finite, non-negative number.
    pub fn validate(&self) -> Result<(), DraftError> {
        validate_amount(self.amount)
    }
}

/// Rejects amounts that would corrupt aggregates.
pub fn validate_amount(amount: f64) -> Result<(), DraftError> {
    if !amount.is_finite() {
        return Err(DraftError::NonFiniteAmount);
    }
    if amount < 0.0 {
        return Err(DraftError::NegativeAmount(amount));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Errors raised when a draft fails validation.
pub enum DraftError {
    NonFiniteAmount,
    NegativeAmount(f64),
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::NonFiniteAmount => f.write_str("amount must be a finite number"),
            DraftError::NegativeAmount(value) => {
                write!(f, "amount must not be negative (got {value})")
            }
        }
    }
}

impl std::error::Error for DraftError {}
