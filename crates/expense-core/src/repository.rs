//! In-memory expense collection kept in date-descending order.

use expense_domain::{validate_amount, Expense, ExpenseDraft, ExpenseId};
use tracing::debug;

use crate::{CoreError, IdGenerator};

/// Ordered collection of expenses.
///
/// After every insert or update the records are sorted newest first. The sort is stable,
/// so expenses sharing a date keep their insertion order. The repository neither caches
/// aggregates nor persists anything; callers save and recompute after mutating.
#[derive(Debug, Clone, Default)]
pub struct ExpenseRepository {
    expenses: Vec<Expense>,
    ids: IdGenerator,
}

impl ExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a loaded collection as-is, restoring the date order.
    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        let ids = IdGenerator::seeded(&expenses);
        let mut repository = Self { expenses, ids };
        repository.sort_by_date();
        repository
    }

    /// Adds a new expense under a fresh id and returns that id.
    pub fn add(&mut self, draft: ExpenseDraft, now_millis: i64) -> Result<ExpenseId, CoreError> {
        draft.validate()?;
        let id = self.ids.next(now_millis);
        debug!(%id, category = %draft.category, amount = draft.amount, "adding expense");
        self.expenses.push(Expense::new(id, draft));
        self.sort_by_date();
        Ok(id)
    }

    /// Inserts a record that already carries its id.
    pub fn insert(&mut self, expense: Expense) -> Result<(), CoreError> {
        validate_amount(expense.amount)?;
        if self.contains(expense.id) {
            return Err(CoreError::DuplicateId(expense.id));
        }
        self.ids.observe(expense.id);
        self.expenses.push(expense);
        self.sort_by_date();
        Ok(())
    }

    /// Replaces the record identified by `id` with the draft's fields.
    ///
    /// Returns `Ok(false)` without touching the collection when `id` is unknown.
    pub fn update(&mut self, id: ExpenseId, draft: ExpenseDraft) -> Result<bool, CoreError> {
        draft.validate()?;
        let Some(slot) = self.expenses.iter_mut().find(|expense| expense.id == id) else {
            debug!(%id, "update skipped, expense not found");
            return Ok(false);
        };
        *slot = Expense::new(id, draft);
        self.sort_by_date();
        debug!(%id, "expense updated");
        Ok(true)
    }

    /// Removes and returns the record identified by `id`; unknown ids are a no-op.
    pub fn remove(&mut self, id: ExpenseId) -> Option<Expense> {
        let index = self.expenses.iter().position(|expense| expense.id == id)?;
        debug!(%id, "expense removed");
        Some(self.expenses.remove(index))
    }

    pub fn find_by_id(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn contains(&self, id: ExpenseId) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Snapshot of all records, newest first.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Sum of every recorded amount.
    pub fn total(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }

    fn sort_by_date(&mut self) {
        self.expenses.sort_by(|a, b| b.date.cmp(&a.date));
    }
}
