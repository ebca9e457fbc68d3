//! Application state: repository, view, edit session and persistence wired together.

use std::sync::Arc;

use chrono::NaiveDate;
use expense_domain::{DashboardSummary, Expense, ExpenseDraft, ExpenseId};
use tracing::{info, warn};

use crate::{
    storage::store_warnings, AnalyticsService, Clock, CoreError, EditSession, ExpenseRepository,
    ExpenseStore, SortColumn, SortConfig, Submission, ViewState,
};

/// Owns every piece of mutable state behind the user interface.
///
/// Each mutation writes the full collection back to the store before returning, so
/// callers observe the persisted state. Aggregates are recomputed on demand.
pub struct ExpenseTracker {
    repository: ExpenseRepository,
    view: ViewState,
    session: EditSession,
    store: Box<dyn ExpenseStore>,
    clock: Arc<dyn Clock>,
}

impl ExpenseTracker {
    /// Loads the stored collection and starts idle with no filter or sort.
    pub fn open(store: Box<dyn ExpenseStore>, clock: Arc<dyn Clock>) -> Result<Self, CoreError> {
        let expenses = load_checked(store.as_ref())?;
        info!(count = expenses.len(), "expenses loaded");
        Ok(Self {
            repository: ExpenseRepository::from_expenses(expenses),
            view: ViewState::new(),
            session: EditSession::new(),
            store,
            clock,
        })
    }

    /// Creates or updates depending on the edit mode, then persists.
    pub fn submit(&mut self, draft: ExpenseDraft) -> Result<Submission, CoreError> {
        let now = self.clock.timestamp_millis();
        let outcome = self.session.submit(&mut self.repository, draft, now)?;
        if outcome.changed() {
            self.persist()?;
        } else {
            warn!(id = %outcome.id(), "edited expense no longer exists; nothing saved");
        }
        Ok(outcome)
    }

    /// Enters editing mode and returns the record's current fields.
    pub fn begin_edit(&mut self, id: ExpenseId) -> Option<ExpenseDraft> {
        self.session.begin_edit(&self.repository, id)
    }

    pub fn cancel_edit(&mut self) -> Option<ExpenseId> {
        self.session.cancel()
    }

    /// Deletes a record. Deleting the record under edit also ends the edit.
    pub fn remove(&mut self, id: ExpenseId) -> Result<Option<Expense>, CoreError> {
        let removed = self.repository.remove(id);
        if removed.is_some() {
            if self.session.record_removed(id) {
                info!(%id, "edit cancelled because the expense was deleted");
            }
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn set_filter(&mut self, category: Option<&str>) {
        self.view.apply_filter(category);
    }

    pub fn toggle_sort(&mut self, column: SortColumn) -> SortConfig {
        self.view.toggle_sort(column)
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Filtered and sorted rows for display.
    pub fn view(&self) -> Vec<&Expense> {
        self.view.compute_view(self.repository.expenses())
    }

    pub fn dashboard(&self) -> DashboardSummary {
        AnalyticsService::dashboard(self.repository.expenses(), self.today())
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn editing(&self) -> Option<ExpenseId> {
        self.session.editing_id()
    }

    pub fn repository(&self) -> &ExpenseRepository {
        &self.repository
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.repository.find_by_id(id)
    }

    /// Replaces the in-memory collection with the store's contents and ends any edit.
    pub fn reload(&mut self) -> Result<usize, CoreError> {
        let expenses = load_checked(self.store.as_ref())?;
        self.repository = ExpenseRepository::from_expenses(expenses);
        self.session.cancel();
        Ok(self.repository.len())
    }

    fn persist(&self) -> Result<(), CoreError> {
        self.store.save(self.repository.expenses())
    }
}

fn load_checked(store: &dyn ExpenseStore) -> Result<Vec<Expense>, CoreError> {
    let expenses = store.load()?;
    for warning in store_warnings(&expenses) {
        warn!("{warning}");
    }
    Ok(expenses)
}
