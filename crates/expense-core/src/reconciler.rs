//! Create-versus-update decision driven by the edit mode.

use expense_domain::{ExpenseDraft, ExpenseId};
use tracing::debug;

use crate::{CoreError, ExpenseRepository};

/// Whether a form submission creates a record or overwrites one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Idle,
    Editing(ExpenseId),
}

/// Outcome of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Created(ExpenseId),
    /// `applied` is false when the edited record no longer existed.
    Updated { id: ExpenseId, applied: bool },
}

impl Submission {
    pub fn id(&self) -> ExpenseId {
        match self {
            Submission::Created(id) | Submission::Updated { id, .. } => *id,
        }
    }

    /// True when the repository contents changed.
    pub fn changed(&self) -> bool {
        !matches!(self, Submission::Updated { applied: false, .. })
    }
}

/// Tracks the single record being edited, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    mode: EditMode,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn editing_id(&self) -> Option<ExpenseId> {
        match self.mode {
            EditMode::Idle => None,
            EditMode::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id().is_some()
    }

    /// Enters editing mode for `id` and returns its fields for display.
    ///
    /// An unknown id leaves the current mode untouched and returns `None`. Starting a new
    /// edit while already editing retargets the session.
    pub fn begin_edit(&mut self, repository: &ExpenseRepository, id: ExpenseId) -> Option<ExpenseDraft> {
        let draft = repository.find_by_id(id)?.to_draft();
        self.mode = EditMode::Editing(id);
        debug!(%id, "editing expense");
        Some(draft)
    }

    /// Leaves editing mode, returning the id that was being edited.
    pub fn cancel(&mut self) -> Option<ExpenseId> {
        let previous = self.editing_id();
        self.mode = EditMode::Idle;
        previous
    }

    /// Creates a record when idle, or overwrites the edited record and returns to idle.
    ///
    /// A rejected draft leaves the mode unchanged so the edit can be corrected.
    pub fn submit(
        &mut self,
        repository: &mut ExpenseRepository,
        draft: ExpenseDraft,
        now_millis: i64,
    ) -> Result<Submission, CoreError> {
        match self.mode {
            EditMode::Idle => {
                let id = repository.add(draft, now_millis)?;
                Ok(Submission::Created(id))
            }
            EditMode::Editing(id) => {
                let applied = repository.update(id, draft)?;
                self.mode = EditMode::Idle;
                Ok(Submission::Updated { id, applied })
            }
        }
    }

    /// Called after a deletion; removing the edited record forces idle mode.
    pub fn record_removed(&mut self, id: ExpenseId) -> bool {
        if self.editing_id() == Some(id) {
            self.mode = EditMode::Idle;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use expense_domain::Expense;

    fn draft(category: &str, amount: f64) -> ExpenseDraft {
        ExpenseDraft::new(
            category,
            amount,
            "note",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    fn repository_with_seven() -> ExpenseRepository {
        let mut repository = ExpenseRepository::new();
        repository
            .insert(Expense::new(ExpenseId(7), draft("food", 10.0)))
            .unwrap();
        repository
            .insert(Expense::new(ExpenseId(8), draft("fuel", 20.0)))
            .unwrap();
        repository
    }

    #[test]
    fn idle_submit_creates_new_record() {
        let mut repository = ExpenseRepository::new();
        let mut session = EditSession::new();
        let outcome = session.submit(&mut repository, draft("food", 5.0), 100).unwrap();
        assert_eq!(outcome, Submission::Created(ExpenseId(100)));
        assert_eq!(repository.len(), 1);
        assert_eq!(session.mode(), EditMode::Idle);
    }

    #[test]
    fn editing_submit_overwrites_and_returns_to_idle() {
        let mut repository = repository_with_seven();
        let mut session = EditSession::new();

        let loaded = session.begin_edit(&repository, ExpenseId(7)).unwrap();
        assert_eq!(loaded.amount, 10.0);
        assert_eq!(session.mode(), EditMode::Editing(ExpenseId(7)));

        let outcome = session
            .submit(&mut repository, draft("travel", 42.0), 999)
            .unwrap();
        assert_eq!(
            outcome,
            Submission::Updated {
                id: ExpenseId(7),
                applied: true
            }
        );
        assert_eq!(repository.len(), 2);
        let matching: Vec<_> = repository
            .expenses()
            .iter()
            .filter(|expense| expense.id == ExpenseId(7))
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].amount, 42.0);
        assert_eq!(matching[0].category.as_str(), "travel");
        assert!(!session.is_editing());
    }

    #[test]
    fn begin_edit_of_unknown_id_keeps_mode() {
        let repository = repository_with_seven();
        let mut session = EditSession::new();
        assert!(session.begin_edit(&repository, ExpenseId(1)).is_none());
        assert_eq!(session.mode(), EditMode::Idle);
    }

    #[test]
    fn cancel_returns_to_idle() {
        let repository = repository_with_seven();
        let mut session = EditSession::new();
        session.begin_edit(&repository, ExpenseId(8));
        assert_eq!(session.cancel(), Some(ExpenseId(8)));
        assert_eq!(session.cancel(), None);
    }

    #[test]
    fn invalid_draft_keeps_edit_open() {
        let mut repository = repository_with_seven();
        let mut session = EditSession::new();
        session.begin_edit(&repository, ExpenseId(7));
        let err = session
            .submit(&mut repository, draft("food", -2.0), 1)
            .expect_err("negative amount rejected");
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert_eq!(session.editing_id(), Some(ExpenseId(7)));
    }

    #[test]
    fn deleting_edited_record_forces_idle() {
        let mut repository = repository_with_seven();
        let mut session = EditSession::new();
        session.begin_edit(&repository, ExpenseId(7));
        assert!(!session.record_removed(ExpenseId(8)));
        assert!(session.is_editing());
        repository.remove(ExpenseId(7));
        assert!(session.record_removed(ExpenseId(7)));
        assert_eq!(session.mode(), EditMode::Idle);
    }

    #[test]
    fn submitting_after_record_vanished_reports_unapplied() {
        let mut repository = repository_with_seven();
        let mut session = EditSession::new();
        session.begin_edit(&repository, ExpenseId(7));
        repository.remove(ExpenseId(7));
        let outcome = session.submit(&mut repository, draft("food", 1.0), 5).unwrap();
        assert!(!outcome.changed());
        assert_eq!(repository.len(), 1);
    }
}
