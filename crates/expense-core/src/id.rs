use expense_domain::{Expense, ExpenseId};

/// Hands out creation-time-derived ids that never repeat.
///
/// Ids follow the wall clock in milliseconds, but each id is at least one greater than the
/// previous one, so two additions within the same tick (or after the clock steps backwards)
/// still receive distinct ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts after the highest id already present in `expenses`.
    pub fn seeded(expenses: &[Expense]) -> Self {
        let mut generator = Self::new();
        for expense in expenses {
            generator.observe(expense.id);
        }
        generator
    }

    /// Records an externally assigned id so later ids stay ahead of it.
    pub fn observe(&mut self, id: ExpenseId) {
        self.last = self.last.max(id.value());
    }

    pub fn next(&mut self, now_millis: i64) -> ExpenseId {
        let candidate = u64::try_from(now_millis).unwrap_or(0);
        let id = candidate.max(self.last.saturating_add(1));
        self.last = id;
        ExpenseId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_clock_when_it_advances() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next(1_000), ExpenseId(1_000));
        assert_eq!(ids.next(5_000), ExpenseId(5_000));
    }

    #[test]
    fn same_tick_yields_distinct_ids() {
        let mut ids = IdGenerator::new();
        let first = ids.next(42);
        let second = ids.next(42);
        let third = ids.next(41);
        assert_eq!(first, ExpenseId(42));
        assert_eq!(second, ExpenseId(43));
        assert_eq!(third, ExpenseId(44));
    }

    #[test]
    fn negative_clock_readings_still_produce_ids() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next(-5), ExpenseId(1));
        assert_eq!(ids.next(-5), ExpenseId(2));
    }

    #[test]
    fn observed_ids_push_generator_forward() {
        let mut ids = IdGenerator::new();
        ids.observe(ExpenseId(900));
        assert_eq!(ids.next(10), ExpenseId(901));
    }
}
