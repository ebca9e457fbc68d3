//! Calendar utilities for expense records.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive calendar range covering one month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    /// Returns the month that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let start = date - Duration::days(date.day0() as i64);
        let (next_year, next_month) = match date.month() {
            12 => (date.year() + 1, 1),
            month => (date.year(), month + 1),
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first_next| first_next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days in the month.
    pub fn day_count(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    /// Iterates every day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.day_count() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_window_spans_whole_month() {
        let window = MonthWindow::containing(date(2024, 2, 17));
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));
        assert_eq!(window.day_count(), 29);
        assert_eq!(window.days().count(), 29);
    }

    #[test]
    fn month_window_handles_december() {
        let window = MonthWindow::containing(date(2023, 12, 31));
        assert_eq!(window.start, date(2023, 12, 1));
        assert_eq!(window.end, date(2023, 12, 31));
        assert!(window.contains(date(2023, 12, 1)));
        assert!(!window.contains(date(2024, 1, 1)));
    }

    #[test]
    fn february_length_follows_leap_years() {
        assert_eq!(MonthWindow::containing(date(1900, 2, 10)).day_count(), 28);
        assert_eq!(MonthWindow::containing(date(2000, 2, 10)).day_count(), 29);
        assert_eq!(MonthWindow::containing(date(2023, 2, 28)).day_count(), 28);
        assert_eq!(MonthWindow::containing(date(2024, 4, 30)).end, date(2024, 4, 30));
    }
}
