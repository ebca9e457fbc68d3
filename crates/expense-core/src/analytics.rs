//! Pure aggregation over an expense snapshot and a reference day.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use expense_domain::{CategoryTotal, DashboardSummary, DayBucket, Expense, MonthWindow, WeekBucket};

/// Computes derived views of the ledger. Every function is total: an empty input yields
/// zeros or empty collections. Sums are unrounded.
pub struct AnalyticsService;

impl AnalyticsService {
    /// Expenses dated within the month that contains `today`.
    pub fn current_month(expenses: &[Expense], today: NaiveDate) -> Vec<&Expense> {
        let month = MonthWindow::containing(today);
        expenses
            .iter()
            .filter(|expense| month.contains(expense.date))
            .collect()
    }

    /// Sum of amounts over any record set.
    pub fn total<'a, I>(expenses: I) -> f64
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        expenses.into_iter().map(|expense| expense.amount).sum()
    }

    pub fn month_total(expenses: &[Expense], today: NaiveDate) -> f64 {
        Self::total(Self::current_month(expenses, today))
    }

    /// Inclusive date ranges of the month's week buckets, in order.
    ///
    /// The first range runs from the 1st through the first Sunday (a single day when the
    /// month starts on a Sunday, a full week when it starts on a Monday). Later ranges run
    /// Monday to Sunday and the last one stops at the end of the month.
    pub fn week_spans(today: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
        let month = MonthWindow::containing(today);
        let mut spans = Vec::new();
        let mut start = month.start;
        while start <= month.end {
            let to_sunday = 6 - start.weekday().num_days_from_monday() as i64;
            let end = (start + Duration::days(to_sunday)).min(month.end);
            spans.push((start, end));
            start = end + Duration::days(1);
        }
        spans
    }

    /// Week-aligned totals partitioning the month that contains `today`.
    pub fn week_buckets(expenses: &[Expense], today: NaiveDate) -> Vec<WeekBucket> {
        Self::week_spans(today)
            .into_iter()
            .zip(1..)
            .map(|((start, end), week_number)| WeekBucket {
                week_number,
                start,
                end,
                total: Self::total(
                    expenses
                        .iter()
                        .filter(|expense| expense.date >= start && expense.date <= end),
                ),
            })
            .collect()
    }

    /// Per-date totals for the current month, ascending. Dates without spending are absent.
    pub fn daily_buckets(expenses: &[Expense], today: NaiveDate) -> Vec<DayBucket> {
        let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for expense in Self::current_month(expenses, today) {
            *per_day.entry(expense.date).or_insert(0.0) += expense.amount;
        }
        per_day
            .into_iter()
            .map(|(date, total)| DayBucket { date, total })
            .collect()
    }

    /// Totals grouped by the literal category string, in order of first appearance.
    pub fn category_totals<'a, I>(expenses: I) -> Vec<CategoryTotal>
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut positions: HashMap<&'a str, usize> = HashMap::new();
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for expense in expenses {
            let key = expense.category.as_str();
            match positions.get(key) {
                Some(&index) => totals[index].total += expense.amount,
                None => {
                    positions.insert(key, totals.len());
                    totals.push(CategoryTotal {
                        category: expense.category.clone(),
                        total: expense.amount,
                    });
                }
            }
        }
        totals
    }

    /// Month total divided by the days elapsed so far, capped at the month length.
    pub fn average_daily(expenses: &[Expense], today: NaiveDate) -> f64 {
        let month = MonthWindow::containing(today);
        let elapsed = today.day().min(month.day_count());
        if elapsed == 0 {
            return 0.0;
        }
        Self::month_total(expenses, today) / elapsed as f64
    }

    /// Assembles every dashboard aggregate for `today`.
    pub fn dashboard(expenses: &[Expense], today: NaiveDate) -> DashboardSummary {
        let month = Self::current_month(expenses, today);
        DashboardSummary {
            reference: today,
            month_total: Self::total(month.iter().copied()),
            average_daily: Self::average_daily(expenses, today),
            all_time_total: Self::total(expenses),
            month_count: month.len(),
            all_time_count: expenses.len(),
            month_category_totals: Self::category_totals(month.iter().copied()),
            all_time_category_totals: Self::category_totals(expenses),
            week_buckets: Self::week_buckets(expenses, today),
            daily_buckets: Self::daily_buckets(expenses, today),
        }
    }
}
