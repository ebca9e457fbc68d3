//! Derived aggregate shapes handed to presentation layers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Total spend over one week-aligned slice of a month. Both ends are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekBucket {
    pub week_number: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total: f64,
}

impl WeekBucket {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn day_count(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    pub fn label(&self) -> String {
        format!("Week {}", self.week_number)
    }
}

/// Total spend on a single date that has at least one expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub total: f64,
}

/// Total spend for one category key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Every aggregate the dashboard shows, computed for one reference day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub reference: NaiveDate,
    pub month_total: f64,
    pub average_daily: f64,
    pub all_time_total: f64,
    pub month_count: usize,
    pub all_time_count: usize,
    pub month_category_totals: Vec<CategoryTotal>,
    pub all_time_category_totals: Vec<CategoryTotal>,
    pub week_buckets: Vec<WeekBucket>,
    pub daily_buckets: Vec<DayBucket>,
}

impl DashboardSummary {
    /// Share of the month total spent in `category`, as a percentage.
    pub fn month_share(&self, category: &Category) -> f64 {
        if self.month_total <= 0.0 {
            return 0.0;
        }
        self.month_category_totals
            .iter()
            .filter(|entry| entry.category.as_str() == category.as_str())
            .map(|entry| entry.total)
            .sum::<f64>()
            / self.month_total
            * 100.0
    }
}
