//! Category filter and column sort applied on top of the repository order.

use std::{cmp::Ordering, fmt, str::FromStr};

use expense_domain::Expense;
use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

/// Sortable expense fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Date,
    Category,
    Description,
    Amount,
}

impl SortColumn {
    pub fn all() -> [SortColumn; 4] {
        [
            SortColumn::Date,
            SortColumn::Category,
            SortColumn::Description,
            SortColumn::Amount,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::Date => "date",
            SortColumn::Category => "category",
            SortColumn::Description => "description",
            SortColumn::Amount => "amount",
        }
    }

    /// Dates compare chronologically, amounts numerically, everything else as
    /// case-insensitive text.
    pub fn compare(self, a: &Expense, b: &Expense) -> Ordering {
        match self {
            SortColumn::Date => a.date.cmp(&b.date),
            SortColumn::Amount => a.amount.total_cmp(&b.amount),
            SortColumn::Category => compare_text(a.category.as_str(), b.category.as_str()),
            SortColumn::Description => compare_text(&a.description, &b.description),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl FromStr for SortColumn {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortColumn::Date),
            "category" => Ok(SortColumn::Category),
            "description" => Ok(SortColumn::Description),
            "amount" => Ok(SortColumn::Amount),
            other => Err(CoreError::InvalidInput(format!(
                "unknown sort column `{other}` (expected date, category, description or amount)"
            ))),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// Display state of the expense table. Never mutates the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    filter_category: Option<String>,
    sort: Option<SortConfig>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrows the view to one category; `None` or a blank name shows everything.
    pub fn apply_filter(&mut self, category: Option<&str>) {
        self.filter_category = category
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string);
    }

    /// Sorts by `column`, flipping direction when it is already the sort column.
    pub fn toggle_sort(&mut self, column: SortColumn) -> SortConfig {
        let next = match self.sort {
            Some(current) if current.column == column => SortConfig {
                column,
                direction: current.direction.toggled(),
            },
            _ => SortConfig {
                column,
                direction: SortDirection::Ascending,
            },
        };
        self.sort = Some(next);
        next
    }

    pub fn filter_category(&self) -> Option<&str> {
        self.filter_category.as_deref()
    }

    pub fn sort(&self) -> Option<SortConfig> {
        self.sort
    }

    /// Filters `expenses` by category then applies the stable column sort, if any.
    pub fn compute_view<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        let mut rows: Vec<&Expense> = match self.filter_category.as_deref() {
            Some(category) => expenses
                .iter()
                .filter(|expense| expense.category.as_str() == category)
                .collect(),
            None => expenses.iter().collect(),
        };
        if let Some(SortConfig { column, direction }) = self.sort {
            rows.sort_by(|a, b| direction.apply(column.compare(a, b)));
        }
        rows
    }
}
