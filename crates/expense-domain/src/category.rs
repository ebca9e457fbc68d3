//! Expense categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Spending category attached to every expense.
///
/// Stored as its lowercase name. Names outside the fixed set are kept verbatim in
/// [`Category::Unrecognized`] so that grouping stays faithful to the stored string;
/// presentation maps them onto [`Category::Other`] through [`Category::display_bucket`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Fuel,
    Food,
    Travel,
    Shopping,
    Bills,
    Entertainment,
    Other,
    Unrecognized(String),
}

impl Category {
    /// The closed set of categories offered to users.
    pub fn known() -> [Category; 7] {
        [
            Category::Fuel,
            Category::Food,
            Category::Travel,
            Category::Shopping,
            Category::Bills,
            Category::Entertainment,
            Category::Other,
        ]
    }

    /// Maps a stored name onto a category. Matching is exact.
    pub fn from_name(name: &str) -> Self {
        match name {
            "fuel" => Category::Fuel,
            "food" => Category::Food,
            "travel" => Category::Travel,
            "shopping" => Category::Shopping,
            "bills" => Category::Bills,
            "entertainment" => Category::Entertainment,
            "other" => Category::Other,
            _ => Category::Unrecognized(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Fuel => "fuel",
            Category::Food => "food",
            Category::Travel => "travel",
            Category::Shopping => "shopping",
            Category::Bills => "bills",
            Category::Entertainment => "entertainment",
            Category::Other => "other",
            Category::Unrecognized(name) => name,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }

    /// Category used when rendering; unrecognized names fall back to `Other`.
    pub fn display_bucket(&self) -> Category {
        match self {
            Category::Unrecognized(_) => Category::Other,
            known => known.clone(),
        }
    }

    /// Capitalised label, e.g. `Food`.
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_name(&value)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from_name(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Unrecognized(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
