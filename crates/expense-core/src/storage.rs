use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use expense_domain::{validate_amount, Expense};

use crate::CoreError;

/// Key under which the expense collection is stored by default.
pub const DEFAULT_STORE_KEY: &str = "expenses";

/// Abstraction over blob stores that hold the whole expense collection.
pub trait ExpenseStore: Send + Sync {
    /// Loads every stored expense. An empty or never-written store yields an empty list.
    fn load(&self) -> Result<Vec<Expense>, CoreError>;
    /// Replaces the stored collection with `expenses`.
    fn save(&self, expenses: &[Expense]) -> Result<(), CoreError>;
}

impl<T: ExpenseStore + ?Sized> ExpenseStore for Arc<T> {
    fn load(&self) -> Result<Vec<Expense>, CoreError> {
        (**self).load()
    }

    fn save(&self, expenses: &[Expense]) -> Result<(), CoreError> {
        (**self).save(expenses)
    }
}

/// Serializes the collection into the JSON blob format shared by all stores.
pub fn encode_expenses(expenses: &[Expense]) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(expenses)?)
}

/// Parses a JSON blob. Blank input is treated as an empty collection.
pub fn decode_expenses(data: &str) -> Result<Vec<Expense>, CoreError> {
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(data)?)
}

/// In-process key-value blob store.
#[derive(Debug)]
pub struct MemoryStore {
    key: String,
    blobs: Mutex<HashMap<String, String>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            key: DEFAULT_STORE_KEY.to_string(),
            blobs: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a store that already holds `blob` under its key.
    pub fn seeded(blob: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut blobs) = store.blobs.lock() {
            blobs.insert(store.key.clone(), blob.into());
        }
        store
    }

    /// Raw blob currently stored under the key.
    pub fn blob(&self) -> Option<String> {
        self.blobs
            .lock()
            .ok()
            .and_then(|blobs| blobs.get(&self.key).cloned())
    }
}

impl ExpenseStore for MemoryStore {
    fn load(&self) -> Result<Vec<Expense>, CoreError> {
        match self.blob() {
            Some(data) => decode_expenses(&data),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, expenses: &[Expense]) -> Result<(), CoreError> {
        let data = encode_expenses(expenses)?;
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))?;
        blobs.insert(self.key.clone(), data);
        Ok(())
    }
}

/// Detects anomalies in a loaded collection that the repository tolerates but should report.
pub fn store_warnings(expenses: &[Expense]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for expense in expenses {
        if !seen.insert(expense.id) {
            warnings.push(format!("expense id {} appears more than once", expense.id));
        }
        if !expense.category.is_recognized() {
            warnings.push(format!(
                "expense {} uses unrecognized category `{}`",
                expense.id, expense.category
            ));
        }
        if let Err(err) = validate_amount(expense.amount) {
            warnings.push(format!("expense {} has an invalid amount: {err}", expense.id));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use expense_domain::{ExpenseDraft, ExpenseId};

    fn expense(id: u64, category: &str, amount: f64) -> Expense {
        Expense::new(
            ExpenseId(id),
            ExpenseDraft::new(
                category,
                amount,
                "",
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ),
        )
    }

    #[test]
    fn empty_memory_store_loads_nothing() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());
        assert!(store.blob().is_none());
    }

    #[test]
    fn memory_store_keeps_json_blob_under_key() {
        let store = MemoryStore::new();
        store.save(&[expense(1, "food", 10.0)]).unwrap();
        let blob = store.blob().expect("blob written");
        assert!(blob.contains("\"category\": \"food\""));
        assert_eq!(store.load().unwrap(), vec![expense(1, "food", 10.0)]);
    }

    #[test]
    fn corrupt_blob_surfaces_serde_error() {
        let store = MemoryStore::seeded("{not json");
        let err = store.load().expect_err("corrupt blob must fail");
        assert!(matches!(err, CoreError::Serde(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn blank_blob_is_an_empty_collection() {
        assert!(decode_expenses("  \n").unwrap().is_empty());
    }

    #[test]
    fn warnings_flag_duplicates_unknown_categories_and_bad_amounts() {
        let expenses = vec![
            expense(1, "food", 10.0),
            expense(1, "pets", 5.0),
            expense(2, "bills", -3.0),
        ];
        let warnings = store_warnings(&expenses);
        assert_eq!(warnings.len(), 3, "warnings: {warnings:?}");
        assert!(warnings[0].contains("more than once"));
        assert!(warnings[1].contains("pets"));
        assert!(warnings[2].contains("negative"));
    }
}
