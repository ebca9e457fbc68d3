use expense_domain::{DraftError, ExpenseId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Duplicate expense id: {0}")]
    DuplicateId(ExpenseId),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DraftError> for CoreError {
    fn from(err: DraftError) -> Self {
        CoreError::InvalidInput(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
