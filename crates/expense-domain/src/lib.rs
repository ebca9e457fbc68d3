//! expense-domain
//!
//! Pure domain models for the expense ledger (Expense, Category, buckets, summaries).
//! No I/O, no CLI, no storage. Only data types and calendar helpers.

pub mod category;
pub mod common;
pub mod expense;
pub mod summary;

pub use category::*;
pub use common::*;
pub use expense::*;
pub use summary::*;
