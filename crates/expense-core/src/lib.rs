//! expense-core
//!
//! Business logic for the expense tracker: repository, aggregation, view state and the
//! edit/create reconciler. Depends on expense-domain. No CLI, no terminal I/O, no file access.

pub mod analytics;
pub mod error;
pub mod format;
pub mod id;
pub mod reconciler;
pub mod repository;
pub mod storage;
pub mod time;
pub mod tracker;
pub mod view;

pub use analytics::AnalyticsService;
pub use error::CoreError;
pub use format::{CurrencyFormatter, DateFormatter};
pub use id::IdGenerator;
pub use reconciler::{EditMode, EditSession, Submission};
pub use repository::ExpenseRepository;
pub use storage::{ExpenseStore, MemoryStore};
pub use time::{Clock, FixedClock};
pub use tracker::ExpenseTracker;
pub use view::{SortColumn, SortConfig, SortDirection, ViewState};
