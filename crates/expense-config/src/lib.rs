//! expense-config
//!
//! Persistent user preferences for the expense tracker and their on-disk management.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{default_base_dir, ConfigManager, HOME_ENV_VAR};
pub use model::{AccessibilitySettings, Config, DateStyle};
