#![doc(test(attr(deny(warnings))))]

//! Expense Tracker records dated, categorized spending, persists it locally and
//! renders monthly, weekly and daily summaries through an interactive shell.

pub mod cli;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Tracker tracing initialized.");
    });
}
