#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use chrono::NaiveDate;
use expense_core::FixedClock;
use expense_tracker::cli::{CliMode, ShellContext};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn reference_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
}

/// Script-mode shell over an isolated base directory, pinned to 2024-03-15.
pub fn setup_shell() -> (ShellContext, PathBuf) {
    let base = temp_base();
    let context = open_shell(&base);
    (context, base)
}

pub fn open_shell(base: &std::path::Path) -> ShellContext {
    ShellContext::with_base_dir(
        CliMode::Script,
        base.to_path_buf(),
        Arc::new(FixedClock::on(reference_day())),
    )
    .expect("open shell context")
}

pub fn run(context: &mut ShellContext, lines: &[&str]) {
    for line in lines {
        context
            .process_line(line)
            .unwrap_or_else(|err| panic!("`{line}` failed: {err}"));
    }
}
