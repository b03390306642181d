#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use expense_core::{ExpenseManager, FixedClock, JsonSnapshotStore};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a snapshot path inside a fresh temporary directory.
pub fn temp_snapshot_path() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("expenses.json");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Opens a manager over `path` with "today" pinned to `today`.
pub fn manager_at(path: &Path, today: NaiveDate) -> ExpenseManager {
    ExpenseManager::with_clock(
        Box::new(JsonSnapshotStore::new(path)),
        Box::new(FixedClock::new(today)),
    )
}
