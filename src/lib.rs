#![doc(test(attr(deny(warnings))))]

//! Expense Core records spending events, persists them as a single snapshot, and
//! derives totals, per-category sums, monthly spending, and budget status.

pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

pub use crate::core::{Clock, ExpenseError, ExpenseManager, FixedClock, SystemClock};
pub use crate::domain::{BudgetStatus, Expense, ExpenseEntry, ExpenseId, MonthKey};
pub use crate::storage::{JsonSnapshotStore, LoadOutcome, Snapshot, SnapshotStore};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and logs build metadata.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(config::DEFAULT_LOG_FILTER);
        let build = utils::build_info::current();
        tracing::info!(
            version = build.version,
            git = build.git_hash,
            status = build.git_status,
            built = build.timestamp,
            profile = build.profile,
            "Expense Core tracing initialized."
        );
    });
}
