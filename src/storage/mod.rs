pub mod json_backend;

use serde::{Deserialize, Serialize};

use crate::core::errors::{ExpenseError, Result};
use crate::domain::ExpenseEntry;

pub const SNAPSHOT_SCHEMA_VERSION: u8 = 1;

/// Complete persisted state: every expense plus the monthly budget, written and
/// read as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub schema_version: u8,
    pub expenses: Vec<ExpenseEntry>,
    pub monthly_budget: f64,
}

impl Snapshot {
    pub fn new(expenses: Vec<ExpenseEntry>, monthly_budget: f64) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            expenses,
            monthly_budget,
        }
    }

    /// JSON has no encoding for NaN or infinities, so a snapshot holding one
    /// would not read back.
    pub fn validate(&self) -> Result<()> {
        if !self.monthly_budget.is_finite() {
            return Err(ExpenseError::InvalidInput(format!(
                "monthly budget {} is not a finite number",
                self.monthly_budget
            )));
        }
        if let Some((index, entry)) = self
            .expenses
            .iter()
            .enumerate()
            .find(|(_, entry)| !entry.expense.amount().is_finite())
        {
            return Err(ExpenseError::InvalidInput(format!(
                "expense {} at position {} has non-finite amount {}",
                entry.id,
                index,
                entry.expense.amount()
            )));
        }
        Ok(())
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Vec::new(), 0.0)
    }
}

/// How the manager obtained its starting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No snapshot existed; started empty.
    Fresh,
    /// A snapshot was read successfully.
    Loaded { expenses: usize },
    /// A snapshot existed but could not be read; started empty.
    Recovered { reason: String },
}

/// Abstraction over whole-snapshot persistence backends.
pub trait SnapshotStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Replaces any previously saved snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

pub use json_backend::JsonSnapshotStore;
