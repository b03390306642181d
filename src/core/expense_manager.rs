//! In-memory expense collection with save-on-write persistence and reporting queries.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::config::ConfigManager;
use crate::core::clock::{Clock, SystemClock};
use crate::core::errors::{ExpenseError, Result};
use crate::domain::{
    sum_amounts, BudgetStatus, Dated, Expense, ExpenseEntry, ExpenseId, Identifiable, MonthKey,
};
use crate::storage::{JsonSnapshotStore, LoadOutcome, Snapshot, SnapshotStore};

/// Owns the expense collection and monthly budget for the lifetime of the process.
///
/// Every mutating call applies its change in memory and then rewrites the whole
/// snapshot through the configured [`SnapshotStore`]. Persistence failures are
/// logged and retained in [`ExpenseManager::last_persist_error`]; they never undo
/// the in-memory change and never reach the caller as an error.
pub struct ExpenseManager {
    entries: Vec<ExpenseEntry>,
    monthly_budget: f64,
    storage: Box<dyn SnapshotStore>,
    clock: Box<dyn Clock>,
    load_outcome: LoadOutcome,
    last_persist_error: Option<ExpenseError>,
}

impl ExpenseManager {
    pub fn new(storage: Box<dyn SnapshotStore>) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    /// Builds a manager and loads the persisted snapshot, if any.
    pub fn with_clock(storage: Box<dyn SnapshotStore>, clock: Box<dyn Clock>) -> Self {
        let (snapshot, load_outcome) = match storage.load() {
            Ok(Some(snapshot)) => {
                info!(
                    expenses = snapshot.expenses.len(),
                    budget = snapshot.monthly_budget,
                    "loaded expense snapshot"
                );
                let expenses = snapshot.expenses.len();
                (snapshot, LoadOutcome::Loaded { expenses })
            }
            Ok(None) => {
                info!("no saved expense data found, starting fresh");
                (Snapshot::default(), LoadOutcome::Fresh)
            }
            Err(err) => {
                warn!(error = %err, "failed to load expense snapshot, starting empty");
                (
                    Snapshot::default(),
                    LoadOutcome::Recovered {
                        reason: err.to_string(),
                    },
                )
            }
        };
        Self {
            entries: snapshot.expenses,
            monthly_budget: snapshot.monthly_budget,
            storage,
            clock,
            load_outcome,
            last_persist_error: None,
        }
    }

    /// Opens a manager backed by a JSON snapshot at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(JsonSnapshotStore::new(path)))
    }

    /// Opens a manager at the snapshot location named by the stored configuration.
    pub fn from_config(config: &ConfigManager) -> Result<Self> {
        let settings = config.load()?;
        Ok(Self::open(config.snapshot_path(&settings)))
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Error from the most recent snapshot write, cleared by the next successful one.
    pub fn last_persist_error(&self) -> Option<&ExpenseError> {
        self.last_persist_error.as_ref()
    }

    pub fn add_expense(&mut self, expense: Expense) -> ExpenseId {
        let entry = ExpenseEntry::new(expense);
        let id = entry.id;
        debug!(%id, expense = %entry.expense, "adding expense");
        self.entries.push(entry);
        self.persist();
        id
    }

    /// Copies of every expense in insertion order.
    pub fn all_expenses(&self) -> Vec<Expense> {
        self.entries
            .iter()
            .map(|entry| entry.expense.clone())
            .collect()
    }

    /// Copies of every expense together with its identifier, in insertion order.
    pub fn entries(&self) -> Vec<ExpenseEntry> {
        self.entries.clone()
    }

    pub fn expense(&self, id: ExpenseId) -> Option<Expense> {
        self.entries
            .iter()
            .find(|entry| entry.id() == id)
            .map(|entry| entry.expense.clone())
    }

    pub fn position_of(&self, id: ExpenseId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    pub fn expense_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the expense at `index`, keeping that slot's identifier.
    /// Out-of-range indices leave everything untouched and return `false`.
    pub fn update_expense(&mut self, index: usize, expense: Expense) -> bool {
        if index >= self.entries.len() {
            debug!(index, len = self.entries.len(), "update ignored, index out of range");
            return false;
        }
        let entry = &mut self.entries[index];
        debug!(index, id = %entry.id, expense = %expense, "updating expense");
        entry.expense = expense;
        self.persist();
        true
    }

    pub fn update_expense_by_id(&mut self, id: ExpenseId, expense: Expense) -> bool {
        match self.position_of(id) {
            Some(index) => self.update_expense(index, expense),
            None => {
                debug!(%id, "update ignored, unknown expense id");
                false
            }
        }
    }

    /// Removes the expense at `index`; later expenses shift down by one.
    /// Out-of-range indices leave everything untouched and return `false`.
    pub fn delete_expense(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            debug!(index, len = self.entries.len(), "delete ignored, index out of range");
            return false;
        }
        let removed = self.entries.remove(index);
        debug!(index, id = %removed.id, "deleted expense");
        self.persist();
        true
    }

    pub fn delete_expense_by_id(&mut self, id: ExpenseId) -> bool {
        match self.position_of(id) {
            Some(index) => self.delete_expense(index),
            None => {
                debug!(%id, "delete ignored, unknown expense id");
                false
            }
        }
    }

    pub fn total_spending(&self) -> f64 {
        sum_amounts(&self.entries)
    }

    /// Sum of amounts per category label, one entry per category present.
    pub fn spending_by_category(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for entry in &self.entries {
            *totals
                .entry(entry.expense.category().to_string())
                .or_insert(0.0) += entry.expense.amount();
        }
        totals
    }

    pub fn spending_for_month(&self, month: MonthKey) -> f64 {
        sum_amounts(
            self.entries
                .iter()
                .filter(|entry| month.contains(entry.date())),
        )
    }

    /// Spending grouped by calendar month, one entry per month present.
    pub fn monthly_spending(&self) -> BTreeMap<MonthKey, f64> {
        let mut totals = BTreeMap::new();
        for entry in &self.entries {
            *totals.entry(MonthKey::of(entry.date())).or_insert(0.0) += entry.expense.amount();
        }
        totals
    }

    pub fn current_month(&self) -> MonthKey {
        MonthKey::of(self.clock.today())
    }

    pub fn current_month_spending(&self) -> f64 {
        self.spending_for_month(self.current_month())
    }

    pub fn set_monthly_budget(&mut self, budget: f64) {
        debug!(budget, "setting monthly budget");
        self.monthly_budget = budget;
        self.persist();
    }

    pub fn monthly_budget(&self) -> f64 {
        self.monthly_budget
    }

    pub fn remaining_budget(&self) -> f64 {
        self.monthly_budget - self.current_month_spending()
    }

    /// True only when current-month spending strictly exceeds the budget.
    pub fn is_over_budget(&self) -> bool {
        self.current_month_spending() > self.monthly_budget
    }

    pub fn budget_status(&self) -> BudgetStatus {
        BudgetStatus::compute(
            self.current_month(),
            self.monthly_budget,
            self.current_month_spending(),
        )
    }

    pub fn clear_all_data(&mut self) {
        info!(expenses = self.entries.len(), "clearing all expense data");
        self.entries.clear();
        self.monthly_budget = 0.0;
        self.persist();
    }

    /// Writes the full snapshot and reports the outcome.
    pub fn save(&mut self) -> Result<()> {
        let snapshot = Snapshot::new(self.entries.clone(), self.monthly_budget);
        let result = self.storage.save(&snapshot);
        match &result {
            Ok(()) => {
                debug!(expenses = snapshot.expenses.len(), "expense snapshot saved");
                self.last_persist_error = None;
            }
            Err(err) => self.last_persist_error = Some(err.clone()),
        }
        result
    }

    fn persist(&mut self) {
        if let Err(err) = self.save() {
            error!(error = %err, "failed to save expense snapshot");
        }
    }
}
