use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Amounted, Dated, Identifiable};

/// Generated identifier attached to an expense when it enters the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ExpenseId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One recorded spending event.
///
/// Values are immutable once built: the `with_*` helpers return a modified copy,
/// so a stored record can only change through the manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    amount: f64,
    category: String,
    date: NaiveDate,
    description: String,
}

impl Expense {
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            date,
            description: description.into(),
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn with_amount(self, amount: f64) -> Self {
        Self { amount, ..self }
    }

    pub fn with_category(self, category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..self
        }
    }

    pub fn with_date(self, date: NaiveDate) -> Self {
        Self { date, ..self }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self
        }
    }
}

/// Pipe-delimited rendering for display and logs. Not a parseable format.
impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} | {} | {} | {}",
            self.amount,
            self.category,
            self.date.format("%Y-%m-%d"),
            self.description
        )
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for Expense {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// An expense paired with the identifier assigned at insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: ExpenseId,
    pub expense: Expense,
}

impl ExpenseEntry {
    pub fn new(expense: Expense) -> Self {
        Self {
            id: ExpenseId::new(),
            expense,
        }
    }
}

impl Identifiable for ExpenseEntry {
    fn id(&self) -> ExpenseId {
        self.id
    }
}

impl Amounted for ExpenseEntry {
    fn amount(&self) -> f64 {
        self.expense.amount
    }
}

impl Dated for ExpenseEntry {
    fn date(&self) -> NaiveDate {
        self.expense.date
    }
}
