use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar month used to bucket spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Budget position for a single month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub month: MonthKey,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub over_budget: bool,
}

impl BudgetStatus {
    /// Derives remaining and over-budget flags. Spending equal to the budget is
    /// still within budget.
    pub fn compute(month: MonthKey, budget: f64, spent: f64) -> Self {
        Self {
            month,
            budget,
            spent,
            remaining: budget - spent,
            over_budget: spent > budget,
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: spent {:.2} of {:.2}, remaining {:.2}{}",
            self.month,
            self.spent,
            self.budget,
            self.remaining,
            if self.over_budget { " (over budget)" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_spending_is_not_over_budget() {
        let status = BudgetStatus::compute(MonthKey::new(2024, 5), 100.0, 100.0);
        assert_eq!(status.remaining, 0.0);
        assert!(!status.over_budget);
    }

    #[test]
    fn remaining_goes_negative_when_overspent() {
        let status = BudgetStatus::compute(MonthKey::new(2024, 5), 100.0, 130.0);
        assert_eq!(status.remaining, -30.0);
        assert!(status.over_budget);
    }

    #[test]
    fn month_keys_order_chronologically() {
        let mut keys = vec![
            MonthKey::new(2024, 1),
            MonthKey::new(2023, 12),
            MonthKey::new(2024, 11),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                MonthKey::new(2023, 12),
                MonthKey::new(2024, 1),
                MonthKey::new(2024, 11)
            ]
        );
        assert_eq!(MonthKey::new(2024, 1).to_string(), "2024-01");
    }
}
