pub mod common;
pub mod expense;
pub mod summary;

pub use common::{sum_amounts, Amounted, Dated, Identifiable};
pub use expense::{Expense, ExpenseEntry, ExpenseId};
pub use summary::{BudgetStatus, MonthKey};
