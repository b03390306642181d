pub mod clock;
pub mod errors;
pub mod expense_manager;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{ExpenseError, Result};
pub use expense_manager::ExpenseManager;
