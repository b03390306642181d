use chrono::NaiveDate;

use super::expense::ExpenseId;

/// Identifies records that carry a stable generated identifier.
pub trait Identifiable {
    fn id(&self) -> ExpenseId;
}

/// Exposes the signed monetary amount of a record.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Exposes the calendar date a record is booked on.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Sums the amounts of every item yielded by `items`. Empty input sums to zero.
pub fn sum_amounts<'a, T, I>(items: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .fold(0.0, |total, item| total + item.amount())
}
