//! Calendar-month helpers for donation averaging.

use chrono::{Datelike, NaiveDate};

/// Months elapsed since year 0, so month distances are plain subtraction.
fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Inclusive number of calendar months between two dates.
///
/// Only the months matter: 31 Jan and 1 Feb span 2 months, 1 Jan and 31 Jan
/// span 1. Argument order is irrelevant.
pub fn month_span(first: NaiveDate, last: NaiveDate) -> u32 {
    let distance = (month_index(last) - month_index(first)).unsigned_abs();
    u32::try_from(distance).unwrap_or(u32::MAX - 1) + 1
}
