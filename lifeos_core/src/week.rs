//! Calendar week arithmetic.
//!
//! Weeks are anchored on a configurable first weekday. Plan weekdays are
//! always indexed from Monday (0) to Sunday (6), independent of that anchor.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// First date of the week containing `date`
pub fn week_start_of(date: NaiveDate, start: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7 - start.num_days_from_monday()) % 7;
    date - Duration::days(i64::from(offset))
}

/// The seven consecutive dates beginning at `start`
pub fn week_dates(start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// Weekday index used by workout plans (Monday = 0)
pub fn day_of_week_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Human readable range such as `24 Feb – 2 Mar 2026`
pub fn format_week_range(start: NaiveDate) -> String {
    let end = start + Duration::days(6);
    format!("{} – {}", start.format("%-d %b"), end.format("%-d %b %Y"))
}
