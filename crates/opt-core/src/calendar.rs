//! Calendar helpers: day arithmetic, trailing windows, and ISO week buckets.
//!
//! All day-keyed accumulation in the workspace is indexed by integer offset
//! from a known origin date, so iteration order is always chronological.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Calendar date on which a timestamp falls.
pub fn day_of(timestamp: &NaiveDateTime) -> NaiveDate {
    timestamp.date()
}

/// First instant of `day`.
pub fn midnight(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// Signed number of whole days from `earlier` to `later`.
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// `day` moved back by `days`, saturating at the earliest representable date.
pub fn shift_back(day: NaiveDate, days: u64) -> NaiveDate {
    day.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// `day` moved forward by `days`, saturating at the latest representable date.
pub fn shift_forward(day: NaiveDate, days: u64) -> NaiveDate {
    day.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

/// Monday of the ISO week containing `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    shift_back(day, day.weekday().num_days_from_monday() as u64)
}

/// Whether the week `[week_start, week_start + 6]` shares at least one day
/// with `[start, end]`.
pub fn week_overlaps(week_start: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    let week_end = shift_forward(week_start, 6);
    week_start <= end && week_end >= start
}
