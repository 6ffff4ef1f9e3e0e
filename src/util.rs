use chrono::{DateTime, FixedOffset, NaiveDate};

/// Calendar day a commit is bucketed under: the day of its timestamp in
/// the commit's own UTC offset, time of day discarded.
pub fn day_key(timestamp: &DateTime<FixedOffset>) -> NaiveDate {
    timestamp.date_naive()
}
