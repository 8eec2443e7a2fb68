//! Reservation date parsing and inclusive day counting.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Accepts a bare date (midnight) or a date-time with or without seconds.
pub fn parse_reservation_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Number of days a reservation covers, counting both ends. Partial days
/// round down before the `+ 1`; reversed ranges count the same as forward ones.
pub fn day_count(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_days().abs() + 1
}
