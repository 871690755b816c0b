use chrono::{DateTime, NaiveDate, Utc};

/// Format used for `<lastmod>` values: a calendar date, never a time.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current calendar date in UTC.
///
/// Stored timestamps are Unix seconds, so "today" is taken in the same
/// zone to keep fallback dates comparable with stored ones.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Converts a Unix timestamp (seconds) into its UTC calendar date.
///
/// Returns `None` for timestamps chrono cannot represent, so callers can
/// fall through to the next candidate date.
pub fn timestamp_to_date(secs: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
