//! ISO-8601 parsing and canonical formatting for date fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Timelike, Utc};

const NAIVE_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

/// Parses a wire date into a UTC instant.
///
/// Accepts RFC 3339 with an offset, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// timestamp (read as UTC, the backend's `NaiveDateTime` output) and a bare
/// `YYYY-MM-DD` date (midnight UTC). Anything else returns `None`.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.len() != raw.len() || trimmed.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, NAIVE_DATE_TIME_FORMAT) {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, DATE_ONLY_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parses an epoch-millisecond timestamp into a UTC instant.
pub fn instant_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// Formats an instant as `YYYY-MM-DDTHH:MM:SS.sssZ`.
///
/// Instants carrying sub-millisecond digits keep them (`.ssssss` or
/// `.sssssssss`) so a decode/encode cycle never moves the instant.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    let precision = if instant.nanosecond() % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::AutoSi
    };
    instant.to_rfc3339_opts(precision, true)
}
