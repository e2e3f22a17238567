//! Date helpers for task due dates.

use chrono::{DateTime, Datelike, Utc};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Whole days from `now_ms` until `timestamp_ms`, rounded up.
///
/// Past timestamps give zero or negative values.
pub fn days_until(timestamp_ms: i64, now_ms: i64) -> i64 {
    let delta = timestamp_ms.saturating_sub(now_ms);
    delta.div_euclid(DAY_MS) + i64::from(delta.rem_euclid(DAY_MS) != 0)
}

/// `days_until` against the current clock.
pub fn days_until_now(timestamp_ms: i64) -> i64 {
    days_until(timestamp_ms, Utc::now().timestamp_millis())
}

/// Formats an epoch-millisecond timestamp as `"<Month>, <day>, <year>"` (UTC).
///
/// Returns `None` when the timestamp is outside the representable range.
pub fn format_date(timestamp_ms: i64) -> Option<String> {
    let date = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)?;
    Some(format!("{}, {}, {}", date.format("%B"), date.day(), date.year()))
}

#[cfg(test)]
mod tests {
    use super::{days_until, format_date, DAY_MS};

    #[test]
    fn days_until_rounds_partial_days_up() {
        let now = 1_700_000_000_000;
        assert_eq!(days_until(now, now), 0);
        assert_eq!(days_until(now + 1, now), 1);
        assert_eq!(days_until(now + DAY_MS, now), 1);
        assert_eq!(days_until(now + DAY_MS + 1, now), 2);
        assert_eq!(days_until(now - DAY_MS / 2, now), 0);
        assert_eq!(days_until(now - DAY_MS, now), -1);
    }

    #[test]
    fn days_until_saturates_at_extreme_inputs() {
        assert_eq!(days_until(i64::MAX, i64::MIN), i64::MAX / DAY_MS + 1);
        assert_eq!(days_until(i64::MIN, i64::MAX), i64::MIN / DAY_MS);
    }

    #[test]
    fn format_date_uses_long_month_name() {
        // 2024-03-05T12:00:00Z
        assert_eq!(format_date(1_709_640_000_000).as_deref(), Some("March, 5, 2024"));
        assert_eq!(format_date(0).as_deref(), Some("January, 1, 1970"));
    }
}
