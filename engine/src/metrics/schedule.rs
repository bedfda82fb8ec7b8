use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// Accepts RFC 3339, a naive date-time, or a bare date. Anything without an
// offset is read as UTC.
fn parse_end_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Whole days left until `end_date`, rounded up and never negative.
///
/// An empty or unparseable end date counts as already ended.
pub fn calculate_days_remaining(end_date: &str, now: DateTime<Utc>) -> u32 {
    let Some(end) = parse_end_date(end_date) else {
        if !end_date.trim().is_empty() {
            tracing::debug!(end_date = %end_date, "Unparseable end date, reporting 0 days left");
        }
        return 0;
    };
    let remaining_ms = (end - now).num_milliseconds();
    if remaining_ms <= 0 {
        return 0;
    }
    let days = (remaining_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// [`calculate_days_remaining`] against the current clock.
pub fn days_remaining(end_date: &str) -> u32 {
    calculate_days_remaining(end_date, Utc::now())
}
