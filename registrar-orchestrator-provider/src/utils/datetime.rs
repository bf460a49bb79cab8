//! 日期时间解析工具
//!
//! Registrar responses carry dates either as Unix timestamps (seconds, occasionally
//! milliseconds) or as free-form date strings such as `3/15/2026 1:02:03 PM`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Date-time layouts seen in registrar responses, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Date-only layouts seen in registrar responses, tried in order.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%d.%m.%Y"];

/// 解析 Unix 时间戳（自动判断秒/毫秒）
pub fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // 如果时间戳 > 10^11，认为是毫秒
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}

/// Parses a textual Unix timestamp.
pub fn parse_timestamp_text(raw: &str) -> Option<DateTime<Utc>> {
    raw.trim().parse::<i64>().ok().and_then(parse_unix_timestamp)
}

/// Calendar date of a registrar date value, as seen in `offset`.
///
/// Timestamps are converted into `offset`; textual dates are taken as written.
pub fn parse_registrar_date(raw: &str, offset: FixedOffset) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(ts) = parse_timestamp_text(raw) {
        return Some(ts.with_timezone(&offset).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&offset).date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        })
}
