//! Time utilities for report windows

use chrono::{TimeZone, Utc};

/// Seconds in a day (24 × 60 × 60 = 86400)
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Convert a span in days to seconds
pub fn days_to_seconds(days: u32) -> i64 {
    days as i64 * SECONDS_PER_DAY
}

/// Current Unix timestamp in seconds
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Convert Unix timestamp to an ISO 8601 datetime string (YYYY-MM-DD HH:MM:SS)
///
/// Returns "1970-01-01 00:00:00" for invalid timestamps.
///
/// # Examples
/// ```
/// use droplog_reports::utils::time::timestamp_to_iso;
/// assert_eq!(timestamp_to_iso(0), "1970-01-01 00:00:00");
/// assert_eq!(timestamp_to_iso(1704067200), "2024-01-01 00:00:00");
/// ```
pub fn timestamp_to_iso(timestamp: i64) -> String {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "1970-01-01 00:00:00".to_string())
}
