use chrono::{DateTime, NaiveDate, Utc};

/// Current time, pinned by `DW_FIXED_TIME` (RFC 3339) for reproducible runs.
pub fn now_utc() -> DateTime<Utc> {
    if let Ok(value) = std::env::var("DW_FIXED_TIME") {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
            return dt.with_timezone(&Utc);
        }
    }
    Utc::now()
}

/// Parses a feed timestamp. Full RFC 3339 first, then a bare `YYYY-MM-DD` at midnight UTC.
pub fn parse_event_time(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn display_time(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
