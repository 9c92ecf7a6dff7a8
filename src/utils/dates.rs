//! Date and time utilities

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Pattern of the human readable dates the upstream API sends (`01 Jan 2024, 12:00`)
pub const UPSTREAM_DATE_FORMAT: &str = "%d %b %Y, %H:%M";

/// Convert an upstream date to RFC-822; empty or missing means "now"
pub fn rfc822_date(value: Option<&str>) -> String {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return now_rfc822();
    }

    match NaiveDateTime::parse_from_str(value, UPSTREAM_DATE_FORMAT) {
        Ok(naive) => Utc.from_utc_datetime(&naive).to_rfc2822(),
        Err(e) => {
            tracing::warn!("unparseable upstream date {:?}: {}", value, e);
            now_rfc822()
        }
    }
}

/// Format a unix timestamp as RFC-822
pub fn timestamp_rfc822(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_else(Utc::now)
        .to_rfc2822()
}

/// Current UTC time as RFC-822
pub fn now_rfc822() -> String {
    Utc::now().to_rfc2822()
}
