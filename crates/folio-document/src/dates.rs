//! Date parsing for metadata values and file names.

use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde_yaml::Value;

/// Latest representable timestamp, `9999-12-31T23:59:59Z`.
///
/// Subtracting a document's timestamp from this yields an ordering key that
/// sorts newer documents first.
pub const MAX_EPOCH: i64 = 253_402_300_799;

/// Naive date-time layouts accepted in metadata, tried in order.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses a metadata value as a timestamp.
///
/// An explicit offset is kept, so calendar fields stay those the author
/// wrote; values without one are taken as UTC. Integers are Unix timestamps in seconds. Strings may be RFC 3339,
/// `YYYY-MM-DD`, or `YYYY-MM-DD HH:MM[:SS]`. A mapping with a `date` key is
/// read through that key.
pub fn parse_value(value: &Value) -> Option<DateTime<FixedOffset>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(from_timestamp),
        Value::String(s) => parse_str(s),
        Value::Mapping(m) => m.get("date").and_then(parse_value),
        _ => None,
    }
}

/// Parses a date string in one of the accepted layouts.
pub fn parse_str(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.and_utc().fixed_offset());
    }
    if let Ok(secs) = s.parse::<i64>() {
        return from_timestamp(secs);
    }
    parse_day(s)
}

/// Extracts a leading `YYYY-MM-DD-` date from a file name.
pub fn from_name_prefix(name: &str) -> Option<DateTime<FixedOffset>> {
    let prefix = name.get(..10)?;
    if !name[10..].starts_with('-') {
        return None;
    }
    parse_day(prefix)
}

/// Converts a filesystem time to a UTC timestamp.
pub fn from_system(time: SystemTime) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from(time).fixed_offset()
}

/// Formats a timestamp as `YYYY-MM-DD` in its own offset.
pub fn format_day(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Parses `YYYY-MM-DD` as midnight UTC.
fn parse_day(s: &str) -> Option<DateTime<FixedOffset>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().fixed_offset())
}

/// Converts Unix seconds to a UTC timestamp.
fn from_timestamp(secs: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.fixed_offset())
}
