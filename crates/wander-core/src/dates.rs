//! Calendar-day handling for trip dates.
//!
//! Stored trips carry their dates as ISO-8601 strings, sometimes plain
//! dates (`2024-06-05`) and sometimes full timestamps
//! (`2024-06-05T00:00:00.000Z`). Everything here reduces them to a
//! [`NaiveDate`]; time of day never matters for trip ranges.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Parse a date or date-time string into its calendar day.
///
/// Timestamps with an offset keep the calendar day of that offset, so
/// `2024-06-05T23:30:00-02:00` is June 5th.
pub fn parse_day(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(day);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }
    None
}

/// Read a calendar day out of a JSON value: an ISO string or epoch
/// milliseconds (UTC).
pub fn day_from_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_day(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|ts| ts.date_naive()),
        _ => None,
    }
}

/// Format a day the way it is persisted.
pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Length of an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripLength {
    /// Calendar days, counting both ends.
    pub days: i64,
    /// Nights away: `end - start`.
    pub nights: i64,
}

impl TripLength {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        let nights = (end - start).num_days();
        Self {
            days: nights + 1,
            nights,
        }
    }
}

/// Human-readable range, e.g. `Jun 5 - Jun 15, 2024 • 10 nights`.
pub fn describe_range(start: NaiveDate, end: NaiveDate) -> String {
    let nights = TripLength::between(start, end).nights;
    let unit = if nights == 1 { "night" } else { "nights" };
    format!(
        "{} - {} • {nights} {unit}",
        start.format("%b %-d"),
        end.format("%b %-d, %Y")
    )
}

/// Serde adapter for optional trip dates.
///
/// Deserializes anything [`day_from_value`] understands and maps
/// unreadable values to `None` instead of failing the whole record.
/// Serializes as `YYYY-MM-DD`.
pub mod serde_day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(day: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match day {
            Some(d) => serializer.serialize_str(&super::format_day(*d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(super::day_from_value))
    }
}
