//! Timestamp normalization.
//!
//! Entry documents carry dates in whatever shape their writer produced:
//! store timestamp wrappers, RFC 3339 strings, bare dates or epoch
//! milliseconds. This is the only place those shapes are interpreted.
//! Unusable input maps to `None`; nothing here returns an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A point in time as written to the store, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Store timestamp wrapper: seconds since the epoch plus nanoseconds.
    Store {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    /// Milliseconds since the epoch.
    Millis(i64),
    /// Milliseconds since the epoch, written as a float.
    FractionalMillis(f64),
    /// An already-typed instant.
    Native(DateTime<Utc>),
    /// Free-form text.
    Text(String),
}

impl From<DateTime<Utc>> for RawTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        RawTimestamp::Native(value)
    }
}

impl From<NaiveDate> for RawTimestamp {
    fn from(value: NaiveDate) -> Self {
        RawTimestamp::Text(value.format("%Y-%m-%d").to_string())
    }
}

/// Deserialize an optional timestamp field without ever failing.
///
/// Values of an unknown shape (booleans, arrays, objects without
/// `seconds`) are kept out of the document as None.
pub fn deserialize_lenient_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<RawTimestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|value| RawTimestamp::deserialize(value).ok()))
}

/// Converts a raw timestamp to a canonical UTC instant.
///
/// Returns `None` for absent input and for anything that cannot be read as
/// a valid instant.
pub fn normalize_timestamp(raw: Option<&RawTimestamp>) -> Option<DateTime<Utc>> {
    match raw? {
        RawTimestamp::Store {
            seconds,
            nanoseconds,
        } => DateTime::from_timestamp(*seconds, *nanoseconds),
        RawTimestamp::Millis(millis) => DateTime::from_timestamp_millis(*millis),
        RawTimestamp::FractionalMillis(millis) => from_fractional_millis(*millis),
        RawTimestamp::Native(instant) => Some(*instant),
        RawTimestamp::Text(text) => parse_text(text),
    }
}

fn from_fractional_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    let truncated = millis.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(truncated as i64)
}

/// Naive text without an offset is read as UTC.
fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}
