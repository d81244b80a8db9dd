//! Date coercion at the storage boundary
//!
//! Stored records carry their date in whatever shape the backend produced:
//! - ISO 8601 / RFC 3339 strings (what this crate writes)
//! - bare `YYYY-MM-DD` strings from hand-edited imports
//! - epoch milliseconds
//! - the store's native `{seconds, nanoseconds}` timestamp object
//!
//! Everything past this module sees a single `DateTime<Utc>`. Input that
//! cannot be understood degrades to the current time with a warning instead of
//! failing the whole roster load.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// Raw date value as found in a stored document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// Date string, normally RFC 3339
    Text(String),
    /// Milliseconds since the Unix epoch
    Millis(i64),
    /// Store timestamp object
    StoreTimestamp {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(alias = "_nanoseconds", default)]
        nanoseconds: u32,
    },
    /// Anything else (null, arrays, unknown objects)
    Unrecognized(IgnoredAny),
}

/// Convert a raw stored date into the canonical timestamp.
///
/// Falls back to `now` for anything unparseable.
pub fn coerce_date(raw: &RawDate, now: DateTime<Utc>) -> DateTime<Utc> {
    let parsed = match raw {
        RawDate::Text(text) => parse_date_text(text),
        RawDate::Millis(ms) => DateTime::from_timestamp_millis(*ms),
        RawDate::StoreTimestamp { seconds, nanoseconds } => {
            DateTime::from_timestamp(*seconds, *nanoseconds)
        }
        RawDate::Unrecognized(_) => None,
    };

    parsed.unwrap_or_else(|| {
        warn!(?raw, fallback = %now, "Could not parse stored date, using current time instead");
        now
    })
}

/// Parse a date string in any of the accepted text forms.
pub fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }

    // Offset-less timestamps are taken as UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `deserialize_with` adapter for record dates.
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawDate::deserialize(deserializer)?;
    Ok(coerce_date(&raw, Utc::now()))
}

/// Default for records stored without any date.
pub fn missing_date() -> DateTime<Utc> {
    let now = Utc::now();
    warn!(fallback = %now, "Stored record has no date, using current time instead");
    now
}
