//! `chrono::DateTime<Utc>` as RFC 3339 text.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::transcoding::TypedTranscoding;
use crate::value::Value;

/// Encodes with a `+00:00` offset and only as many fractional digits as the
/// value needs (none, 3, 6 or 9), so nanosecond values survive.
pub struct DatetimeAsIso;

impl TypedTranscoding for DatetimeAsIso {
    type Target = DateTime<Utc>;
    const NAME: &'static str = "datetime_iso";

    fn encode(&self, value: &DateTime<Utc>) -> Value {
        Value::Str(value.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }

    /// Any RFC 3339 offset is accepted and normalised to UTC; text without an
    /// offset is read as UTC.
    fn decode(&self, data: Value) -> Result<DateTime<Utc>, String> {
        let text = match data {
            Value::Str(text) => text,
            other => return Err(format!("expected ISO 8601 text, found {}", other.kind())),
        };
        match DateTime::parse_from_rfc3339(&text) {
            Ok(dt) => Ok(dt.with_timezone(&Utc)),
            Err(err) => text
                .parse::<NaiveDateTime>()
                .map(|naive| naive.and_utc())
                .map_err(|_| format!("invalid timestamp `{text}`: {err}")),
        }
    }
}
