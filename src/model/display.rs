//! Read-side formatting of stored date and time values.
//!
//! Stored values stay in their normalized form (`DATE`, UTC `TIMESTAMPTZ`); these functions
//! only decide how callers see them. Null in, null out.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serializer;
use serde_json::Value;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DD HH:mm:ss` in the display offset
    DateTime,
}

pub fn format_date(value: Option<NaiveDate>) -> Option<String> {
    value.map(|d| d.format(DATE_FORMAT).to_string())
}

pub fn format_datetime(value: Option<DateTime<Utc>>, offset: FixedOffset) -> Option<String> {
    value.map(|ts| ts.with_timezone(&offset).format(DATETIME_FORMAT).to_string())
}

impl Display {
    /// Reformats a JSON-encoded stored value (as produced by `row_to_json`).
    /// Values that do not parse are passed through untouched.
    pub fn render(&self, value: &Value, offset: FixedOffset) -> Value {
        let Some(raw) = value.as_str() else {
            return value.clone();
        };

        let formatted = match self {
            Display::Date => parse_date(raw).map(|d| d.format(DATE_FORMAT).to_string()),
            Display::DateTime => parse_timestamp(raw)
                .and_then(|ts| format_datetime(Some(ts), offset)),
        };

        formatted.map(Value::String).unwrap_or_else(|| value.clone())
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| parse_timestamp(raw).map(|ts| ts.date_naive()))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

fn display_offset() -> FixedOffset {
    crate::config::config().display.offset()
}

// serde `serialize_with` adapters used by typed rows

pub fn serialize_date<S: Serializer>(value: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    serialize_opt_date(&Some(*value), s)
}

pub fn serialize_opt_date<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
    match format_date(*value) {
        Some(text) => s.serialize_str(&text),
        None => s.serialize_none(),
    }
}

pub fn serialize_datetime<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    serialize_opt_datetime(&Some(*value), s)
}

pub fn serialize_opt_datetime<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match format_datetime(*value, display_offset()) {
        Some(text) => s.serialize_str(&text),
        None => s.serialize_none(),
    }
}
