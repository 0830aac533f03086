//! Date rendering for table cells and date inputs.

use crate::constants::{DEFAULT_DATE_FORMAT, INVALID_DATE, NOT_AVAILABLE};
use crate::{DeskError, DeskResult};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::Write;

/// A chrono `strftime` pattern checked to be renderable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateFormat(String);

impl DateFormat {
    /// Validate and wrap a pattern.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::InvalidDateFormat` if the pattern is empty, contains a
    /// specifier chrono does not understand, or asks for a time or offset a bare date
    /// cannot supply (`%H`, `%z`, ...).
    pub fn new(pattern: impl Into<String>) -> DeskResult<Self> {
        let pattern = pattern.into();
        if pattern.trim().is_empty()
            || StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error))
            || render(NaiveDate::default(), &pattern).is_none()
        {
            return Err(DeskError::InvalidDateFormat(pattern));
        }
        Ok(Self(pattern))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self(DEFAULT_DATE_FORMAT.to_string())
    }
}

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Extract the calendar date written in an ISO-8601 value.
///
/// The date is taken as written: an offset in the value does not shift it into another zone.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    for fmt in NAIVE_DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Render `date` with `pattern`, or `None` if the pattern needs more than a date.
fn render(date: NaiveDate, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    Some(out)
}

/// Render a visit date for display.
///
/// Absent or empty values become `"N/A"`, unparseable ones `"Invalid Date"`.
pub fn format_date(value: Option<&str>, format: &DateFormat) -> String {
    let Some(raw) = value.filter(|v| !v.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    parse_calendar_date(raw)
        .and_then(|date| render(date, format.as_str()))
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Date-only portion of a value, suitable for a date input field.
pub fn date_input_value(value: Option<&str>) -> String {
    value
        .map(|v| v.split_once('T').map_or(v, |(date, _)| date).to_string())
        .unwrap_or_default()
}
