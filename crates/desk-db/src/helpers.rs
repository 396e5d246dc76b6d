//! Row-to-record parsing helpers.
//!
//! The ticket table is written by other tools, so cells are read leniently:
//! identifier cells that are not text read as absent, and timestamps that do
//! not parse read as absent with a warning.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use libsql::Value;

use crate::error::DatabaseError;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a TEXT timestamp as `DateTime<Utc>`.
///
/// Accepts RFC 3339, `SQLite`'s `YYYY-MM-DD HH:MM:SS` (optionally with
/// fractional seconds or a `T` separator, read as UTC), and a bare date
/// (midnight UTC).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if no format matches.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DatabaseError::Query(format!("Failed to parse datetime '{s}'")))
}

/// Text of a cell: `Some` only for non-blank TEXT values.
#[must_use]
pub fn value_as_text(value: Value) -> Option<String> {
    match value {
        Value::Text(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

/// Read a cell as optional text.
///
/// # Errors
///
/// Returns `DatabaseError` if the column index is out of range.
pub fn get_text(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    Ok(value_as_text(row.get_value(idx)?))
}

/// Read a timestamp cell, coercing anything unparseable to `None`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column index is out of range.
pub fn get_timestamp(
    row: &libsql::Row,
    idx: i32,
    ticket_id: i64,
) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    let Some(raw) = get_text(row, idx)? else {
        return Ok(None);
    };
    match parse_datetime(&raw) {
        Ok(dt) => Ok(Some(dt)),
        Err(e) => {
            tracing::warn!(ticket_id, column = row.column_name(idx).unwrap_or("?"), %e, "coercing bad timestamp to empty");
            Ok(None)
        }
    }
}

/// Plain SQL identifier: ASCII letter or `_`, then letters, digits, or `_`.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name.len() <= 64
}
