//! Row-to-entity parsing helpers.
//!
//! Converts `libsql::Row` (column-indexed) values into typed fields and back.
//! Handles the dual datetime format issue (`SQLite`'s `datetime('now')` vs
//! Rust's `to_rfc3339()`) and the JSON encoding of the regularity set.

use chrono::{DateTime, Utc};
use focus_core::enums::Weekday;
use focus_core::validation::normalize_regularity;

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Decode the regularity column (JSON array of weekday tags).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not a valid tag array.
pub fn parse_regularity(s: Option<&str>) -> Result<Option<Vec<Weekday>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let days: Vec<Weekday> = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid regularity '{s}': {e}")))?;
            Ok(normalize_regularity(Some(days)))
        }
        _ => Ok(None),
    }
}

/// Encode a regularity set for storage. `None` and empty sets map to SQL NULL.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn encode_regularity(days: Option<&[Weekday]>) -> Result<Option<String>, DatabaseError> {
    match days {
        Some(days) if !days.is_empty() => serde_json::to_string(days)
            .map(Some)
            .map_err(|e| DatabaseError::Other(e.into())),
        _ => Ok(None),
    }
}

/// Encode an optional timestamp for storage.
#[must_use]
pub fn encode_optional_datetime(dt: Option<&DateTime<Utc>>) -> Option<String> {
    dt.map(DateTime::to_rfc3339)
}
