//! Pure validation rules applied at the create/update boundary.
//!
//! Each rule returns the first violation as `CoreError::Validation`.

use crate::enums::Weekday;
use crate::errors::CoreError;

/// Reject a missing or whitespace-only text field.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming the field.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("'{field}' must not be empty")));
    }
    Ok(())
}

/// Canonical form of a regularity set: ISO order, no duplicates, and
/// `None` for an empty set.
#[must_use]
pub fn normalize_regularity(days: Option<Vec<Weekday>>) -> Option<Vec<Weekday>> {
    let mut days = days?;
    days.sort_unstable();
    days.dedup();
    if days.is_empty() { None } else { Some(days) }
}
