//! Serde adapters shared by input types.

use serde::{Deserialize, Deserializer};

/// Distinguish an absent field from an explicit `null` in partial updates.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// absent → `None`, `null` → `Some(None)`, value → `Some(Some(v))`.
///
/// # Errors
///
/// Propagates the inner deserializer's error.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
