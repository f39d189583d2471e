//! ID prefix constants.
//!
//! IDs are generated by the store as `{prefix}-{16 hex chars}`.

/// Prefix for task IDs, e.g. `tsk-9f1c0a2b7d3e4f50`.
pub const PREFIX_TASK: &str = "tsk";

/// Number of random bytes behind every generated ID.
pub const ID_RANDOM_BYTES: usize = 8;

/// Expected total ID length for a given prefix.
#[must_use]
pub const fn id_len(prefix: &str) -> usize {
    prefix.len() + 1 + ID_RANDOM_BYTES * 2
}
