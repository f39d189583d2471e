//! Repository modules implementing task operations.
//!
//! Each module adds methods to `FocusService` via `impl FocusService` blocks.

pub mod recurrence;
pub mod task;
