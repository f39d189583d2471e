//! Input types for task mutations.
//!
//! `NewTask` is the create payload. `TaskUpdate` has `Option` fields; only
//! `Some` fields generate SET clauses in the dynamic UPDATE SQL. Both run
//! their validation rules before any SQL is issued.

pub mod task;
