//! # focus-core
//!
//! Core types, ID prefixes, and error types for the Focus task backend.
//!
//! This crate provides the foundational types shared across all Focus crates:
//! - The `Task` entity struct
//! - Field enums (`Urgency`, `Section`, `Weekday`) with their storage strings
//! - ISO weekday mapping used by recurrence selection
//! - Pure validation rules run at the create/update boundary
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod serde_helpers;
pub mod validation;
