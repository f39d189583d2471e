//! Cross-cutting error types for Focus.
//!
//! Storage-specific errors (`DatabaseError`) live in `focus-db` and wrap
//! `CoreError` so the HTTP layer can map both to status codes in one place.

use thiserror::Error;

/// Errors that can be raised by any Focus crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity_type} with ID {id} not found")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation. Carries the first violated rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A condition that a correct program never reaches.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a missing task.
    #[must_use]
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Task".to_string(),
            id: id.into(),
        }
    }
}
