//! # focus-db
//!
//! libSQL task store for the Focus backend.
//!
//! Holds every task record in a single `tasks` table. Lifecycle operations
//! (create, update, complete, activate, soft-delete) and section listing with
//! weekly recurrence are implemented as methods on [`service::FocusService`].
//!
//! Uses the `libsql` crate, which speaks to a local `SQLite` file (or
//! `:memory:`) and to remote libSQL/Turso databases through the same API.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and a single connection shared by all requests.
/// `SQLite` serialises writers on that connection, so every single-statement
/// write is atomic with respect to other writers of the same row.
pub struct FocusDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl FocusDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let focus_db = Self { db, conn };
        focus_db.run_migrations().await?;
        tracing::debug!(path, "opened local task store");
        Ok(focus_db)
    }

    /// Open a remote libSQL database (e.g., Turso) over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be built or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;

        let focus_db = Self { db, conn };
        focus_db.run_migrations().await?;
        tracing::debug!(url, "opened remote task store");
        Ok(focus_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"tsk-a3f8b2c1d4e5f607"`.
    ///
    /// Uses `randomblob(8)` in SQL to produce 16-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(8)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focus_core::ids::{PREFIX_TASK, id_len};
    use std::collections::HashSet;

    /// Helper to create an in-memory database for testing.
    async fn test_db() -> FocusDb {
        FocusDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                ["tasks"],
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some(), "table 'tasks' should exist");
    }

    #[tokio::test]
    async fn open_local_on_disk_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");
        let path = path.to_str().unwrap();

        {
            let db = FocusDb::open_local(path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO tasks (id, title, why) VALUES ('tsk-t1', 'Persist', 'Check disk')",
                    (),
                )
                .await
                .unwrap();
        }

        let db = FocusDb::open_local(path).await.unwrap();
        let mut rows = db
            .conn()
            .query("SELECT title FROM tasks WHERE id = 'tsk-t1'", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "Persist");
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id(PREFIX_TASK).await.unwrap();
        assert!(id.starts_with("tsk-"), "ID should start with 'tsk-': {id}");
        assert_eq!(id.len(), id_len(PREFIX_TASK), "unexpected ID length: {id}");

        let hex_part = &id[4..];
        assert!(
            hex_part.chars().all(|c| c.is_ascii_hexdigit()),
            "Random part should be hex: {hex_part}"
        );
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..200 {
            let id = db.generate_id(PREFIX_TASK).await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        // Run migrations again — should not fail
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn schema_rejects_unknown_section() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO tasks (id, title, why, section) VALUES ('tsk-bad', 't', 'w', 'archived')",
                (),
            )
            .await;
        assert!(result.is_err(), "CHECK constraint should reject 'archived'");
    }
}
