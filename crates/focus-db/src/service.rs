//! Service layer over the task store.
//!
//! `FocusService` wraps `FocusDb` (raw database access). All repo methods are
//! implemented as `impl FocusService` blocks under `repos/`. The HTTP layer
//! holds one service behind an `Arc` and passes it to every handler.

use focus_config::DatabaseConfig;

use crate::FocusDb;
use crate::error::DatabaseError;

/// Handle for every task operation.
pub struct FocusService {
    db: FocusDb,
}

impl FocusService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` — Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = FocusDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create a service backed by a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the remote database cannot be reached.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = FocusDb::open_remote(url, auth_token).await?;
        Ok(Self { db })
    }

    /// Open whichever store the configuration describes.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            Self::new_remote(&config.url, &config.auth_token).await
        } else {
            Self::new_local(&config.path).await
        }
    }

    /// Create from an existing `FocusDb` (for testing).
    #[must_use]
    pub const fn from_db(db: FocusDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &FocusDb {
        &self.db
    }
}
