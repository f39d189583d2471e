//! Task store location.
//!
//! A local file (or `:memory:`) by default. Setting both `url` and
//! `auth_token` switches to a remote libSQL database instead.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "./tasks.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote database URL (e.g., `libsql://tasks-myorg.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the remote database fields are both set.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }
}
