//! # focus-config
//!
//! Layered configuration loading for the Focus task backend using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FOCUS_*` prefix, `__` as separator)
//! 2. Project-level `.focus/config.toml`
//! 3. User-level `~/.config/focus/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FOCUS_SERVER__PORT` -> `server.port`, `FOCUS_DATABASE__PATH`
//! -> `database.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use focus_config::FocusConfig;
//!
//! let config = FocusConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_addr());
//! ```

mod database;
mod error;
mod log;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use log::LogConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FocusConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl FocusConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`FocusConfig::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`FocusConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".focus/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("FOCUS_").split("__"))
    }

    /// Reject combinations the server cannot start with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.host".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if !self.database.is_remote() && self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".to_string(),
                reason: "must be set when no remote database is configured".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("focus").join("config.toml"))
    }
}
