//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (HASHSTORE_*)
//! 2. TOML config file (if HASHSTORE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (HASHSTORE_*)
/// 2. TOML config file (if HASHSTORE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite content store.
    ///
    /// Set via HASHSTORE_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Extended attribute holding the cached identifier.
    ///
    /// Set via HASHSTORE_XATTR_NAME environment variable.
    #[serde(default = "default_xattr_name")]
    pub xattr_name: String,

    /// Chunk size used when streaming files through the digest engine.
    ///
    /// Set via HASHSTORE_READ_BUFFER_BYTES environment variable.
    #[serde(default = "default_read_buffer_bytes")]
    pub read_buffer_bytes: usize,

    /// Continue with the next file after a per-file failure.
    ///
    /// Set via HASHSTORE_KEEP_GOING environment variable.
    #[serde(default)]
    pub keep_going: bool,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./hashstore.sqlite")
}

fn default_xattr_name() -> String {
    "user.hashstore.id".into()
}

fn default_read_buffer_bytes() -> usize {
    64 * 1024
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            xattr_name: default_xattr_name(),
            read_buffer_bytes: default_read_buffer_bytes(),
            keep_going: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("HASHSTORE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("HASHSTORE_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }
}
