//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

const MIN_READ_BUFFER: usize = 4 * 1024;
const MAX_READ_BUFFER: usize = 16 * 1024 * 1024;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `read_buffer_bytes` is outside 4KiB..=16MiB
    /// - `xattr_name` is empty or has no namespace prefix
    /// - `db_path` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_buffer_bytes < MIN_READ_BUFFER {
            return Err(ConfigError::Invalid {
                field: "read_buffer_bytes".into(),
                reason: "must be at least 4KiB".into(),
            });
        }
        if self.read_buffer_bytes > MAX_READ_BUFFER {
            return Err(ConfigError::Invalid {
                field: "read_buffer_bytes".into(),
                reason: "must not exceed 16MiB".into(),
            });
        }

        if self.xattr_name.is_empty() {
            return Err(ConfigError::Invalid { field: "xattr_name".into(), reason: "must not be empty".into() });
        }
        match self.xattr_name.split_once('.') {
            Some((namespace, key)) if !namespace.is_empty() && !key.is_empty() => {}
            _ => {
                return Err(ConfigError::Invalid {
                    field: "xattr_name".into(),
                    reason: "must be namespaced, e.g. user.hashstore.id".into(),
                });
            }
        }

        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid { field: "db_path".into(), reason: "must not be empty".into() });
        }

        Ok(())
    }
}
