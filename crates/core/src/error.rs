//! Unified error types for hashstore.
//!
//! Identity conflicts and verification mismatches are not errors; they are
//! reported through [`crate::identity::IdentityResolution`] and
//! [`crate::verify::VerifyOutcome`].

use std::path::PathBuf;

use tokio_rusqlite::rusqlite;

/// Unified error type for hashstore operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be opened or read to the end.
    #[error("IO_ERROR: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Invalid input (e.g., a path without a usable file name).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Reading or writing the identifier attribute failed.
    #[error("METADATA_ERROR: {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}
