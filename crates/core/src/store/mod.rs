//! SQLite-backed content store.
//!
//! Records are keyed by the (SHA-256, SHA3-256) pair of their content and are
//! never modified once written. Access is async via tokio-rusqlite, which runs
//! every statement on the connection's own thread.
//!
//! - Insert-if-absent dedup enforced by a `UNIQUE` constraint
//! - Automatic schema migrations
//! - Append-only annotation, property, tag and content side tables

pub mod connection;
pub mod migrations;
pub mod records;
pub mod side_tables;

pub use crate::Error;

pub use connection::HashDb;
pub use records::{ContentId, ContentRecord, Resolved};
