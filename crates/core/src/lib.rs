//! Core types and shared functionality for hashstore.
//!
//! This crate provides:
//! - Multi-algorithm streaming digests and the retention policy
//! - Content store with SQLite backend, deduplicated by (SHA-256, SHA3-256)
//! - Identifier caching in file names and file metadata
//! - Rename and verify operations built on the cached identifier
//! - Unified error types and configuration

pub mod config;
pub mod digest;
pub mod error;
pub mod identity;
pub mod ingest;
pub mod rename;
pub mod store;
pub mod verify;

pub use config::AppConfig;
pub use digest::{DigestSet, FileHasher, RetentionPolicy};
pub use error::Error;
pub use identity::{IdentityCache, IdentityResolution, XattrMetadata};
pub use ingest::{Annotations, IngestOptions, IngestReport, MetadataOutcome, ingest_file};
pub use store::{ContentId, ContentRecord, HashDb};
pub use verify::{VerifyOutcome, VerifyReport, verify_file};
