//! Cached content identifiers attached to files.
//!
//! A file can carry its record identifier in two places: embedded in its
//! name and stored in file metadata. Both are caches; the content digest is
//! the only authority. When the two disagree the identity is unknown and is
//! never resolved to either value.

pub mod metadata;
pub mod pattern;

use std::path::Path;

use crate::Error;
use crate::store::ContentId;

pub use metadata::{MetadataRead, MetadataStore, MetadataWrite, XattrMetadata};
pub use pattern::{has_embedded_id, id_from_file_name};

/// Result of reconciling the filename and metadata caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityResolution {
    Resolved(ContentId),
    /// Both caches hold a value and they differ.
    Conflict { from_name: ContentId, from_metadata: ContentId },
    /// Neither cache holds a value.
    Missing,
}

impl IdentityResolution {
    /// The resolved identifier; `None` for both conflict and missing.
    pub fn id(&self) -> Option<ContentId> {
        match self {
            IdentityResolution::Resolved(id) => Some(*id),
            _ => None,
        }
    }
}

/// Combine the two cached values into one identity.
pub fn reconcile(from_name: Option<ContentId>, from_metadata: Option<ContentId>) -> IdentityResolution {
    match (from_name, from_metadata) {
        (Some(n), Some(m)) if n == m => IdentityResolution::Resolved(n),
        (Some(n), Some(m)) => IdentityResolution::Conflict { from_name: n, from_metadata: m },
        (Some(id), None) | (None, Some(id)) => IdentityResolution::Resolved(id),
        (None, None) => IdentityResolution::Missing,
    }
}

/// Reads and writes cached identifiers for files.
pub struct IdentityCache {
    metadata: Box<dyn MetadataStore>,
}

impl IdentityCache {
    pub fn new(metadata: impl MetadataStore + 'static) -> Self {
        Self { metadata: Box::new(metadata) }
    }

    /// Identifier embedded in the file's name.
    pub fn read_name(&self, path: &Path) -> Option<ContentId> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(id_from_file_name)
    }

    /// Identifier stored in the file's metadata.
    ///
    /// Unsupported metadata and unparsable values count as no value.
    pub fn read_metadata(&self, path: &Path) -> Result<Option<ContentId>, Error> {
        match self.metadata.read(path)? {
            MetadataRead::Value(raw) => match raw.parse() {
                Ok(id) => Ok(Some(id)),
                Err(_) => {
                    tracing::warn!(path = %path.display(), value = %raw, "Ignoring non-numeric identifier in file metadata");
                    Ok(None)
                }
            },
            MetadataRead::Absent => Ok(None),
            MetadataRead::Unsupported => {
                tracing::debug!(path = %path.display(), "File metadata not supported");
                Ok(None)
            }
        }
    }

    /// Resolve the file's cached identity from both sources.
    pub fn resolve(&self, path: &Path) -> Result<IdentityResolution, Error> {
        let resolution = reconcile(self.read_name(path), self.read_metadata(path)?);
        if let IdentityResolution::Conflict { from_name, from_metadata } = resolution {
            tracing::warn!(
                path = %path.display(),
                %from_name,
                %from_metadata,
                "Filename and metadata identifiers disagree"
            );
        }
        Ok(resolution)
    }

    /// Store `id` in the file's metadata.
    pub fn write_metadata(&self, path: &Path, id: ContentId) -> Result<MetadataWrite, Error> {
        let outcome = self.metadata.write(path, &id.to_string())?;
        match outcome {
            MetadataWrite::Written => tracing::debug!(path = %path.display(), %id, "Wrote identifier to file metadata"),
            MetadataWrite::Unsupported => {
                tracing::warn!(path = %path.display(), "File metadata not supported; identifier not cached")
            }
        }
        Ok(outcome)
    }
}
