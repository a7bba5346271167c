//! Hash a file, record it in the store, and cache its identifier.
//!
//! Steps per file, in order: digest and retention, insert-or-resolve,
//! side-table rows, metadata cache, rename. Metadata caching is best effort:
//! a failure is logged and reported without undoing the resolved identity.

use std::path::{Path, PathBuf};

use crate::Error;
use crate::digest::FileHasher;
use crate::identity::{IdentityCache, MetadataWrite};
use crate::rename::rename_with_id;
use crate::store::{ContentId, HashDb};

/// Free-text side records to attach to each ingested file.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    /// Stored filename; takes precedence over `auto_name`.
    pub name: Option<String>,
    /// Store each file's own name when `name` is unset.
    pub auto_name: bool,
    pub comment: Option<String>,
    pub url: Option<String>,
    pub rating: Option<String>,
    pub external_id: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Retain the full content regardless of size.
    pub persist_full: bool,
    /// Write the identifier into file metadata.
    pub write_metadata: bool,
    /// Rename the file to embed the identifier.
    pub rename: bool,
    pub annotations: Annotations,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataOutcome {
    Skipped,
    Written,
    Unsupported,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub id: ContentId,
    /// True when this run created the record.
    pub created: bool,
    pub path: PathBuf,
    /// New location when the file was renamed.
    pub renamed_to: Option<PathBuf>,
    pub metadata: MetadataOutcome,
    /// Identifier already in the file name that belongs to other content.
    /// Renaming keeps that tag, so the file will not verify until it is
    /// renamed by hand.
    pub stale_name_id: Option<ContentId>,
}

impl IngestReport {
    /// Where the file lives after ingestion.
    pub fn final_path(&self) -> &Path {
        self.renamed_to.as_deref().unwrap_or(&self.path)
    }
}

/// Ingest one file.
///
/// # Errors
///
/// I/O and store failures abort the file. Metadata write failures do not.
pub async fn ingest_file(
    db: &HashDb, identity: &IdentityCache, hasher: &FileHasher, path: &Path, options: &IngestOptions,
) -> Result<IngestReport, Error> {
    let hashed = hasher.hash(path, options.persist_full).await?;
    let resolved = db.resolve_or_insert(&hashed.digests, hashed.retained.as_deref()).await?;
    let id = resolved.id;

    if options.persist_full && !resolved.created {
        archive_full_content(db, id, hashed.retained).await?;
    }

    annotate(db, id, path, &options.annotations).await?;

    let stale_name_id = identity.read_name(path).filter(|tagged| *tagged != id);
    if let Some(tagged) = stale_name_id {
        tracing::warn!(path = %path.display(), %tagged, %id, "File name carries another content's identifier");
    }

    let metadata = if options.write_metadata {
        match identity.write_metadata(path, id) {
            Ok(MetadataWrite::Written) => MetadataOutcome::Written,
            Ok(MetadataWrite::Unsupported) => MetadataOutcome::Unsupported,
            Err(e) => {
                tracing::warn!(path = %path.display(), %id, error = %e, "Failed to cache identifier in file metadata");
                MetadataOutcome::Failed(e.to_string())
            }
        }
    } else {
        MetadataOutcome::Skipped
    };

    let renamed_to = if options.rename { rename_with_id(path, id).await? } else { None };

    Ok(IngestReport { id, created: resolved.created, path: path.to_path_buf(), renamed_to, metadata, stale_name_id })
}

/// Existing records are immutable, so full content requested after the fact
/// goes to the `contents` table, once, and only if the record has none inline.
async fn archive_full_content(db: &HashDb, id: ContentId, bytes: Option<Vec<u8>>) -> Result<(), Error> {
    let Some(bytes) = bytes else {
        return Ok(());
    };
    let Some(record) = db.get_record(id).await? else {
        return Ok(());
    };
    if record.bytes.is_some() || db.has_content(id).await? {
        return Ok(());
    }
    if db.add_content(id, bytes).await? {
        tracing::info!(%id, "Archived full content for existing record");
    }
    Ok(())
}

async fn annotate(db: &HashDb, id: ContentId, path: &Path, annotations: &Annotations) -> Result<(), Error> {
    let own_name = path.file_name().map(|name| name.to_string_lossy().into_owned());
    let stored_name = match (&annotations.name, annotations.auto_name) {
        (Some(name), _) => Some(name.clone()),
        (None, true) => own_name,
        (None, false) => None,
    };

    if let Some(name) = stored_name {
        db.add_property(id, "filename", &name).await?;
    }
    if let Some(comment) = &annotations.comment {
        db.add_annotation(id, "comment", comment).await?;
    }
    for (kind, value) in [
        ("url", &annotations.url),
        ("rating", &annotations.rating),
        ("external_id", &annotations.external_id),
    ] {
        if let Some(value) = value {
            db.add_property(id, kind, value).await?;
        }
    }
    for tag in &annotations.tags {
        db.add_tag(id, tag).await?;
    }
    Ok(())
}
