//! Canonical file names that embed a content identifier.

use std::path::{Path, PathBuf};

use crate::Error;
use crate::identity::pattern::{has_embedded_id, split_extension};
use crate::store::ContentId;

/// Name of the form `<stem>_[#<id>]<ext>`.
///
/// A name that already carries an identifier is returned unchanged, so
/// repeated runs never stack tags.
pub fn canonical_name(file_name: &str, id: ContentId) -> String {
    if has_embedded_id(file_name) {
        return file_name.to_string();
    }
    let (stem, ext) = split_extension(file_name);
    format!("{stem}_[#{id}]{ext}")
}

/// Rename `path` to its canonical name in the same directory.
///
/// Returns the new path, or `None` when the name is already canonical.
/// An existing file at the target is never overwritten.
pub async fn rename_with_id(path: &Path, id: ContentId) -> Result<Option<PathBuf>, Error> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidInput(format!("cannot rename {}: no UTF-8 file name", path.display())))?;

    let new_name = canonical_name(file_name, id);
    if new_name == file_name {
        tracing::debug!(path = %path.display(), "Name already carries an identifier");
        return Ok(None);
    }

    let target = path.with_file_name(&new_name);
    if tokio::fs::try_exists(&target).await.map_err(|e| Error::io(&target, e))? {
        return Err(Error::InvalidInput(format!("rename target already exists: {}", target.display())));
    }

    tokio::fs::rename(path, &target).await.map_err(|e| Error::io(path, e))?;
    tracing::info!(from = %path.display(), to = %target.display(), "Renamed file");
    Ok(Some(target))
}
