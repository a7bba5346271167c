//! Check a file's current content against the record its cached identifier
//! points to.

use std::fmt;
use std::path::Path;

use crate::Error;
use crate::digest::FileHasher;
use crate::identity::{IdentityCache, IdentityResolution};
use crate::store::{ContentId, HashDb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Stored SHA-256 matches the file.
    Ok,
    /// Stored SHA-256 differs, or the identifier has no record.
    Error,
    /// No identifier could be resolved for the file.
    Unknown,
}

impl fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerifyOutcome::Ok => "OK",
            VerifyOutcome::Error => "ERROR",
            VerifyOutcome::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub outcome: VerifyOutcome,
    pub resolution: IdentityResolution,
}

/// Compare a freshly computed SHA-256 with the stored one.
pub fn classify(stored_sha256: Option<&str>, actual_sha256: &str) -> VerifyOutcome {
    match stored_sha256 {
        Some(stored) if stored == actual_sha256 => VerifyOutcome::Ok,
        _ => VerifyOutcome::Error,
    }
}

/// Verify one file.
///
/// The file is only read when an identifier resolves; conflicting or missing
/// caches yield `Unknown` without touching the content.
pub async fn verify_file(
    db: &HashDb, identity: &IdentityCache, hasher: &FileHasher, path: &Path,
) -> Result<VerifyReport, Error> {
    tokio::fs::metadata(path).await.map_err(|e| Error::io(path, e))?;
    let resolution = identity.resolve(path)?;
    let Some(id) = resolution.id() else {
        return Ok(VerifyReport { outcome: VerifyOutcome::Unknown, resolution });
    };

    let outcome = verify_against(db, hasher, path, id).await?;
    Ok(VerifyReport { outcome, resolution })
}

async fn verify_against(db: &HashDb, hasher: &FileHasher, path: &Path, id: ContentId) -> Result<VerifyOutcome, Error> {
    let actual = hasher.digest(path).await?;
    let stored = db.lookup_digest(id).await?;
    if stored.is_none() {
        tracing::warn!(path = %path.display(), %id, "Cached identifier has no record");
    }

    let outcome = classify(stored.as_deref(), &actual.sha2_256);
    tracing::debug!(path = %path.display(), %id, %outcome, "Verified file");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{DigestSet, RetentionPolicy};
    use crate::identity::metadata::testing::MemoryMetadata;

    fn hasher() -> FileHasher {
        FileHasher::new(RetentionPolicy::default(), 4096)
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(Some("aa"), "aa"), VerifyOutcome::Ok);
        assert_eq!(classify(Some("aa"), "bb"), VerifyOutcome::Error);
        assert_eq!(classify(None, "aa"), VerifyOutcome::Error);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(VerifyOutcome::Ok.to_string(), "OK");
        assert_eq!(VerifyOutcome::Error.to_string(), "ERROR");
        assert_eq!(VerifyOutcome::Unknown.to_string(), "UNKNOWN");
    }

    #[tokio::test]
    async fn test_verify_ok_then_error_after_change() {
        let dir = tempfile::tempdir().unwrap();
        let db = HashDb::open_in_memory().await.unwrap();
        let id = db.resolve_or_insert(&DigestSet::of(b"abc"), None).await.unwrap().id;

        let path = dir.path().join(format!("abc_[#{id}].txt"));
        tokio::fs::write(&path, b"abc").await.unwrap();
        let identity = IdentityCache::new(MemoryMetadata::default());

        let report = verify_file(&db, &identity, &hasher(), &path).await.unwrap();
        assert_eq!(report.outcome, VerifyOutcome::Ok);
        assert_eq!(report.resolution, IdentityResolution::Resolved(id));

        tokio::fs::write(&path, b"abd").await.unwrap();
        let report = verify_file(&db, &identity, &hasher(), &path).await.unwrap();
        assert_eq!(report.outcome, VerifyOutcome::Error);
    }

    #[tokio::test]
    async fn test_verify_via_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let db = HashDb::open_in_memory().await.unwrap();
        let id = db.resolve_or_insert(&DigestSet::of(b"abc"), None).await.unwrap().id;

        let path = dir.path().join("abc.txt");
        tokio::fs::write(&path, b"abc").await.unwrap();
        let identity = IdentityCache::new(MemoryMetadata::with(&path, &id.to_string()));

        let report = verify_file(&db, &identity, &hasher(), &path).await.unwrap();
        assert_eq!(report.outcome, VerifyOutcome::Ok);
    }

    #[tokio::test]
    async fn test_verify_dangling_id() {
        let dir = tempfile::tempdir().unwrap();
        let db = HashDb::open_in_memory().await.unwrap();
        let path = dir.path().join("abc_[#77].txt");
        tokio::fs::write(&path, b"abc").await.unwrap();
        let identity = IdentityCache::new(MemoryMetadata::default());

        let report = verify_file(&db, &identity, &hasher(), &path).await.unwrap();
        assert_eq!(report.outcome, VerifyOutcome::Error);
    }

    #[tokio::test]
    async fn test_verify_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let db = HashDb::open_in_memory().await.unwrap();
        let identity = IdentityCache::new(MemoryMetadata::default());

        let untagged = dir.path().join("abc.txt");
        tokio::fs::write(&untagged, b"abc").await.unwrap();
        let report = verify_file(&db, &identity, &hasher(), &untagged).await.unwrap();
        assert_eq!(report.outcome, VerifyOutcome::Unknown);
        assert_eq!(report.resolution, IdentityResolution::Missing);

        let conflicting = dir.path().join("abc_[#1].txt");
        tokio::fs::write(&conflicting, b"abc").await.unwrap();
        let identity = IdentityCache::new(MemoryMetadata::with(&conflicting, "2"));
        let report = verify_file(&db, &identity, &hasher(), &conflicting).await.unwrap();
        assert_eq!(report.outcome, VerifyOutcome::Unknown);
    }

    #[tokio::test]
    async fn test_verify_missing_file_is_io_error() {
        let db = HashDb::open_in_memory().await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone_[#1].txt");
        let identity = IdentityCache::new(MemoryMetadata::default());

        let result = verify_file(&db, &identity, &hasher(), &path).await;
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
