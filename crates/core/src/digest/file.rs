//! Streaming a file through the digest engine.
//!
//! The retention threshold's worth of bytes is read first; that prefix is all
//! that has to be buffered unless the caller asks for the full content.

use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncReadExt;

use super::{DigestEngine, DigestSet, RetentionPolicy};
use crate::Error;

/// Digests of a file plus the bytes chosen for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedFile {
    pub digests: DigestSet,
    pub retained: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Copy)]
pub struct FileHasher {
    policy: RetentionPolicy,
    read_buffer_bytes: usize,
}

impl FileHasher {
    pub fn new(policy: RetentionPolicy, read_buffer_bytes: usize) -> Self {
        Self { policy, read_buffer_bytes: read_buffer_bytes.max(1) }
    }

    /// Digest a file and apply the retention policy.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be opened or read to the end;
    /// no partial digest is produced.
    pub async fn hash(&self, path: &Path, persist_full: bool) -> Result<HashedFile, Error> {
        let (digests, kept) = self.stream(path, persist_full).await?;
        let retained = self.policy.retains(digests.size, persist_full).then_some(kept);
        tracing::debug!(
            path = %path.display(),
            size = digests.size,
            retained = retained.is_some(),
            "Hashed file"
        );
        Ok(HashedFile { digests, retained })
    }

    /// Digest a file without keeping any content.
    pub async fn digest(&self, path: &Path) -> Result<DigestSet, Error> {
        let (digests, _) = self.stream(path, false).await?;
        Ok(digests)
    }

    async fn stream(&self, path: &Path, keep_all: bool) -> Result<(DigestSet, Vec<u8>), Error> {
        let mut file = File::open(path).await.map_err(|e| Error::io(path, e))?;
        let mut engine = DigestEngine::new();

        let mut kept = Vec::with_capacity(self.policy.threshold());
        (&mut file)
            .take(self.policy.threshold() as u64)
            .read_to_end(&mut kept)
            .await
            .map_err(|e| Error::io(path, e))?;
        engine.update(&kept);

        let mut buf = vec![0u8; self.read_buffer_bytes];
        loop {
            let n = file.read(&mut buf).await.map_err(|e| Error::io(path, e))?;
            if n == 0 {
                break;
            }
            engine.update(&buf[..n]);
            if keep_all {
                kept.extend_from_slice(&buf[..n]);
            }
        }

        Ok((engine.finalize(), kept))
    }
}
