//! Multi-algorithm streaming digests.
//!
//! A [`DigestEngine`] feeds every chunk, in order, to each algorithm's own
//! incremental state, so a file is read exactly once no matter how many
//! digests are stored for it. Checksums are rendered as 8 hex digits of the
//! big-endian `u32`; cryptographic digests as lowercase hex.

pub mod file;
pub mod retention;

use md5::Md5;
use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use sha3::Sha3_256;

pub use file::{FileHasher, HashedFile};
pub use retention::{RETAIN_THRESHOLD, RetentionPolicy};

/// Format version stored with every digest set.
pub const DIGEST_VERSION: i64 = 1;

/// Digests of one byte stream, one field per algorithm.
///
/// Field order is the column order of the `hashes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestSet {
    pub adler32: String,
    pub crc32: String,
    pub md5: String,
    pub ripemd160: String,
    pub sha1: String,
    pub sha2_256: String,
    pub sha2_512: String,
    pub sha3_256: String,
    /// Similarity digest supplied by an external tool, if any.
    pub fuzzy_digest: Option<String>,
    pub size: u64,
    pub version: i64,
}

impl DigestSet {
    /// Digest a complete in-memory buffer.
    pub fn of(bytes: &[u8]) -> Self {
        let mut engine = DigestEngine::new();
        engine.update(bytes);
        engine.finalize()
    }

    /// Attach a similarity digest computed elsewhere.
    pub fn with_fuzzy_digest(mut self, digest: impl Into<String>) -> Self {
        self.fuzzy_digest = Some(digest.into());
        self
    }
}

/// Incremental state for every supported algorithm.
#[derive(Clone)]
pub struct DigestEngine {
    adler32: adler2::Adler32,
    crc32: crc32fast::Hasher,
    md5: Md5,
    ripemd160: Ripemd160,
    sha1: Sha1,
    sha2_256: Sha256,
    sha2_512: Sha512,
    sha3_256: Sha3_256,
    size: u64,
}

impl Default for DigestEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestEngine {
    pub fn new() -> Self {
        Self {
            adler32: adler2::Adler32::new(),
            crc32: crc32fast::Hasher::new(),
            md5: Md5::new(),
            ripemd160: Ripemd160::new(),
            sha1: Sha1::new(),
            sha2_256: Sha256::new(),
            sha2_512: Sha512::new(),
            sha3_256: Sha3_256::new(),
            size: 0,
        }
    }

    /// Feed the next chunk of the stream to every algorithm.
    pub fn update(&mut self, chunk: &[u8]) {
        self.adler32.write_slice(chunk);
        self.crc32.update(chunk);
        Digest::update(&mut self.md5, chunk);
        Digest::update(&mut self.ripemd160, chunk);
        Digest::update(&mut self.sha1, chunk);
        Digest::update(&mut self.sha2_256, chunk);
        Digest::update(&mut self.sha2_512, chunk);
        Digest::update(&mut self.sha3_256, chunk);
        self.size += chunk.len() as u64;
    }

    pub fn finalize(self) -> DigestSet {
        DigestSet {
            adler32: format!("{:08x}", self.adler32.checksum()),
            crc32: format!("{:08x}", self.crc32.finalize()),
            md5: hex::encode(self.md5.finalize()),
            ripemd160: hex::encode(self.ripemd160.finalize()),
            sha1: hex::encode(self.sha1.finalize()),
            sha2_256: hex::encode(self.sha2_256.finalize()),
            sha2_512: hex::encode(self.sha2_512.finalize()),
            sha3_256: hex::encode(self.sha3_256.finalize()),
            fuzzy_digest: None,
            size: self.size,
            version: DIGEST_VERSION,
        }
    }
}
