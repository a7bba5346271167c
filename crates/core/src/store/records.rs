//! Content record operations.
//!
//! A record is created the first time its (SHA-256, SHA3-256) pair is seen
//! and is read-only afterwards.

use std::fmt;
use std::str::FromStr;

use super::connection::HashDb;
use crate::Error;
use crate::digest::DigestSet;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// Store-assigned identifier of a content record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(pub i64);

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentId {
    type Err = std::num::ParseIntError;

    /// Parses the decimal form written into filenames and file metadata.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ContentId)
    }
}

/// A persisted row of the `hashes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    pub id: ContentId,
    pub digests: DigestSet,
    pub bytes: Option<Vec<u8>>,
}

/// Outcome of [`HashDb::resolve_or_insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub id: ContentId,
    /// True when this call created the record.
    pub created: bool,
}

impl HashDb {
    /// Resolve the identifier for a digest set, inserting a record if none exists.
    ///
    /// The insert is `ON CONFLICT DO NOTHING` against the unique
    /// (sha2_256, sha3_256) pair, so a concurrent writer that inserted the same
    /// content first turns this call into a lookup instead of an error. An
    /// existing record is never modified; `retained` is only written on create.
    pub async fn resolve_or_insert(&self, digests: &DigestSet, retained: Option<&[u8]>) -> Result<Resolved, Error> {
        let d = digests.clone();
        let retained = retained.map(<[u8]>::to_vec);
        let resolved = self
            .conn
            .call(move |conn| -> Result<Resolved, Error> {
                let inserted = conn.execute(
                    "INSERT INTO hashes (
                    bytes, adler32, crc32, md5, ripemd160, sha1,
                    sha2_256, sha2_512, sha3_256, fuzzy_digest, size, version
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                ON CONFLICT(sha2_256, sha3_256) DO NOTHING",
                    params![
                        &retained,
                        &d.adler32,
                        &d.crc32,
                        &d.md5,
                        &d.ripemd160,
                        &d.sha1,
                        &d.sha2_256,
                        &d.sha2_512,
                        &d.sha3_256,
                        &d.fuzzy_digest,
                        d.size as i64,
                        d.version,
                    ],
                )?;

                let id: i64 = conn.query_row(
                    "SELECT id FROM hashes WHERE sha2_256 = ?1 AND sha3_256 = ?2",
                    params![&d.sha2_256, &d.sha3_256],
                    |row| row.get(0),
                )?;

                Ok(Resolved { id: ContentId(id), created: inserted > 0 })
            })
            .await
            .map_err(Error::from)?;

        if resolved.created {
            tracing::info!(id = %resolved.id, sha256 = %digests.sha2_256, size = digests.size, "Inserted content record");
        } else {
            tracing::debug!(id = %resolved.id, sha256 = %digests.sha2_256, "Content already known");
        }

        Ok(resolved)
    }

    /// Stored SHA-256 for an identifier.
    ///
    /// Returns None if the identifier doesn't exist.
    pub async fn lookup_digest(&self, id: ContentId) -> Result<Option<String>, Error> {
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let result = conn.query_row("SELECT sha2_256 FROM hashes WHERE id = ?1", params![id.0], |row| {
                    row.get(0)
                });

                match result {
                    Ok(s) => Ok(Some(s)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Get a full record by identifier.
    pub async fn get_record(&self, id: ContentId) -> Result<Option<ContentRecord>, Error> {
        self.conn
            .call(move |conn| -> Result<Option<ContentRecord>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT
                    id, bytes, adler32, crc32, md5, ripemd160, sha1,
                    sha2_256, sha2_512, sha3_256, fuzzy_digest, size, version
                FROM hashes WHERE id = ?1",
                )?;

                let result = stmt.query_row(params![id.0], |row| {
                    Ok(ContentRecord {
                        id: ContentId(row.get(0)?),
                        bytes: row.get(1)?,
                        digests: DigestSet {
                            adler32: row.get(2)?,
                            crc32: row.get(3)?,
                            md5: row.get(4)?,
                            ripemd160: row.get(5)?,
                            sha1: row.get(6)?,
                            sha2_256: row.get(7)?,
                            sha2_512: row.get(8)?,
                            sha3_256: row.get(9)?,
                            fuzzy_digest: row.get(10)?,
                            size: row.get::<_, i64>(11)? as u64,
                            version: row.get(12)?,
                        },
                    })
                });

                match result {
                    Ok(r) => Ok(Some(r)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Number of content records in the store.
    pub async fn count_records(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM hashes", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
