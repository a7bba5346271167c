//! Append-only annotation, property, tag and content rows.
//!
//! Empty values are skipped without error. Nothing here is unique or
//! updatable.

use super::connection::HashDb;
use super::records::ContentId;
use crate::Error;
use tokio_rusqlite::params;

impl HashDb {
    /// Attach a free-text annotation (e.g. a comment).
    ///
    /// Returns whether a row was written.
    pub async fn add_annotation(&self, id: ContentId, kind: &str, text: &str) -> Result<bool, Error> {
        if text.is_empty() {
            return Ok(false);
        }
        let (kind, text) = (kind.to_string(), text.to_string());
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO annotations (hash_id, type, annotation) VALUES (?1, ?2, ?3)",
                    params![id.0, kind, text],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)?;
        Ok(true)
    }

    /// Attach a typed property (filename, url, rating, ...).
    pub async fn add_property(&self, id: ContentId, kind: &str, value: &str) -> Result<bool, Error> {
        if value.is_empty() {
            return Ok(false);
        }
        let (kind, value) = (kind.to_string(), value.to_string());
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO properties (hash_id, type, property) VALUES (?1, ?2, ?3)",
                    params![id.0, kind, value],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)?;
        Ok(true)
    }

    pub async fn add_tag(&self, id: ContentId, tag: &str) -> Result<bool, Error> {
        if tag.is_empty() {
            return Ok(false);
        }
        let tag = tag.to_string();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute("INSERT INTO tags (hash_id, tag) VALUES (?1, ?2)", params![id.0, tag])?;
                Ok(())
            })
            .await
            .map_err(Error::from)?;
        Ok(true)
    }

    /// Archive full content for a record that was created without it.
    pub async fn add_content(&self, id: ContentId, bytes: Vec<u8>) -> Result<bool, Error> {
        if bytes.is_empty() {
            return Ok(false);
        }
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute("INSERT INTO contents (hash_id, bytes) VALUES (?1, ?2)", params![id.0, bytes])?;
                Ok(())
            })
            .await
            .map_err(Error::from)?;
        Ok(true)
    }

    /// Whether full content has already been archived for a record.
    pub async fn has_content(&self, id: ContentId) -> Result<bool, Error> {
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let exists: bool = conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM contents WHERE hash_id = ?1)",
                    params![id.0],
                    |row| row.get(0),
                )?;
                Ok(exists)
            })
            .await
            .map_err(Error::from)
    }
}
