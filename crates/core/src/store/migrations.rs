//! Schema for the content store.
//!
//! `001_hashes` creates the `hashes` table: one row per distinct content,
//! unique on the `(sha2_256, sha3_256)` pair. `002_side_tables` adds the
//! append-only `annotations`, `properties`, `tags` and `contents` tables,
//! each keyed to `hashes(id)`. Applied versions are recorded in `_migrations`.

use super::Error;
use tokio_rusqlite::{Connection, params};

/// Ordered schema steps: (version, name, SQL).
const MIGRATIONS: &[(i64, &str, &str)] = &[
    (1, "001_hashes", include_str!("../../migrations/001_hashes.sql")),
    (2, "002_side_tables", include_str!("../../migrations/002_side_tables.sql")),
];

/// Bring the schema up to the latest version.
///
/// Each pending step runs in its own transaction together with its
/// `_migrations` row, so a failed step leaves no partial schema behind.
///
/// # Errors
///
/// Returns [`Error::MigrationFailed`] naming the step whose SQL failed.
pub async fn run(conn: &Connection) -> Result<(), Error> {
    conn.call(|conn| -> Result<(), Error> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(Error::from)?;

        let current: i64 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| row.get(0))
            .map_err(Error::from)?;

        for &(version, name, sql) in MIGRATIONS.iter().filter(|(version, ..)| *version > current) {
            let tx = conn.transaction().map_err(Error::from)?;
            tx.execute_batch(sql)
                .map_err(|e| Error::MigrationFailed(format!("{name}: {e}")))?;
            tx.execute(
                "INSERT INTO _migrations (version, applied_at) VALUES (?1, ?2)",
                params![version, chrono::Utc::now().to_rfc3339()],
            )
            .map_err(Error::from)?;
            tx.commit().map_err(Error::from)?;
            tracing::debug!(version, name, "Applied schema migration");
        }

        Ok(())
    })
    .await
    .map_err(Error::from)
}
