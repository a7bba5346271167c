//! Batch processing of the files named on the command line.
//!
//! Files are handled strictly in argument order over one store connection.
//! Without `--keep-going` the first I/O or store error ends the run.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use hashstore_core::{
    AppConfig, FileHasher, HashDb, IdentityCache, IngestOptions, RetentionPolicy, XattrMetadata, ingest_file,
    verify_file,
};

use crate::args::Cli;

struct Session {
    db: HashDb,
    identity: IdentityCache,
    hasher: FileHasher,
}

impl Session {
    async fn process(&self, path: &Path, verify: bool, options: &IngestOptions) -> Result<String, hashstore_core::Error> {
        if verify {
            let report = verify_file(&self.db, &self.identity, &self.hasher, path).await?;
            Ok(format!("{}\t{}", report.outcome, path.display()))
        } else {
            let report = ingest_file(&self.db, &self.identity, &self.hasher, path, options).await?;
            Ok(format!("{}\t{}", report.id, report.final_path().display()))
        }
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> Result<ExitCode> {
    let options = cli.ingest_options();
    let keep_going = cli.keep_going || config.keep_going;
    let db_path = cli.db.unwrap_or(config.db_path);

    let session = Session {
        db: HashDb::open(&db_path)
            .await
            .with_context(|| format!("opening store {}", db_path.display()))?,
        identity: IdentityCache::new(XattrMetadata::new(config.xattr_name)),
        hasher: FileHasher::new(RetentionPolicy::default(), config.read_buffer_bytes),
    };

    let mut failures = 0usize;
    for path in &cli.files {
        match session.process(path, cli.verify, &options).await {
            Ok(line) => println!("{line}"),
            Err(e) if keep_going => {
                failures += 1;
                tracing::error!(path = %path.display(), error = %e, "Failed to process file");
                eprintln!("FAILED\t{}\t{e}", path.display());
            }
            Err(e) => return Err(e).with_context(|| format!("processing {}", path.display())),
        }
    }

    session.db.close().await.context("closing store")?;

    if failures > 0 {
        tracing::warn!(failures, total = cli.files.len(), "Some files failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
