//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use hashstore_core::{Annotations, IngestOptions};

#[derive(Debug, Parser)]
#[command(name = "hashstore")]
#[command(version, about = "Content-addressed file identities backed by SQLite", long_about = None)]
pub struct Cli {
    /// SQLite database path (overrides HASHSTORE_DB_PATH)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Filename to store for every file
    #[arg(long)]
    pub name: Option<String>,

    /// Store each file's own name
    #[arg(long)]
    pub auto_name: bool,

    #[arg(long)]
    pub comment: Option<String>,

    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub rating: Option<String>,

    #[arg(long)]
    pub external_id: Option<String>,

    /// Tag to attach (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Keep the full content regardless of size
    #[arg(long)]
    pub save: bool,

    /// Cache the identifier in an extended attribute
    #[arg(long)]
    pub xattr: bool,

    /// Rename files to <name>_[#<id>]<ext>
    #[arg(long)]
    pub rename: bool,

    /// Check files against their cached identifier instead of hashing them in
    #[arg(
        long,
        conflicts_with_all = [
            "save", "xattr", "rename", "name", "auto_name", "comment", "url", "rating", "external_id", "tags",
        ]
    )]
    pub verify: bool,

    /// Report per-file failures and continue with the next file
    #[arg(long)]
    pub keep_going: bool,

    /// Emit logs as JSON on stderr
    #[arg(long)]
    pub log_json: bool,

    /// Files to process, in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl Cli {
    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            persist_full: self.save,
            write_metadata: self.xattr,
            rename: self.rename,
            annotations: Annotations {
                name: self.name.clone(),
                auto_name: self.auto_name,
                comment: self.comment.clone(),
                url: self.url.clone(),
                rating: self.rating.clone(),
                external_id: self.external_id.clone(),
                tags: self.tags.clone(),
            },
        }
    }
}
