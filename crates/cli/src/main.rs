//! hashstore command-line entry point.
//!
//! Results go to stdout, one line per file. Logging goes to stderr.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use hashstore_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = AppConfig::load().context("loading configuration")?;
    run::run(cli, config).await
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
