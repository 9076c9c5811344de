//! Issue-sync CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: flags and environment variables into a
//!    [`tasks::RunConfig`] and a [`github::GithubConfig`]. A missing token stops
//!    the process here, before any remote call.
//! 2. **Wire observability**: `tracing-subscriber` on stderr, text or JSON.
//! 3. **Construct infrastructure**: a [`github::GithubClient`] injected into
//!    [`sync::SyncOrchestrator`].
//! 4. **Run once**: load the task list, synchronise it, print the progress
//!    report to stdout, and exit non-zero on the first error.

mod config;
mod logging;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use github::GithubClient;
use sync::SyncOrchestrator;
use tasks::RunSummary;
use tracing::{error, info};

use crate::config::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    match run(&cli).await {
        Ok(summary) => {
            info!(run_id = %summary.run_id, "sync complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = ?err, "sync failed");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let github_config = cli.github_config()?;
    let run_config = cli.run_config()?;

    let client = GithubClient::new(github_config).context("failed to build GitHub client")?;
    let orchestrator = SyncOrchestrator::new(Arc::new(client), run_config);

    let mut stdout = std::io::stdout().lock();
    let summary = orchestrator
        .run_from_file(&mut stdout)
        .await
        .context("synchronisation aborted")?;
    Ok(summary)
}
