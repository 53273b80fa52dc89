//! CLI for the issue mirror.
//!
//! Syncs the issues of every configured partner repository into the mirror
//! (directory) repository.

use clap::Parser;
use issue_mirror::{
    GitHubIssueStore, RepositoryResult, RunSummary, Runner, RunnerConfig, RunnerError,
    SyncConfig, DEFAULT_CONCURRENCY, DEFAULT_CONFIG_FILE,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Mirror - Keep a directory repository in sync with partner repository issues.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the sync config file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN")]
    token: String,

    /// Mirror repository URL, overriding the config file.
    #[arg(long)]
    mirror: Option<String>,

    /// Preview changes without creating or updating issues.
    #[arg(long)]
    dry_run: bool,

    /// Maximum concurrent assignee lookups.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    install_crypto_provider();

    let args = Args::parse();
    let json = args.json;

    match run(args).await {
        Ok(summary) => {
            if json {
                print_json_summary(&summary);
            } else {
                print_summary(&summary);
            }

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Sets up the global tracing subscriber with compact single-line output,
/// filtered by `RUST_LOG` (defaults to "info").
fn install_crypto_provider() {
    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let mut sync_config = SyncConfig::load(&args.config)?;
    if let Some(mirror) = &args.mirror {
        sync_config = sync_config.with_mirror_url(mirror)?;
    }

    let store = GitHubIssueStore::new(args.token)?;
    let config = RunnerConfig::from_sync_config(&sync_config, args.dry_run, args.concurrency);
    let runner = Runner::new(config, Arc::new(store));
    runner.run(&sync_config.partners).await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Partners processed: {}", summary.partners_processed);
    println!("  Partners failed: {}", summary.partners_failed);
    println!("  Issues created: {}", summary.issues_created);
    println!("  Issues updated: {}", summary.issues_updated);
    println!("  Issues unchanged: {}", summary.issues_unchanged);
    println!("  Closed issues skipped: {}", summary.issues_skipped);
    println!("  Ambiguous matches: {}", summary.ambiguous_matches);
    println!("  Assignees updated: {}", summary.assignees_updated);
    println!("  Assignees failed: {}", summary.assignees_failed);

    for result in &summary.repositories {
        if let RepositoryResult::Failed {
            repository, error, ..
        } = result
        {
            println!("  FAILED {repository}: {error}");
        }
    }
}

fn print_json_summary(summary: &RunSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{json}"),
        Err(e) => error!(error = %e, "Failed to serialize summary"),
    }
}
