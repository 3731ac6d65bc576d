//! CLI for the wkdcheck WKD deployment checker.

mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use wkdcheck_core::logging;

use commands::{run_check, run_completions, run_urls};

/// Check WKD deployments: derive the lookup URL for each address and verify
/// the endpoint serves a valid binary OpenPGP key.
#[derive(Debug, Parser)]
#[command(name = "wkdcheck")]
#[command(about = "Check Web Key Directory deployments for email addresses", long_about = None)]
pub struct Cli {
    /// Email addresses whose WKD deployment to check.
    #[arg(value_name = "EMAIL", required_unless_present = "completions")]
    pub emails: Vec<String>,

    /// Check every address and report all verdicts instead of stopping at the
    /// first failure.
    #[arg(long)]
    pub keep_going: bool,

    /// Check up to N addresses concurrently (default 1).
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Print the derived lookup URLs without fetching anything.
    #[arg(long)]
    pub url_only: bool,

    /// Print the report as a JSON array on stdout.
    #[arg(long)]
    pub json: bool,

    /// Key tool binary to use instead of `gpg` from PATH.
    #[arg(long, value_name = "PATH")]
    pub gpg: Option<PathBuf>,

    /// Wall-clock limit for each address's whole check, in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Debug-level logging for the wkdcheck crates.
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completions on stdout and exit.
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<clap_complete::Shell>,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        logging::init_logging(cli.verbose);

        if let Some(shell) = cli.completions {
            run_completions(shell);
            return Ok(());
        }
        if cli.url_only {
            return run_urls(&cli.emails, cli.keep_going);
        }
        run_check(&cli).await
    }
}

#[cfg(test)]
mod tests;
