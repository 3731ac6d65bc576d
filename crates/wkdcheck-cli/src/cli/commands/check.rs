//! The default path: run the full check for every address.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use wkdcheck_core::config;
use wkdcheck_core::control::CancelToken;
use wkdcheck_core::keytool::GpgTool;
use wkdcheck_core::runner::{
    run_checks_parallel, run_checks_sequential, CheckReport, RunOptions,
};
use wkdcheck_core::validate::ValidateOptions;

use crate::cli::Cli;

pub async fn run_check(cli: &Cli) -> Result<()> {
    let cfg = config::load().context("load configuration")?;
    tracing::debug!("loaded config: {:?}", cfg);

    let opts = RunOptions {
        validate: ValidateOptions {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            fetch_timeout: Duration::from_secs(cfg.fetch_timeout_secs),
            scratch_dir: None,
        },
        check_timeout: cli.timeout.map(Duration::from_secs),
        keep_going: cli.keep_going,
        jobs: cli.jobs.unwrap_or(cfg.jobs).max(1),
    };

    // Locate the key tool before any network work; a missing tool fails the
    // whole run up front.
    let binary = cli.gpg.clone().or_else(|| cfg.gpg_binary.clone());
    let tool = GpgTool::locate(binary, Duration::from_secs(cfg.tool_timeout_secs))
        .context("locate key tool")?;

    let cancel = CancelToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, aborting checks");
            interrupt.cancel();
        }
    });

    let reports = if opts.jobs > 1 {
        run_checks_parallel(&cli.emails, Arc::new(tool), &opts, &cancel).await?
    } else {
        let emails = cli.emails.clone();
        let run_opts = opts.clone();
        let run_cancel = cancel.clone();
        tokio::task::spawn_blocking(move || {
            run_checks_sequential(&emails, &tool, &run_opts, &run_cancel)
        })
        .await
        .context("check task join")?
    };

    print_reports(&reports, cli.json)?;

    let failed: Vec<&CheckReport> = reports.iter().filter(|r| !r.ok).collect();
    match failed.first() {
        None if reports.len() == cli.emails.len() => Ok(()),
        None => bail!(
            "interrupted after {} of {} checks",
            reports.len(),
            cli.emails.len()
        ),
        Some(first) => {
            if cli.keep_going {
                bail!("{} of {} checks failed", failed.len(), reports.len());
            }
            bail!("check failed for {}", first.email);
        }
    }
}

fn print_reports(reports: &[CheckReport], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
        return Ok(());
    }
    for report in reports {
        if report.ok {
            println!("ok   {}", report.email);
        } else {
            let cause = report.error.as_deref().unwrap_or("unknown failure");
            println!("FAIL {}: {}", report.email, cause);
        }
        if let Some(url) = &report.url {
            println!("     url {}", url);
        }
        if let Some(fingerprint) = &report.fingerprint {
            println!("     fingerprint {}", fingerprint);
        }
        for uid in &report.user_ids {
            println!("     uid {}", uid);
        }
    }
    Ok(())
}
