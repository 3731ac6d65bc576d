//! Sequential check execution.

use std::time::Duration;

use crate::control::CancelToken;
use crate::keytool::KeyProcessor;
use crate::lookup_url::derive_lookup_url;
use crate::validate::{validate, ValidateOptions};

use super::{CheckReport, RunOptions};

/// Runs the full derive → validate pipeline for one address.
///
/// Never panics or propagates: every outcome, including a malformed address,
/// becomes a report attributed to `email`. When `check_timeout` is set the
/// whole check (fetch and tool) runs under that deadline.
pub fn run_one_check(
    email: &str,
    tool: &dyn KeyProcessor,
    opts: &ValidateOptions,
    check_timeout: Option<Duration>,
    cancel: &CancelToken,
) -> CheckReport {
    let cancel = match check_timeout {
        Some(timeout) => cancel.deadline_in(timeout),
        None => cancel.clone(),
    };

    let url = match derive_lookup_url(email) {
        Ok(url) => url.into_string(),
        Err(e) => {
            tracing::warn!("{}: {}", email, e);
            return CheckReport::failure(email, None, e.to_string());
        }
    };
    tracing::debug!("{}: lookup URL {}", email, url);

    match validate(&url, tool, opts, &cancel) {
        Ok(info) => {
            tracing::info!("{}: valid key at {}", email, url);
            CheckReport::success(email, url, info)
        }
        Err(e) => {
            tracing::warn!("{}: {}", email, e);
            CheckReport::failure(email, Some(url), e.to_string())
        }
    }
}

/// Checks addresses one at a time in input order.
///
/// Stops at the first failed report unless `keep_going` is set; stops early
/// when the run is cancelled. Returns the reports produced so far.
pub fn run_checks_sequential(
    addresses: &[String],
    tool: &dyn KeyProcessor,
    opts: &RunOptions,
    cancel: &CancelToken,
) -> Vec<CheckReport> {
    let mut reports = Vec::with_capacity(addresses.len());
    for email in addresses {
        if cancel.is_cancelled() {
            break;
        }
        let report = run_one_check(email, tool, &opts.validate, opts.check_timeout, cancel);
        let failed = !report.ok;
        reports.push(report);
        if failed && !opts.keep_going {
            break;
        }
    }
    reports
}
