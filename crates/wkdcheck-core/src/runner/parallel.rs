//! Run multiple checks concurrently.
//!
//! Keeps up to `jobs` checks in flight at once; when one finishes, the next
//! queued address is started until the queue is empty. The blocking work
//! (curl transfer, tool subprocess) runs on the blocking pool.

use anyhow::Result;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::control::CancelToken;
use crate::keytool::KeyProcessor;

use super::run::run_one_check;
use super::{CheckReport, RunOptions};

/// Checks addresses with up to `opts.jobs` in flight at once.
///
/// Reports come back in input order regardless of completion order. Without
/// `keep_going`, the first failure cancels the in-flight checks and stops new
/// ones from starting; their reports (including the cancelled ones) are still
/// returned so the operator sees what ran.
pub async fn run_checks_parallel(
    addresses: &[String],
    tool: Arc<dyn KeyProcessor>,
    opts: &RunOptions,
    cancel: &CancelToken,
) -> Result<Vec<CheckReport>> {
    let jobs = opts.jobs.max(1);
    let mut queue: VecDeque<(usize, String)> =
        addresses.iter().cloned().enumerate().collect();
    let mut slots: Vec<Option<CheckReport>> = addresses.iter().map(|_| None).collect();
    let mut join_set = tokio::task::JoinSet::new();
    let mut failed = false;

    loop {
        while join_set.len() < jobs && !(failed && !opts.keep_going) {
            let Some((index, email)) = queue.pop_front() else {
                break;
            };
            let tool = Arc::clone(&tool);
            let validate_opts = opts.validate.clone();
            let check_timeout = opts.check_timeout;
            let cancel = cancel.clone();
            join_set.spawn_blocking(move || {
                let report =
                    run_one_check(&email, tool.as_ref(), &validate_opts, check_timeout, &cancel);
                (index, report)
            });
        }

        if join_set.is_empty() {
            break;
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let (index, report) = res.map_err(|e| anyhow::anyhow!("check task join: {}", e))?;
        if !report.ok {
            failed = true;
            if !opts.keep_going {
                cancel.cancel();
            }
        }
        slots[index] = Some(report);
    }

    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keytool::{KeyInfo, ToolError};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTool {
        calls: AtomicUsize,
    }

    impl KeyProcessor for CountingTool {
        fn validate(&self, _path: &Path, _cancel: &CancelToken) -> Result<KeyInfo, ToolError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(KeyInfo::default())
        }
    }

    fn addresses(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn keep_going_reports_in_input_order() {
        let tool = Arc::new(CountingTool {
            calls: AtomicUsize::new(0),
        });
        let opts = RunOptions {
            keep_going: true,
            jobs: 4,
            ..RunOptions::default()
        };
        let input = addresses(&["first-bad", "second@bad@x", "", "last-bad"]);
        let reports = run_checks_parallel(&input, tool.clone(), &opts, &CancelToken::new())
            .await
            .unwrap();
        assert_eq!(reports.len(), 4);
        let emails: Vec<&str> = reports.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, ["first-bad", "second@bad@x", "", "last-bad"]);
        assert!(reports.iter().all(|r| !r.ok && r.url.is_none()));
        assert_eq!(tool.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn fail_fast_stops_spawning_new_checks() {
        let tool = Arc::new(CountingTool {
            calls: AtomicUsize::new(0),
        });
        let opts = RunOptions {
            jobs: 1,
            ..RunOptions::default()
        };
        let input = addresses(&["bad-one", "bad-two", "bad-three"]);
        let cancel = CancelToken::new();
        let reports = run_checks_parallel(&input, tool, &opts, &cancel)
            .await
            .unwrap();
        // With one job in flight, the first failure prevents the rest.
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].email, "bad-one");
        assert!(cancel.is_cancelled());
    }
}
