//! Per-address check orchestration.
//!
//! Drives derive → validate for each input address, sequentially (fail-fast
//! by default, keep-going on request) or with up to N checks in flight.
//! Addresses share no state, so parallelism is purely a throughput choice.

mod parallel;
mod run;

pub use parallel::run_checks_parallel;
pub use run::{run_checks_sequential, run_one_check};

use serde::Serialize;
use std::time::Duration;

use crate::validate::ValidateOptions;

/// How a run processes its addresses.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Per-validation knobs (timeouts, scratch dir).
    pub validate: ValidateOptions,
    /// Optional wall-clock deadline for each address's whole check.
    pub check_timeout: Option<Duration>,
    /// Report every address instead of stopping at the first failure.
    pub keep_going: bool,
    /// Number of checks in flight at once (1 = sequential).
    pub jobs: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            validate: ValidateOptions::default(),
            check_timeout: None,
            keep_going: false,
            jobs: 1,
        }
    }
}

/// Outcome of one address's check, for the operator report.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// The address as given on the command line.
    pub email: String,
    /// The derived lookup URL; absent when derivation itself failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// True when the endpoint served a valid binary key.
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<String>,
    /// Failure description; absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckReport {
    fn success(email: &str, url: String, info: crate::keytool::KeyInfo) -> Self {
        CheckReport {
            email: email.to_string(),
            url: Some(url),
            ok: true,
            fingerprint: info.fingerprint,
            user_ids: info.user_ids,
            error: None,
        }
    }

    fn failure(email: &str, url: Option<String>, error: String) -> Self {
        CheckReport {
            email: email.to_string(),
            url,
            ok: false,
            fingerprint: None,
            user_ids: Vec::new(),
            error: Some(error),
        }
    }
}
