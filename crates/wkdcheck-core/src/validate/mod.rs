//! Content validation of one WKD lookup URL.
//!
//! Pipeline for one address: fetch the URL into a scratch file and an
//! in-memory buffer, require HTTP 200, reject ASCII armor, then hand the file
//! to the key tool for the structural check. Each step gates the next; the
//! scratch file is removed on every exit path by its RAII drop.

mod error;

pub use error::ValidationError;

use std::path::PathBuf;
use std::time::Duration;

use crate::control::CancelToken;
use crate::fetch;
use crate::keytool::{KeyInfo, KeyProcessor, ToolError};

/// Marker that identifies ASCII-armored OpenPGP data anywhere in the payload.
const ARMOR_MARKER: &[u8] = b"-----BEGIN PGP";

/// Scratch file name prefix, so stray files are attributable if cleanup is
/// ever defeated (e.g. SIGKILL).
const SCRATCH_PREFIX: &str = "wkdcheck-";

/// Knobs for one validation. The compiled defaults suit interactive use.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// TCP/TLS connect timeout for the GET.
    pub connect_timeout: Duration,
    /// Whole-transfer timeout for the GET.
    pub fetch_timeout: Duration,
    /// Directory for the scratch file; `None` means the system temp dir.
    pub scratch_dir: Option<PathBuf>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            fetch_timeout: Duration::from_secs(60),
            scratch_dir: None,
        }
    }
}

/// Fetches `url` and confirms it serves a valid, non-armored binary OpenPGP
/// public key. Returns the tool's key summary on success.
///
/// One attempt, one verdict: no retries. The scratch file holding the fetched
/// bytes is uniquely named (parallel checks cannot collide) and is deleted
/// when this function returns, whatever the outcome.
pub fn validate(
    url: &str,
    tool: &dyn KeyProcessor,
    opts: &ValidateOptions,
    cancel: &CancelToken,
) -> Result<KeyInfo, ValidationError> {
    if cancel.is_cancelled() {
        return Err(ValidationError::Cancelled);
    }

    let mut builder = tempfile::Builder::new();
    builder.prefix(SCRATCH_PREFIX);
    let scratch = match &opts.scratch_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(ValidationError::Copy)?;

    let (status, body) = fetch::fetch_to_sinks(url, scratch.as_file(), opts, cancel)?;
    if status != 200 {
        return Err(ValidationError::UnexpectedStatus(status));
    }
    tracing::debug!("fetched {} bytes from {}", body.len(), url);

    if contains_armor_marker(&body) {
        return Err(ValidationError::ArmoredKey);
    }

    if cancel.is_cancelled() {
        return Err(ValidationError::Cancelled);
    }

    tool.validate(scratch.path(), cancel).map_err(|e| match e {
        ToolError::Rejected { diagnostic } => ValidationError::KeyParse { diagnostic },
        ToolError::Interrupted => ValidationError::Cancelled,
        other => ValidationError::Tool(other),
    })
}

/// True when the payload contains the ASCII armor header anywhere.
///
/// WKD requires raw binary packets; armored data means the server (or an
/// upstream rewrite layer) is serving the wrong encoding.
fn contains_armor_marker(body: &[u8]) -> bool {
    body.windows(ARMOR_MARKER.len()).any(|w| w == ARMOR_MARKER)
}
