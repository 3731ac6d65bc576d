//! External key-processing collaborator.
//!
//! The content validator treats the tool as a black-box structural check: give
//! it a file path, get back either a key summary or a rejection. The
//! [`KeyProcessor`] trait keeps the validator independent of process spawning;
//! production uses [`GpgTool`], tests use an in-memory stub.

mod colons;
mod gpg;

pub use gpg::GpgTool;

use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::control::CancelToken;

/// Summary of the key the tool saw, for the operator report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeyInfo {
    /// Primary key fingerprint, when the tool reported one.
    pub fingerprint: Option<String>,
    /// User IDs bound to the key.
    pub user_ids: Vec<String>,
}

/// Failure of the key tool itself, as opposed to it rejecting the payload.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The binary is not on the search path. Checked once at startup; fatal
    /// for the whole run.
    #[error("`{binary}` not found in PATH; install GnuPG or pass --gpg")]
    NotFound { binary: String },

    /// Spawning or waiting on the subprocess failed for another reason.
    #[error("could not run key tool: {0}")]
    Launch(#[source] std::io::Error),

    /// The subprocess was killed because the check was cancelled or timed out.
    #[error("key tool interrupted")]
    Interrupted,

    /// The tool ran and rejected the payload; carries its diagnostic output.
    #[error("{diagnostic}")]
    Rejected { diagnostic: String },
}

/// Structural validator for fetched key material.
///
/// `path` points at a scratch file holding the exact bytes served by the WKD
/// endpoint. Implementations must honor `cancel` promptly so a run-wide abort
/// does not leak a hung subprocess.
pub trait KeyProcessor: Send + Sync {
    fn validate(&self, path: &Path, cancel: &CancelToken) -> Result<KeyInfo, ToolError>;
}
