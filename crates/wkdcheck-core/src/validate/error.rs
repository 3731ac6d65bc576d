//! Validation error taxonomy.
//!
//! Each variant names a distinct deployment defect so the operator knows what
//! to fix: transport problems, a wrong status code, armored instead of binary
//! key material, or key material the tool cannot parse.

use thiserror::Error;

use crate::keytool::ToolError;

/// Failure reported for one address's content validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout).
    #[error("fetch failed: {0}")]
    Fetch(#[from] curl::Error),

    /// The server answered, but not with 200.
    #[error("received status code {0} while fetching key via WKD")]
    UnexpectedStatus(u32),

    /// Duplicating the response body into the scratch sinks failed.
    #[error("failed to copy response body to scratch file: {0}")]
    Copy(#[source] std::io::Error),

    /// The payload is ASCII-armored; WKD must serve raw binary packets.
    #[error("data appears to be a key in ASCII armor")]
    ArmoredKey,

    /// The key tool rejected the payload as not a valid key.
    #[error("key tool rejected the payload: {diagnostic}")]
    KeyParse { diagnostic: String },

    /// The key tool could not be run at all (distinct from it rejecting the key).
    #[error("key tool failed: {0}")]
    Tool(#[source] ToolError),

    /// The check was cancelled or its deadline passed.
    #[error("check cancelled")]
    Cancelled,
}

impl ValidationError {
    /// True for the verdicts that indicate the deployment served bad content,
    /// as opposed to the check not completing.
    pub fn is_content_defect(&self) -> bool {
        matches!(
            self,
            ValidationError::UnexpectedStatus(_)
                | ValidationError::ArmoredKey
                | ValidationError::KeyParse { .. }
        )
    }
}
