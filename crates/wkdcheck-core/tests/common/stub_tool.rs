//! Recording key-tool stub so integration tests need no GnuPG install.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use wkdcheck_core::control::CancelToken;
use wkdcheck_core::keytool::{KeyInfo, KeyProcessor, ToolError};

enum Outcome {
    Accept(KeyInfo),
    Reject(&'static str),
}

/// Stand-in key processor with a fixed verdict. Records how often it ran and
/// the payload bytes it was handed.
pub struct StubTool {
    outcome: Outcome,
    calls: AtomicUsize,
    last_payload: Mutex<Option<Vec<u8>>>,
}

impl StubTool {
    /// Accepts every payload, reporting the given key summary.
    pub fn accepting(fingerprint: &str, user_id: &str) -> Self {
        StubTool {
            outcome: Outcome::Accept(KeyInfo {
                fingerprint: Some(fingerprint.to_string()),
                user_ids: vec![user_id.to_string()],
            }),
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    /// Rejects every payload with the given diagnostic.
    pub fn rejecting(diagnostic: &'static str) -> Self {
        StubTool {
            outcome: Outcome::Reject(diagnostic),
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Bytes of the scratch file from the most recent invocation.
    pub fn last_payload(&self) -> Option<Vec<u8>> {
        self.last_payload.lock().unwrap().clone()
    }
}

impl KeyProcessor for StubTool {
    fn validate(&self, path: &Path, _cancel: &CancelToken) -> Result<KeyInfo, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let data = std::fs::read(path).expect("read scratch payload");
        *self.last_payload.lock().unwrap() = Some(data);
        match &self.outcome {
            Outcome::Accept(info) => Ok(info.clone()),
            Outcome::Reject(diagnostic) => Err(ToolError::Rejected {
                diagnostic: diagnostic.to_string(),
            }),
        }
    }
}
