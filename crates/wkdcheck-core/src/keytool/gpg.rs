//! gpg-backed key processor.
//!
//! Runs `gpg --with-colons <path>` and reads the machine-parseable records.
//! The wait loop polls the child so a cancel signal or the tool deadline kills
//! it instead of leaking a hung subprocess.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

use crate::control::CancelToken;

use super::colons::parse_colon_records;
use super::{KeyInfo, KeyProcessor, ToolError};

/// Default binary name looked up on PATH.
const DEFAULT_BINARY: &str = "gpg";

/// Poll interval for the child wait loop.
const WAIT_POLL: Duration = Duration::from_millis(25);

/// Key processor that shells out to GnuPG.
#[derive(Debug, Clone)]
pub struct GpgTool {
    binary: PathBuf,
    timeout: Duration,
}

impl GpgTool {
    /// Confirms the binary is runnable before any network work happens.
    ///
    /// Probes with `--version` so a missing or broken install fails the run up
    /// front. `binary` overrides the PATH lookup (the `--gpg` flag).
    pub fn locate(binary: Option<PathBuf>, timeout: Duration) -> Result<Self, ToolError> {
        let binary = binary.unwrap_or_else(|| PathBuf::from(DEFAULT_BINARY));
        let probe = Command::new(&binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match probe {
            Ok(status) if status.success() => {
                tracing::debug!("using key tool {}", binary.display());
                Ok(GpgTool { binary, timeout })
            }
            Ok(status) => Err(ToolError::Launch(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("`{} --version` exited with {}", binary.display(), status),
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ToolError::NotFound {
                binary: binary.display().to_string(),
            }),
            Err(e) => Err(ToolError::Launch(e)),
        }
    }

    /// Path of the probed binary.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Waits for the child, polling so cancellation and the tool deadline can
    /// kill it. Returns the exit status.
    fn wait_with_cancel(
        &self,
        child: &mut Child,
        cancel: &CancelToken,
    ) -> Result<std::process::ExitStatus, ToolError> {
        let cancel = cancel.deadline_in(self.timeout);
        loop {
            if cancel.is_cancelled() {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ToolError::Interrupted);
            }
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => thread::sleep(WAIT_POLL),
                Err(e) => {
                    let _ = child.kill();
                    return Err(ToolError::Launch(e));
                }
            }
        }
    }
}

impl KeyProcessor for GpgTool {
    fn validate(&self, path: &Path, cancel: &CancelToken) -> Result<KeyInfo, ToolError> {
        let mut child = Command::new(&self.binary)
            .arg("--with-colons")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ToolError::NotFound {
                    binary: self.binary.display().to_string(),
                },
                _ => ToolError::Launch(e),
            })?;

        // Drain both pipes in the background so a chatty child cannot fill a
        // pipe buffer and stall while we poll for its exit.
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let stdout_thread = thread::spawn(move || drain(stdout_pipe));
        let stderr_thread = thread::spawn(move || drain(stderr_pipe));

        let status = self.wait_with_cancel(&mut child, cancel)?;
        let stdout = stdout_thread.join().unwrap_or_default();
        let stderr = stderr_thread.join().unwrap_or_default();

        if !status.success() {
            let mut diagnostic = String::from_utf8_lossy(&stderr).trim().to_string();
            if diagnostic.is_empty() {
                diagnostic = format!("key tool exited with {}", status);
            }
            return Err(ToolError::Rejected { diagnostic });
        }

        let records = String::from_utf8_lossy(&stdout);
        parse_colon_records(&records).ok_or_else(|| ToolError::Rejected {
            diagnostic: "tool output contained no public key record".to_string(),
        })
    }
}

fn drain(pipe: Option<impl Read>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}
