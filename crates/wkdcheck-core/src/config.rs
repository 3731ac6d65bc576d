//! Optional user configuration from `~/.config/wkdcheck/config.toml`.
//!
//! Every key has a compiled default and a missing file is fine; the file is
//! purely a user-provided override and is never created or written by the
//! tool. CLI flags take precedence over the file.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_connect_timeout_secs() -> u64 {
    15
}

fn default_fetch_timeout_secs() -> u64 {
    60
}

fn default_tool_timeout_secs() -> u64 {
    30
}

fn default_jobs() -> usize {
    1
}

/// Configuration loaded from the XDG config dir, if present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WkdcheckConfig {
    /// TCP/TLS connect timeout for lookups, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout for lookups, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Deadline for one key tool invocation, in seconds.
    #[serde(default = "default_tool_timeout_secs")]
    pub tool_timeout_secs: u64,
    /// Default number of checks in flight (overridden by `--jobs`).
    #[serde(default = "default_jobs")]
    pub jobs: usize,
    /// Key tool binary (overridden by `--gpg`). `None` means `gpg` from PATH.
    #[serde(default)]
    pub gpg_binary: Option<PathBuf>,
}

impl Default for WkdcheckConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            tool_timeout_secs: default_tool_timeout_secs(),
            jobs: default_jobs(),
            gpg_binary: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wkdcheck")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Loads configuration from disk; compiled defaults when no file exists.
pub fn load() -> Result<WkdcheckConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(WkdcheckConfig::default());
    }
    let data = fs::read_to_string(&path)?;
    let cfg: WkdcheckConfig = toml::from_str(&data)?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
