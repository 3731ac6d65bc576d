//! Check control: shared cancel flag plus optional per-check deadline.
//!
//! One `CancelToken` is created per run; the CLI trips it on Ctrl-C. A
//! per-address token derived with [`CancelToken::deadline_in`] shares the same
//! flag, so one signal aborts both the in-flight HTTP transfer and the key
//! tool subprocess.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cancellation signal checked between pipeline steps and inside transfer and
/// subprocess wait loops. Clones share the underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Every clone and derived token observes it.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// True once `cancel` was called on any clone or the deadline passed.
    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::Relaxed) {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Derives a token that shares this flag and additionally expires after
    /// `timeout`. An existing earlier deadline is kept.
    pub fn deadline_in(&self, timeout: Duration) -> CancelToken {
        let candidate = Instant::now() + timeout;
        CancelToken {
            flag: Arc::clone(&self.flag),
            deadline: Some(self.deadline.map_or(candidate, |d| d.min(candidate))),
        }
    }

    /// Time left until the deadline, if one is set. Zero once it passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}
