//! Clock port
//!
//! Expiry is computed against an injected clock so tests can move time
//! forward without sleeping.

use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current time in Unix epoch seconds
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current time as Unix epoch seconds
    fn now_epoch_secs(&self) -> i64;
}

/// Production clock using system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Start the clock at `epoch_secs`
    pub fn new(epoch_secs: i64) -> Self {
        Self {
            now: AtomicI64::new(epoch_secs),
        }
    }

    /// Move the clock forward by `secs`
    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump to `epoch_secs`
    pub fn set(&self, epoch_secs: i64) {
        self.now.store(epoch_secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_epoch_secs(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
