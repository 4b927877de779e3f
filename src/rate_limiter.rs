//! Rate-limited warnings for failed transmissions.
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use log::warn;

pub type TimeProvider = Box<dyn Fn() -> u64 + Send + Sync>;

/// Summarises failed sends with at most one warning per interval.
pub struct RateLimiter {
    last_warn: AtomicU64,
    failed_entries: AtomicU64,
    target_name: String,
    warn_interval: u64,
    time_provider: TimeProvider,
}

impl RateLimiter {
    /// Create a new `RateLimiter` labelled with `target_name`. The first
    /// failure is reported immediately.
    pub fn new(target_name: &str, warn_interval: u64, time_provider: TimeProvider) -> Self {
        Self {
            last_warn: AtomicU64::new(time_provider().saturating_sub(warn_interval)),
            failed_entries: AtomicU64::new(0),
            target_name: target_name.to_string(),
            warn_interval,
            time_provider,
        }
    }

    /// Count a failed entry and warn if the interval has elapsed.
    pub fn record_failure(&self) {
        self.failed_entries.fetch_add(1, Ordering::Relaxed);

        let now = (self.time_provider)();
        let prev = self.last_warn.load(Ordering::Relaxed);
        if now.saturating_sub(prev) < self.warn_interval {
            return;
        }
        // Only the thread that moves `last_warn` forward reports this interval.
        if self
            .last_warn
            .compare_exchange(prev, now, Ordering::AcqRel, Ordering::Relaxed)
            .is_ok()
        {
            self.report_failures();
        }
    }

    /// Emit the pending failure count, if any, regardless of the interval.
    pub fn report_failures(&self) {
        let failed = self.failed_entries.swap(0, Ordering::Relaxed);
        if failed > 0 {
            warn!(
                "{}: {} log entries failed to send in the last interval",
                self.target_name, failed
            );
        }
    }

    /// Number of failures counted since the last report.
    pub fn pending(&self) -> u64 {
        self.failed_entries.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("target_name", &self.target_name)
            .field("warn_interval", &self.warn_interval)
            .field("pending", &self.pending())
            .finish()
    }
}

/// Returns the current time in seconds since the UNIX epoch.
///
/// Returns 0 if the system clock is before the UNIX epoch.
pub fn system_time_provider() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
