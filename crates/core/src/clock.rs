//! Time source abstraction.
//!
//! Every timestamp written to a document's frontmatter or a log entry goes
//! through a `Clock` so that tests can pin time instead of racing the wall
//! clock.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Current-time source, injected wherever a component needs `now()`.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;

    /// Current time as an RFC 3339 string, as written into frontmatter.
    fn now_rfc3339(&self) -> String {
        epoch_ms_to_rfc3339(self.now_ms())
    }
}

fn epoch_ms_to_rfc3339(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).unwrap_or_default())
        .to_rfc3339()
}

/// Real wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock with a settable, independently advanceable time, for deterministic
/// tests of `createdAt`/`updatedAt` ordering and lease expiry.
#[derive(Clone)]
pub struct FakeClock {
    millis: Arc<AtomicI64>,
}

impl FakeClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(start_ms)),
        }
    }

    /// Advance the clock and return the new time.
    pub fn advance_ms(&self, delta: i64) -> i64 {
        self.millis.fetch_add(delta, Ordering::SeqCst) + delta
    }

    pub fn set_ms(&self, ms: i64) {
        self.millis.store(ms, Ordering::SeqCst);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Shared, cloneable handle to a clock, for threading through services.
pub type SharedClock = Arc<dyn Clock>;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
