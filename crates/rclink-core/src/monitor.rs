//! Link Monitor - Tracks incoming frame times to report link liveness
//!
//! **Purpose**: Diagnostics only. The authoritative staleness decision
//! belongs to the host watchdog; this monitor answers "how long since the
//! last RC frame" for callers that want to inspect link quality.
//!
//! **App Start Relative Time Pattern**:
//! - Uses monotonic time anchored to application start
//! - Unaffected by system clock changes (NTP, manual adjustments)
//! - Safe to store in AtomicU64 for lock-free access

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Global anchor point for monotonic time
/// Set once on first access, never changes
static APP_START: OnceLock<Instant> = OnceLock::new();

/// Get monotonic time as microseconds since app start
fn monotonic_micros() -> u64 {
    let start = APP_START.get_or_init(Instant::now);
    start.elapsed().as_micros() as u64
}

/// Tracks the time since the last RC frame was processed.
pub struct LinkMonitor {
    last_frame: AtomicU64,
}

impl LinkMonitor {
    pub fn new() -> Self {
        Self {
            last_frame: AtomicU64::new(monotonic_micros()),
        }
    }

    /// Record that a frame was just processed.
    pub fn register_frame(&self) {
        self.last_frame.store(monotonic_micros(), Ordering::Relaxed);
    }

    /// Time since the last processed frame.
    pub fn frame_age(&self) -> Duration {
        let last_us = self.last_frame.load(Ordering::Relaxed);
        let now_us = monotonic_micros();
        Duration::from_micros(now_us.saturating_sub(last_us))
    }

    /// True if a frame arrived within `window`.
    pub fn is_receiving(&self, window: Duration) -> bool {
        self.frame_age() < window
    }
}

impl Default for LinkMonitor {
    fn default() -> Self {
        Self::new()
    }
}
