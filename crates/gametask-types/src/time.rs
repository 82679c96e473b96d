//! Task clock.
//!
//! Key events are stamped and run durations measured on one clock, shared by
//! the frame loop and the input callbacks.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic microsecond clock.
/// Implementations: SystemTimeProvider (production), MockTimeProvider (testing).
pub trait TimeProvider: Send + Sync {
    /// Microseconds since an arbitrary, fixed origin.
    fn now_us(&self) -> i64;

    /// Time passed since `start_us`; zero if the clock reads earlier.
    fn elapsed_since(&self, start_us: i64) -> Duration {
        let us = self.now_us().saturating_sub(start_us).max(0);
        Duration::from_micros(us as u64)
    }
}

/// Wall time measured from construction.
pub struct SystemTimeProvider {
    origin: Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_us(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_micros()).unwrap_or(i64::MAX)
    }
}

/// Clock that only moves when told to.
#[derive(Default)]
pub struct MockTimeProvider {
    now: AtomicI64,
}

impl MockTimeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&self, us: i64) {
        self.now.store(us, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_us: i64) {
        self.now.fetch_add(delta_us, Ordering::SeqCst);
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_us(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
