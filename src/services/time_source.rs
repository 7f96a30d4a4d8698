//! Time source abstraction for testability.
//!
//! The stepper's press-and-hold auto-repeat is the only time-driven behavior
//! in the panel; abstracting the clock lets tests drive it deterministically
//! instead of sleeping through real 200 ms intervals.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Abstraction over the monotonic clock.
pub trait TimeSource: Send + Sync + std::fmt::Debug {
    /// Get the current instant for measuring elapsed time.
    fn now(&self) -> Instant;

    /// Calculate elapsed time since an earlier instant.
    fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// Type alias for shared time source.
pub type SharedTimeSource = Arc<dyn TimeSource>;

/// Production implementation using the actual system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeSource;

impl RealTimeSource {
    pub fn new() -> Self {
        Self
    }

    pub fn shared() -> SharedTimeSource {
        Arc::new(Self)
    }
}

impl TimeSource for RealTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Test implementation with manually advanced logical time.
#[derive(Debug)]
pub struct TestTimeSource {
    /// Logical time in nanoseconds since creation.
    logical_nanos: AtomicU64,
    /// Base instant (real time at creation, used for Instant arithmetic).
    base_instant: Instant,
}

impl Default for TestTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTimeSource {
    pub fn new() -> Self {
        Self {
            logical_nanos: AtomicU64::new(0),
            base_instant: Instant::now(),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Advance logical time by the given duration.
    pub fn advance(&self, duration: Duration) {
        self.logical_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Get the logical elapsed time since creation.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.logical_nanos.load(Ordering::SeqCst))
    }
}

impl TimeSource for TestTimeSource {
    fn now(&self) -> Instant {
        self.base_instant + self.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_time_source_now_advances() {
        let ts = RealTimeSource::new();
        let t1 = ts.now();
        std::thread::sleep(Duration::from_millis(1));
        let t2 = ts.now();
        assert!(t2 > t1);
    }

    #[test]
    fn test_time_source_starts_at_zero() {
        let ts = TestTimeSource::new();
        assert_eq!(ts.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_time_source_advance() {
        let ts = TestTimeSource::new();
        let start = ts.now();

        ts.advance(Duration::from_millis(450));

        assert_eq!(ts.elapsed(), Duration::from_millis(450));
        assert!(ts.elapsed_since(start) >= Duration::from_millis(450));
    }
}
