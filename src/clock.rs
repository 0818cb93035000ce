//! Clock abstraction for deterministic sessions.
//!
//! The headless scheduler paces frames through `Clock::sleep`, so the
//! same loop runs in real time on `SystemClock` and fast-forwards on
//! `TestClock`, where sleeping simply advances the manual time.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Trait abstracting time sources for testability.
pub trait Clock: Send + Sync {
    /// Returns the current monotonic instant.
    fn now(&self) -> Instant;

    /// Let `duration` pass before the next frame.
    fn sleep(&self, duration: Duration);
}

/// Production clock using real system time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Test clock with manually controlled time.
pub struct TestClock {
    instant: Mutex<Instant>,
}

impl TestClock {
    /// Create a test clock starting at the current real time.
    pub fn new() -> Self {
        Self {
            instant: Mutex::new(Instant::now()),
        }
    }

    /// Advance time by the given duration.
    pub fn advance(&self, duration: Duration) {
        match self.instant.lock() {
            Ok(mut inst) => *inst += duration,
            Err(poisoned) => *poisoned.into_inner() += duration,
        }
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        match self.instant.lock() {
            Ok(inst) => *inst,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let now = clock.now();
        assert!(clock.now() >= now);
    }

    #[test]
    fn test_test_clock_advance() {
        let clock = TestClock::new();
        let t0 = clock.now();

        clock.advance(Duration::from_secs(5));

        assert_eq!(clock.now() - t0, Duration::from_secs(5));
    }

    #[test]
    fn test_test_clock_holds_still() {
        let clock = TestClock::new();
        let t0 = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.now(), t0);
    }

    #[test]
    fn test_test_clock_sleep_advances_without_blocking() {
        let clock = TestClock::new();
        let t0 = clock.now();
        let wall = Instant::now();

        clock.sleep(Duration::from_secs(3600));

        assert_eq!(clock.now() - t0, Duration::from_secs(3600));
        assert!(wall.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_clock_trait_object() {
        let clock: Arc<dyn Clock> = Arc::new(TestClock::new());
        let t0 = clock.now();
        clock.sleep(Duration::from_millis(16));
        assert_eq!(clock.now() - t0, Duration::from_millis(16));
    }
}
