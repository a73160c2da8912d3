//! Wall-clock abstraction so countdown and staleness logic is testable.

/// Source of the current unix timestamp in seconds.
pub trait TimeSource: Send + Sync + 'static {
    fn now_unix(&self) -> u64;
}

/// Production time source backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_unix(&self) -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

/// Shared, manually advanced time source for tests.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone)]
pub struct SharedMockTimeSource {
    now: std::sync::Arc<parking_lot::Mutex<u64>>,
}

#[cfg(any(test, feature = "testing"))]
impl SharedMockTimeSource {
    pub fn new(start: u64) -> Self {
        Self {
            now: std::sync::Arc::new(parking_lot::Mutex::new(start)),
        }
    }

    pub fn advance(&self, seconds: u64) {
        *self.now.lock() += seconds;
    }

    pub fn set(&self, now: u64) {
        *self.now.lock() = now;
    }
}

#[cfg(any(test, feature = "testing"))]
impl TimeSource for SharedMockTimeSource {
    fn now_unix(&self) -> u64 {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_time_advances() {
        let time = SharedMockTimeSource::new(1_000);
        assert_eq!(time.now_unix(), 1_000);
        time.advance(61);
        assert_eq!(time.now_unix(), 1_061);
        let clone = time.clone();
        clone.set(2_000);
        assert_eq!(time.now_unix(), 2_000);
    }

    #[test]
    fn test_system_time_is_recent() {
        // Sanity bound: after 2020-01-01, before 2100
        let now = SystemTimeSource.now_unix();
        assert!(now > 1_577_836_800);
        assert!(now < 4_102_444_800);
    }
}
