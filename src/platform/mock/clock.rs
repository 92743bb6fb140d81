//! Mock uptime counter implementation for testing

use core::cell::Cell;

use crate::platform::traits::UptimeCounter;

/// Mock uptime counter with controllable time advancement
///
/// Wrap it in [`Uptime`](crate::uptime::Uptime) to get a `ClockSource`.
#[derive(Debug, Default)]
pub struct MockUptimeCounter {
    current_ns: Cell<u64>,
}

impl MockUptimeCounter {
    /// Creates a new counter starting at time 0
    pub const fn new() -> Self {
        Self {
            current_ns: Cell::new(0),
        }
    }

    /// Creates a new counter starting at the specified time
    pub const fn with_initial(ns: u64) -> Self {
        Self {
            current_ns: Cell::new(ns),
        }
    }

    /// Sets the current time to an absolute value
    pub fn set(&self, ns: u64) {
        self.current_ns.set(ns);
    }

    /// Advances the current time by the specified amount
    pub fn advance(&self, ns: u64) {
        self.current_ns.set(self.current_ns.get().saturating_add(ns));
    }
}

impl UptimeCounter for MockUptimeCounter {
    fn uptime_ns(&self) -> u64 {
        self.current_ns.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_counter_initial_value() {
        assert_eq!(MockUptimeCounter::new().uptime_ns(), 0);
        assert_eq!(MockUptimeCounter::with_initial(42).uptime_ns(), 42);
    }

    #[test]
    fn test_mock_counter_set_and_advance() {
        let counter = MockUptimeCounter::new();
        counter.set(1_000);
        counter.advance(500);
        assert_eq!(counter.uptime_ns(), 1_500);

        counter.advance(u64::MAX);
        assert_eq!(counter.uptime_ns(), u64::MAX);
    }
}
