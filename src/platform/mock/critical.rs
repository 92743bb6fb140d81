//! Mock critical region implementation for testing

use core::cell::Cell;

use crate::platform::traits::CriticalRegion;

/// Mock critical region
///
/// Does not mask anything; it only counts acquisitions so tests can check
/// that every `enter` is balanced by an `exit` and that the timer core never
/// nests the region.
#[derive(Debug, Default)]
pub struct MockCriticalRegion {
    depth: Cell<u32>,
    max_depth: Cell<u32>,
    enter_count: Cell<u32>,
    exit_count: Cell<u32>,
}

impl MockCriticalRegion {
    /// Create a new mock region with all counters at zero
    pub const fn new() -> Self {
        Self {
            depth: Cell::new(0),
            max_depth: Cell::new(0),
            enter_count: Cell::new(0),
            exit_count: Cell::new(0),
        }
    }

    /// Current nesting depth
    pub fn depth(&self) -> u32 {
        self.depth.get()
    }

    /// Deepest nesting observed since creation or the last reset
    pub fn max_depth(&self) -> u32 {
        self.max_depth.get()
    }

    /// Number of `enter` calls
    pub fn enter_count(&self) -> u32 {
        self.enter_count.get()
    }

    /// Number of `exit` calls
    pub fn exit_count(&self) -> u32 {
        self.exit_count.get()
    }

    /// Returns true when every enter has been matched by an exit
    pub fn is_balanced(&self) -> bool {
        self.depth.get() == 0 && self.enter_count.get() == self.exit_count.get()
    }

    /// Reset the counters (the current depth is kept)
    pub fn reset_counts(&self) {
        self.max_depth.set(self.depth.get());
        self.enter_count.set(0);
        self.exit_count.set(0);
    }
}

impl CriticalRegion for MockCriticalRegion {
    /// Depth before entry
    type Restore = u32;

    fn enter(&self) -> u32 {
        let previous = self.depth.get();
        let depth = previous + 1;
        self.depth.set(depth);
        if depth > self.max_depth.get() {
            self.max_depth.set(depth);
        }
        self.enter_count.set(self.enter_count.get() + 1);
        previous
    }

    unsafe fn exit(&self, restore: u32) {
        debug_assert_eq!(
            self.depth.get(),
            restore + 1,
            "critical region exited out of order"
        );
        self.depth.set(restore);
        self.exit_count.set(self.exit_count.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_region_counts_guarded_scopes() {
        let region = MockCriticalRegion::new();
        {
            let _guard = region.lock();
            assert_eq!(region.depth(), 1);
        }
        assert_eq!(region.depth(), 0);
        assert_eq!(region.enter_count(), 1);
        assert_eq!(region.exit_count(), 1);
        assert!(region.is_balanced());
    }

    #[test]
    fn test_mock_region_tracks_nesting() {
        let region = MockCriticalRegion::new();
        {
            let _outer = region.lock();
            let _inner = region.lock();
            assert_eq!(region.depth(), 2);
        }
        assert_eq!(region.max_depth(), 2);
        assert!(region.is_balanced());

        region.reset_counts();
        assert_eq!(region.max_depth(), 0);
        assert_eq!(region.enter_count(), 0);
    }

    #[test]
    fn test_mock_region_guard_released_on_early_return() {
        fn guarded(region: &MockCriticalRegion, fail: bool) -> Result<u32, ()> {
            let _guard = region.lock();
            if fail {
                return Err(());
            }
            Ok(region.depth())
        }

        let region = MockCriticalRegion::new();
        assert!(guarded(&region, true).is_err());
        assert!(region.is_balanced());
        assert_eq!(guarded(&region, false), Ok(1));
        assert!(region.is_balanced());
    }
}
