//! Mock hardware timeout implementation for testing

use core::cell::{Cell, RefCell};

use heapless::Vec;

use crate::platform::traits::TimeoutDriver;
use crate::time::Timespec;

/// Number of driver calls kept in the history
pub const HISTORY_CAPACITY: usize = 64;

/// One call made on the mock driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutEvent {
    /// `arm_at` with the given deadline
    Armed(Timespec),
    /// `cancel`
    Canceled,
}

/// Mock hardware timeout
///
/// Never fires on its own. Tests read back the pending deadline and drive
/// `TimerScheduler::dispatch` themselves.
#[derive(Debug, Default)]
pub struct MockTimeoutDriver {
    pending: Cell<Option<Timespec>>,
    arm_count: Cell<u32>,
    cancel_count: Cell<u32>,
    history: RefCell<Vec<TimeoutEvent, HISTORY_CAPACITY>>,
}

impl MockTimeoutDriver {
    /// Create a disarmed mock timeout
    pub const fn new() -> Self {
        Self {
            pending: Cell::new(None),
            arm_count: Cell::new(0),
            cancel_count: Cell::new(0),
            history: RefCell::new(Vec::new()),
        }
    }

    /// Deadline the timeout is currently armed for
    pub fn pending(&self) -> Option<Timespec> {
        self.pending.get()
    }

    /// Number of `arm_at` calls
    pub fn arm_count(&self) -> u32 {
        self.arm_count.get()
    }

    /// Number of `cancel` calls
    pub fn cancel_count(&self) -> u32 {
        self.cancel_count.get()
    }

    /// Calls recorded since creation or the last clear, oldest first
    ///
    /// Calls beyond [`HISTORY_CAPACITY`] are counted but not recorded.
    pub fn history(&self) -> Vec<TimeoutEvent, HISTORY_CAPACITY> {
        self.history.borrow().clone()
    }

    /// Forget recorded calls and reset the counters
    pub fn clear_history(&self) {
        self.history.borrow_mut().clear();
        self.arm_count.set(0);
        self.cancel_count.set(0);
    }

    fn record(&self, event: TimeoutEvent) {
        let _ = self.history.borrow_mut().push(event);
    }
}

impl TimeoutDriver for MockTimeoutDriver {
    fn arm_at(&self, deadline: Timespec) {
        self.pending.set(Some(deadline));
        self.arm_count.set(self.arm_count.get() + 1);
        self.record(TimeoutEvent::Armed(deadline));
    }

    fn cancel(&self) {
        self.pending.set(None);
        self.cancel_count.set(self.cancel_count.get() + 1);
        self.record(TimeoutEvent::Canceled);
    }
}
