//! Monotonic uptime provider
//!
//! Wraps a platform nanosecond counter and exposes it as a [`ClockSource`] in
//! the `Timespec` representation the Sidewalk stack works with. It also keeps
//! the crystal drift estimate the stack uses to widen its receive windows.

use core::sync::atomic::{AtomicI16, Ordering};

use crate::platform::traits::{ClockSource, UptimeCounter};
use crate::time::Timespec;

/// Crystal drift reported before anyone calibrates it
pub const DEFAULT_XTAL_PPM: i16 = 0;

/// Uptime clock over a platform nanosecond counter
///
/// # Example
///
/// ```ignore
/// use sid_pal::platform::mock::MockUptimeCounter;
/// use sid_pal::platform::ClockSource;
/// use sid_pal::Uptime;
///
/// let uptime = Uptime::new(MockUptimeCounter::with_initial(1_000_000_010));
/// assert_eq!(uptime.now().secs(), 1);
/// assert_eq!(uptime.now().subsec_nanos(), 10);
/// ```
#[derive(Debug)]
pub struct Uptime<C: UptimeCounter> {
    counter: C,
    xtal_ppm: AtomicI16,
}

impl<C: UptimeCounter> Uptime<C> {
    /// Create an uptime clock over `counter`
    ///
    /// This is a const fn, allowing static initialization.
    pub const fn new(counter: C) -> Self {
        Self {
            counter,
            xtal_ppm: AtomicI16::new(DEFAULT_XTAL_PPM),
        }
    }

    /// Borrow the underlying counter
    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// Current crystal drift estimate in parts per million
    pub fn xtal_ppm(&self) -> i16 {
        self.xtal_ppm.load(Ordering::Relaxed)
    }

    /// Store a new crystal drift estimate in parts per million
    pub fn set_xtal_ppm(&self, ppm: i16) {
        self.xtal_ppm.store(ppm, Ordering::Relaxed);
    }
}

impl<C: UptimeCounter> ClockSource for Uptime<C> {
    fn now(&self) -> Timespec {
        Timespec::from_nanos(self.counter.uptime_ns())
    }
}
