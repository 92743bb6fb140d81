//! Time source traits
//!
//! This module provides the monotonic clock abstractions consumed by the
//! timer core and the uptime provider.

use crate::time::Timespec;

/// Monotonic clock in seconds + nanoseconds
///
/// # Safety Invariants
///
/// - Monotonic (never goes backwards)
/// - Unaffected by wall-clock adjustments
/// - Infallible
pub trait ClockSource {
    /// Returns the current monotonic time
    fn now(&self) -> Timespec;
}

/// Raw monotonic counter in nanoseconds since boot
///
/// This is what RTOS kernels and HALs usually expose; [`Uptime`](crate::uptime::Uptime)
/// turns it into a [`ClockSource`].
pub trait UptimeCounter {
    /// Returns nanoseconds elapsed since platform initialization
    fn uptime_ns(&self) -> u64;
}
