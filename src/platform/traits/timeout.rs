//! Hardware timeout interface trait
//!
//! This module defines the single one-shot timeout the scheduler multiplexes
//! all software timers onto.

use crate::time::Timespec;

/// Hardware timeout interface trait
///
/// Platform implementations wrap one OS timer or hardware compare channel.
/// When the timeout expires, the platform must call
/// [`TimerScheduler::dispatch`](crate::timer::TimerScheduler::dispatch) with
/// the current time.
///
/// # Safety Invariants
///
/// - Only one deadline is pending at a time; `arm_at` replaces any earlier one
/// - Firing late is acceptable, firing early is tolerated by the scheduler
/// - A deadline already in the past must fire as soon as possible
pub trait TimeoutDriver {
    /// Arm the timeout to fire at an absolute monotonic deadline
    ///
    /// # Arguments
    ///
    /// * `deadline` - Absolute time on the same clock the scheduler is
    ///   dispatched with
    fn arm_at(&self, deadline: Timespec);

    /// Cancel the pending timeout, if any
    ///
    /// Canceling a disarmed timeout is a no-op.
    fn cancel(&self);
}
