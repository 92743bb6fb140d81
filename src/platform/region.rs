//! Critical region backed by the `critical-section` crate
//!
//! On embedded targets the HAL or RTOS binding provides the global
//! critical-section implementation (interrupt masking on single-core parts,
//! a spinlock plus masking on multi-core parts). Host tests link the `std`
//! implementation.

use super::traits::CriticalRegion;

/// Critical region using the global `critical-section` implementation
///
/// This is the region production builds hand to
/// [`TimerScheduler`](crate::timer::TimerScheduler). It is zero-sized, so the
/// scheduler can live in a `static`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalSectionRegion;

impl CriticalSectionRegion {
    /// Create a new region handle
    pub const fn new() -> Self {
        Self
    }
}

impl CriticalRegion for CriticalSectionRegion {
    type Restore = ::critical_section::RestoreState;

    fn enter(&self) -> Self::Restore {
        // Safety: the matching release happens in `exit`, which the
        // CriticalRegion contract pairs with this call.
        unsafe { ::critical_section::acquire() }
    }

    unsafe fn exit(&self, restore: Self::Restore) {
        ::critical_section::release(restore)
    }
}
