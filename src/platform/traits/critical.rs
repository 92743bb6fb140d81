//! Critical region interface trait
//!
//! This module defines the mutual-exclusion primitive the timer core uses to
//! stay consistent with the hardware timeout interrupt.

/// Critical region interface trait
///
/// Platform implementations must provide mutual exclusion against the single
/// interrupt context that runs timer dispatch.
///
/// # Safety Invariants
///
/// - Every `enter` is paired with exactly one `exit`, in LIFO order
/// - The timer core never nests its own acquisitions, so implementations only
///   need to support the depth the caller itself adds on top
pub trait CriticalRegion {
    /// State captured on entry and handed back on exit
    ///
    /// Typically the interrupt mask that was active before entry.
    type Restore: Copy;

    /// Enter the critical region
    fn enter(&self) -> Self::Restore;

    /// Leave the critical region
    ///
    /// # Safety
    ///
    /// `restore` must be the value returned by the matching `enter` call, and
    /// all regions entered after it must already have been exited.
    unsafe fn exit(&self, restore: Self::Restore);

    /// Enter the critical region and return a guard that exits it on drop
    ///
    /// Prefer this over manual `enter`/`exit` pairs: the guard releases the
    /// region on every exit path, including early error returns.
    fn lock(&self) -> CriticalGuard<'_, Self>
    where
        Self: Sized,
    {
        CriticalGuard::new(self)
    }
}

/// RAII guard for a [`CriticalRegion`] acquisition
#[must_use = "the critical region is released as soon as the guard is dropped"]
pub struct CriticalGuard<'a, R: CriticalRegion> {
    region: &'a R,
    restore: R::Restore,
}

impl<'a, R: CriticalRegion> CriticalGuard<'a, R> {
    /// Enter `region` and hold it until the guard is dropped
    pub fn new(region: &'a R) -> Self {
        let restore = region.enter();
        Self { region, restore }
    }
}

impl<R: CriticalRegion> Drop for CriticalGuard<'_, R> {
    fn drop(&mut self) {
        // Safety: `restore` came from the `enter` in `new`, and guards borrow
        // the region so they are dropped in reverse acquisition order.
        unsafe { self.region.exit(self.restore) }
    }
}
