//! Timer objects
//!
//! A [`Timer`] is caller-owned storage for one logical timer. The scheduler
//! links armed timers into its ordered list by reference, so a timer must
//! live for `'static` (typically a `static` item) and is identified by its
//! address.
//!
//! Arming a timer binds it to that scheduler until it is initialized or
//! deinitialized again through the same scheduler. Other schedulers reject it
//! in the meantime, since its links may still belong to the first one's list.

use core::cell::Cell;
use core::fmt;
use core::ptr;

use crate::time::Timespec;

/// Expiry callback
///
/// Invoked outside the scheduler's critical region with the argument bound
/// at init time and the timer that fired. The callback may arm, cancel or
/// deinitialize any timer, including `originator`.
pub type TimerCallback = fn(arg: CallbackArg, originator: &'static Timer);

/// Opaque argument passed through to a [`TimerCallback`] unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackArg(*const ());

impl CallbackArg {
    /// No argument
    pub const NONE: Self = Self(ptr::null());

    /// Wrap a reference to a static context
    pub fn from_ref<T>(value: &'static T) -> Self {
        Self(value as *const T as *const ())
    }

    /// Wrap a raw pointer, e.g. one handed in from the Sidewalk stack
    pub const fn from_ptr(ptr: *const ()) -> Self {
        Self(ptr)
    }

    /// The wrapped pointer
    pub const fn as_ptr(self) -> *const () {
        self.0
    }

    /// Returns true if no argument was bound
    pub fn is_none(self) -> bool {
        self.0.is_null()
    }

    /// Recover the context reference
    ///
    /// # Safety
    ///
    /// The argument must have been created by [`CallbackArg::from_ref`] with
    /// the same `T`, or from a pointer to a live `T` that outlives all uses.
    pub unsafe fn as_ref<T>(self) -> Option<&'static T> {
        (self.0 as *const T).as_ref()
    }
}

impl Default for CallbackArg {
    fn default() -> Self {
        Self::NONE
    }
}

/// Scheduling class of an armed timer
///
/// Recorded on every arm. The scheduler does not order or coalesce by
/// class yet: ties are broken by insertion order and the hardware timeout
/// always follows the earliest deadline of either class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PriorityClass {
    /// Fire as close to the deadline as the hardware allows
    #[default]
    Precise,
    /// May be delayed or batched to save power
    LowPower,
}

/// One logical timer
///
/// All fields are cells mutated only by the scheduler while it holds its
/// critical region; the link fields belong to the scheduler while the timer
/// is armed (or queued for its callback during dispatch).
pub struct Timer {
    pub(super) callback: Cell<Option<TimerCallback>>,
    pub(super) arg: Cell<CallbackArg>,
    pub(super) deadline: Cell<Timespec>,
    pub(super) period: Cell<Timespec>,
    pub(super) class: Cell<PriorityClass>,
    pub(super) armed: Cell<bool>,
    pub(super) prev: Cell<Option<&'static Timer>>,
    pub(super) next: Cell<Option<&'static Timer>>,
    /// Next timer whose callback is pending in the current dispatch pass
    pub(super) fired_next: Cell<Option<&'static Timer>>,
    /// Identity of the scheduler that last armed this timer, null if none
    pub(super) owner: Cell<*const ()>,
}

// Safety: every field access goes through a TimerScheduler method that holds
// the critical region of the scheduler owning the timer. Schedulers refuse
// timers owned by another scheduler, and Debug reads no fields.
unsafe impl Sync for Timer {}

impl Timer {
    /// Create an uninitialized, disarmed timer
    ///
    /// This is a const fn, allowing static initialization.
    pub const fn new() -> Self {
        Self {
            callback: Cell::new(None),
            arg: Cell::new(CallbackArg::NONE),
            deadline: Cell::new(Timespec::ZERO),
            period: Cell::new(Timespec::ZERO),
            class: Cell::new(PriorityClass::Precise),
            armed: Cell::new(false),
            prev: Cell::new(None),
            next: Cell::new(None),
            fired_next: Cell::new(None),
            owner: Cell::new(ptr::null()),
        }
    }

    pub(super) fn is_periodic(&self) -> bool {
        !self.period.get().is_zero()
    }

    /// Returns true if a scheduler other than `scheduler` owns this timer
    pub(super) fn is_owned_by_other(&self, scheduler: *const ()) -> bool {
        let owner = self.owner.get();
        !owner.is_null() && !ptr::eq(owner, scheduler)
    }

    /// Reset binding, schedule and ownership; the fired link is left to dispatch
    pub(super) fn reset(&self, callback: Option<TimerCallback>, arg: CallbackArg) {
        self.callback.set(callback);
        self.arg.set(arg);
        self.deadline.set(Timespec::ZERO);
        self.period.set(Timespec::ZERO);
        self.class.set(PriorityClass::Precise);
        self.armed.set(false);
        self.prev.set(None);
        self.next.set(None);
        self.owner.set(ptr::null());
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Timer {
    // Only the address: the cells may be mid-update under a scheduler's
    // critical region. Use the scheduler's queries for the state.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("addr", &(self as *const Timer))
            .finish_non_exhaustive()
    }
}
