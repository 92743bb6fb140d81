//! Timer scheduler
//!
//! Multiplexes any number of [`Timer`]s onto one [`TimeoutDriver`]. Armed
//! timers live in an ordered intrusive list; the hardware timeout is always
//! programmed for the head of that list.
//!
//! # Dispatch protocol
//!
//! When the hardware timeout fires the platform calls [`TimerScheduler::dispatch`]
//! with the current time. Dispatch runs in three phases:
//!
//! 1. Under the critical region, detach every expired timer into a transient
//!    fired chain and reinsert periodic ones one period after their previous
//!    deadline.
//! 2. Outside the critical region, run the callbacks in deadline order.
//!    Callbacks may arm, cancel or deinitialize any timer.
//! 3. Under the critical region, program the hardware for the new head.
//!
//! A timer armed by a callback for a time at or before `now` fires on the
//! next pass, never synchronously.

use core::cell::Cell;
use core::fmt;
use core::ptr;

use super::list::TimerList;
use super::object::{CallbackArg, PriorityClass, Timer, TimerCallback};
use crate::platform::traits::{ClockSource, CriticalRegion, TimeoutDriver};
use crate::platform::{PalError, Result};
use crate::time::Timespec;

/// Software timer scheduler over a single hardware timeout
///
/// A scheduler is identified by its address, so it must not be moved while
/// any timer it armed is still initialized. In practice it lives in a
/// `static`.
///
/// # Example
///
/// ```ignore
/// use sid_pal::platform::CriticalSectionRegion;
/// use sid_pal::{CallbackArg, PriorityClass, Timer, TimerScheduler, Timespec};
///
/// static SCHEDULER: TimerScheduler<CriticalSectionRegion, BoardTimeout> =
///     TimerScheduler::new(CriticalSectionRegion::new(), BoardTimeout::new());
/// static BEACON: Timer = Timer::new();
///
/// fn on_beacon(_arg: CallbackArg, _timer: &'static Timer) {
///     // send beacon
/// }
///
/// SCHEDULER.init(Some(&BEACON), Some(on_beacon), CallbackArg::NONE)?;
/// SCHEDULER.arm(
///     Some(&BEACON),
///     PriorityClass::Precise,
///     Some(Timespec::from_secs(5)),
///     Some(Timespec::from_secs(5)),
/// )?;
///
/// // From the board's timeout interrupt:
/// SCHEDULER.on_timeout(&UPTIME);
/// ```
pub struct TimerScheduler<R: CriticalRegion, D: TimeoutDriver> {
    region: R,
    driver: D,
    list: TimerList,
    dispatching: Cell<bool>,
}

// Safety: the list, the dispatch flag and every linked timer are only touched
// with `region` held, and `region` excludes the dispatch context.
unsafe impl<R, D> Sync for TimerScheduler<R, D>
where
    R: CriticalRegion + Sync,
    D: TimeoutDriver + Sync,
{
}

impl<R: CriticalRegion, D: TimeoutDriver> TimerScheduler<R, D> {
    /// Create a scheduler with no armed timers
    ///
    /// This is a const fn, allowing static initialization. The hardware
    /// timeout is not touched until the first timer is armed.
    pub const fn new(region: R, driver: D) -> Self {
        Self {
            region,
            driver,
            list: TimerList::new(),
            dispatching: Cell::new(false),
        }
    }

    /// The critical region guarding this scheduler
    pub fn region(&self) -> &R {
        &self.region
    }

    /// The hardware timeout this scheduler drives
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Bind a callback and argument to a timer
    ///
    /// Leaves the timer disarmed; the hardware timeout is not touched.
    ///
    /// # Errors
    ///
    /// `InvalidArgs` if `timer` or `callback` is absent, if the timer is
    /// currently armed, or if another scheduler owns it.
    pub fn init(
        &self,
        timer: Option<&'static Timer>,
        callback: Option<TimerCallback>,
        arg: CallbackArg,
    ) -> Result<()> {
        let (Some(timer), Some(callback)) = (timer, callback) else {
            return Err(PalError::InvalidArgs);
        };

        let _guard = self.region.lock();
        self.check_owner(timer)?;
        if timer.armed.get() {
            log_warn!("timer init rejected: timer is armed");
            return Err(PalError::InvalidArgs);
        }
        timer.reset(Some(callback), arg);
        Ok(())
    }

    /// Cancel a timer if armed and clear its callback binding
    ///
    /// Idempotent. Releases the timer for use with another scheduler.
    ///
    /// # Errors
    ///
    /// `InvalidArgs` if `timer` is absent or owned by another scheduler.
    pub fn deinit(&self, timer: Option<&Timer>) -> Result<()> {
        let timer = timer.ok_or(PalError::InvalidArgs)?;

        let _guard = self.region.lock();
        self.check_owner(timer)?;
        self.cancel_locked(timer);
        timer.reset(None, CallbackArg::NONE);
        Ok(())
    }

    /// Returns true if `timer` is present and armed
    pub fn is_armed(&self, timer: Option<&Timer>) -> bool {
        match timer {
            Some(timer) => {
                let _guard = self.region.lock();
                timer.armed.get()
            }
            None => false,
        }
    }

    /// Arm a timer to fire at the absolute time `when`
    ///
    /// A non-zero `period` makes the timer periodic: after each expiry it is
    /// rearmed one period after its previous deadline. If the timer becomes
    /// the earliest armed timer the hardware timeout is reprogrammed.
    ///
    /// # Errors
    ///
    /// `InvalidArgs` if `timer` or `when` is absent, if the timer is already
    /// armed (the existing arm is left untouched), if no callback is bound,
    /// or if another scheduler owns the timer.
    pub fn arm(
        &self,
        timer: Option<&'static Timer>,
        class: PriorityClass,
        when: Option<Timespec>,
        period: Option<Timespec>,
    ) -> Result<()> {
        let (Some(timer), Some(when)) = (timer, when) else {
            return Err(PalError::InvalidArgs);
        };

        let _guard = self.region.lock();
        self.check_owner(timer)?;
        if timer.armed.get() {
            log_warn!(
                "timer arm rejected: already armed for {}",
                timer.deadline.get()
            );
            return Err(PalError::InvalidArgs);
        }
        if timer.callback.get().is_none() {
            log_warn!("timer arm rejected: no callback bound");
            return Err(PalError::InvalidArgs);
        }

        timer.deadline.set(when);
        timer.period.set(period.unwrap_or(Timespec::ZERO));
        timer.class.set(class);
        timer.armed.set(true);
        timer.owner.set(self.id());
        if self.list.insert(timer) {
            self.program_hardware();
        }
        Ok(())
    }

    /// Disarm a timer
    ///
    /// Canceling a disarmed timer succeeds without effect. If the timer was
    /// the earliest armed timer the hardware timeout is moved to the next
    /// one, or canceled when none remain.
    ///
    /// # Errors
    ///
    /// `InvalidArgs` if `timer` is absent or owned by another scheduler.
    pub fn cancel(&self, timer: Option<&Timer>) -> Result<()> {
        let timer = timer.ok_or(PalError::InvalidArgs)?;

        let _guard = self.region.lock();
        self.check_owner(timer)?;
        self.cancel_locked(timer);
        Ok(())
    }

    /// Fire every timer whose deadline is at or before `now`
    ///
    /// This is the hardware timeout event callback. Early or spurious calls
    /// fire nothing and just reprogram the hardware for the real head.
    pub fn dispatch(&self, now: Timespec) {
        let fired = {
            let _guard = self.region.lock();
            if self.dispatching.get() {
                log_warn!("timer dispatch re-entered at {}, ignoring", now);
                return;
            }
            self.dispatching.set(true);
            self.collect_expired(now)
        };

        let mut cursor = fired;
        while let Some(timer) = cursor {
            let (callback, arg) = {
                let _guard = self.region.lock();
                cursor = timer.fired_next.take();
                (timer.callback.get(), timer.arg.get())
            };
            // None if an earlier callback in this pass deinitialized it
            if let Some(callback) = callback {
                callback(arg, timer);
            }
        }

        let _guard = self.region.lock();
        self.dispatching.set(false);
        self.program_hardware();
        log_trace!("timer dispatch at {} done, {} armed", now, self.list.len());
    }

    /// Read `clock` and dispatch
    pub fn on_timeout<C: ClockSource>(&self, clock: &C) {
        self.dispatch(clock.now());
    }

    /// Deadline of an armed timer
    pub fn deadline(&self, timer: Option<&Timer>) -> Option<Timespec> {
        let timer = timer?;
        let _guard = self.region.lock();
        timer.armed.get().then(|| timer.deadline.get())
    }

    /// Period of an armed periodic timer, None for one-shot or disarmed timers
    pub fn period(&self, timer: Option<&Timer>) -> Option<Timespec> {
        let timer = timer?;
        let _guard = self.region.lock();
        (timer.armed.get() && timer.is_periodic()).then(|| timer.period.get())
    }

    /// Priority class an armed timer was armed with
    pub fn priority_class(&self, timer: Option<&Timer>) -> Option<PriorityClass> {
        let timer = timer?;
        let _guard = self.region.lock();
        timer.armed.get().then(|| timer.class.get())
    }

    /// Callback argument of an initialized timer
    pub fn callback_arg(&self, timer: Option<&Timer>) -> Option<CallbackArg> {
        let timer = timer?;
        let _guard = self.region.lock();
        timer.callback.get().map(|_| timer.arg.get())
    }

    /// Returns true if a callback is bound to `timer`
    pub fn is_initialized(&self, timer: Option<&Timer>) -> bool {
        match timer {
            Some(timer) => {
                let _guard = self.region.lock();
                timer.callback.get().is_some()
            }
            None => false,
        }
    }

    /// Earliest deadline across all armed timers
    pub fn next_deadline(&self) -> Option<Timespec> {
        let _guard = self.region.lock();
        self.list.first().map(|timer| timer.deadline.get())
    }

    /// Number of armed timers
    pub fn armed_count(&self) -> usize {
        let _guard = self.region.lock();
        self.list.len()
    }

    fn id(&self) -> *const () {
        ptr::addr_of!(self.list).cast()
    }

    fn check_owner(&self, timer: &Timer) -> Result<()> {
        if timer.is_owned_by_other(self.id()) {
            log_warn!("timer rejected: owned by another scheduler");
            return Err(PalError::InvalidArgs);
        }
        Ok(())
    }

    fn cancel_locked(&self, timer: &Timer) {
        if !timer.armed.get() {
            return;
        }
        timer.armed.set(false);
        if self.list.remove(timer) {
            self.program_hardware();
        }
    }

    /// Detach expired timers into the fired chain and rearm periodic ones
    ///
    /// Periodic timers are reinserted only after the walk, so one whose next
    /// deadline is still behind `now` fires once per pass instead of looping.
    fn collect_expired(&self, now: Timespec) -> Option<&'static Timer> {
        let mut head: Option<&'static Timer> = None;
        let mut tail: Option<&'static Timer> = None;

        while let Some(timer) = self.list.pop_expired(now) {
            timer.armed.set(false);
            timer.fired_next.set(None);
            match tail {
                Some(last) => last.fired_next.set(Some(timer)),
                None => head = Some(timer),
            }
            tail = Some(timer);
        }

        let mut cursor = head;
        while let Some(timer) = cursor {
            cursor = timer.fired_next.get();
            if timer.is_periodic() {
                self.rearm_periodic(timer);
            }
        }

        head
    }

    fn rearm_periodic(&self, timer: &'static Timer) {
        let previous = timer.deadline.get();
        match previous.checked_add(timer.period.get()) {
            Some(next) => {
                timer.deadline.set(next);
                timer.armed.set(true);
                self.list.insert(timer);
            }
            None => {
                log_warn!("periodic timer stopped: deadline overflow after {}", previous);
            }
        }
    }

    /// Point the hardware timeout at the head of the list
    fn program_hardware(&self) {
        self.driver.cancel();
        if let Some(first) = self.list.first() {
            self.driver.arm_at(first.deadline.get());
        }
    }
}

impl<R: CriticalRegion, D: TimeoutDriver> fmt::Debug for TimerScheduler<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (armed, next, dispatching) = {
            let _guard = self.region.lock();
            (
                self.list.len(),
                self.list.first().map(|timer| timer.deadline.get()),
                self.dispatching.get(),
            )
        };
        f.debug_struct("TimerScheduler")
            .field("armed", &armed)
            .field("next_deadline", &next)
            .field("dispatching", &dispatching)
            .finish_non_exhaustive()
    }
}
