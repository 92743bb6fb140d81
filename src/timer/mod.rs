//! Software timers
//!
//! Any number of one-shot or periodic [`Timer`]s multiplexed onto a single
//! hardware timeout by a [`TimerScheduler`].

mod list;
mod object;
mod scheduler;

pub use object::{CallbackArg, PriorityClass, Timer, TimerCallback};
pub use scheduler::TimerScheduler;
