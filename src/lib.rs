#![cfg_attr(not(test), no_std)]

//! sid_pal - Sidewalk platform abstraction layer
//!
//! This library provides the timer subsystem the Sidewalk stack expects from its
//! platform: an ordered software scheduler for any number of logical timers,
//! multiplexed onto a single hardware timeout.

// Logging macros must be defined before the modules that use them
#[macro_use]
pub mod logging;

// Platform abstraction layer (trait seams, mocks, platform implementations)
pub mod platform;

// Seconds + nanoseconds time values
pub mod time;

// Software timer scheduler
pub mod timer;

// Monotonic uptime provider
pub mod uptime;

pub use platform::{PalError, Result};
pub use time::Timespec;
pub use timer::{CallbackArg, PriorityClass, Timer, TimerCallback, TimerScheduler};
pub use uptime::Uptime;
