//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use sid_pal::platform::mock::{MockCriticalRegion, MockTimeoutDriver};
//! use sid_pal::TimerScheduler;
//!
//! let scheduler = TimerScheduler::new(MockCriticalRegion::new(), MockTimeoutDriver::new());
//! assert_eq!(scheduler.next_deadline(), None);
//! ```

#![cfg(any(test, feature = "mock"))]

mod clock;
mod critical;
mod timeout;

pub use clock::MockUptimeCounter;
pub use critical::MockCriticalRegion;
pub use timeout::{MockTimeoutDriver, TimeoutEvent, HISTORY_CAPACITY};
