//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod clock;
pub mod critical;
pub mod timeout;

// Re-export trait interfaces
pub use clock::{ClockSource, UptimeCounter};
pub use critical::{CriticalGuard, CriticalRegion};
pub use timeout::TimeoutDriver;
