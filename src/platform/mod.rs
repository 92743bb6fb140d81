//! Platform abstraction layer
//!
//! This module holds the seams between the timer core and the platform it runs
//! on. All platform-specific code must be isolated to this module.

pub mod error;
pub mod region;
pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "embassy")]
pub mod embassy;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PalError, Result};
pub use region::CriticalSectionRegion;
pub use traits::{ClockSource, CriticalGuard, CriticalRegion, TimeoutDriver, UptimeCounter};
