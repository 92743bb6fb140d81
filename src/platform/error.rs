//! Platform error types
//!
//! This module defines error types for platform operations.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PalError>;

/// Platform-level errors
///
/// Every PAL entry point reports failures synchronously through this type.
/// No operation retries internally; callers decide whether to try again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PalError {
    /// A required argument was absent, or the object was in a state that
    /// does not allow the requested transition (double arm, arming a timer
    /// with no callback bound, re-initializing an armed timer)
    InvalidArgs,
}

impl fmt::Display for PalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PalError::InvalidArgs => write!(f, "Invalid arguments"),
        }
    }
}
