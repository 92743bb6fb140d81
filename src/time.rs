//! Seconds + nanoseconds time values
//!
//! `Timespec` is the time representation shared by the Sidewalk stack, the
//! uptime provider and the timer scheduler. Values are always normalized:
//! the nanosecond field stays below one second, so the derived ordering on
//! `(sec, nsec)` is the chronological ordering.

use core::fmt;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Nanoseconds per second
pub const NSEC_PER_SEC: u32 = 1_000_000_000;

/// Nanoseconds per millisecond
pub const NSEC_PER_MSEC: u32 = 1_000_000;

/// Nanoseconds per microsecond
pub const NSEC_PER_USEC: u32 = 1_000;

/// Monotonic time value in seconds and nanoseconds
///
/// # Example
///
/// ```
/// use sid_pal::time::Timespec;
///
/// let a = Timespec::new(1, 900_000_000);
/// let b = Timespec::from_millis(200);
/// assert_eq!(a + b, Timespec::new(2, 100_000_000));
/// assert!(a < a + b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timespec {
    sec: u32,
    nsec: u32,
}

impl Timespec {
    /// The zero time value
    pub const ZERO: Self = Self { sec: 0, nsec: 0 };

    /// The largest representable time value
    pub const MAX: Self = Self {
        sec: u32::MAX,
        nsec: NSEC_PER_SEC - 1,
    };

    /// Create a time value, carrying excess nanoseconds into seconds
    ///
    /// Seconds saturate at `u32::MAX` if the carry would overflow.
    pub const fn new(sec: u32, nsec: u32) -> Self {
        let carry = nsec / NSEC_PER_SEC;
        let nsec = nsec % NSEC_PER_SEC;
        match sec.checked_add(carry) {
            Some(sec) => Self { sec, nsec },
            None => Self::MAX,
        }
    }

    /// Create a time value from whole seconds
    pub const fn from_secs(sec: u32) -> Self {
        Self { sec, nsec: 0 }
    }

    /// Create a time value from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self::from_nanos(ms.saturating_mul(NSEC_PER_MSEC as u64))
    }

    /// Create a time value from microseconds
    pub const fn from_micros(us: u64) -> Self {
        Self::from_nanos(us.saturating_mul(NSEC_PER_USEC as u64))
    }

    /// Create a time value from nanoseconds
    ///
    /// The seconds part is truncated to 32 bits, matching a free-running
    /// 32-bit seconds counter. This only matters past ~136 years of uptime.
    pub const fn from_nanos(ns: u64) -> Self {
        Self {
            sec: (ns / NSEC_PER_SEC as u64) as u32,
            nsec: (ns % NSEC_PER_SEC as u64) as u32,
        }
    }

    /// Whole seconds
    pub const fn secs(&self) -> u32 {
        self.sec
    }

    /// Sub-second nanoseconds, always below one second
    pub const fn subsec_nanos(&self) -> u32 {
        self.nsec
    }

    /// Returns true for the zero time value
    pub const fn is_zero(&self) -> bool {
        self.sec == 0 && self.nsec == 0
    }

    /// Total nanoseconds
    pub const fn as_nanos(&self) -> u64 {
        self.sec as u64 * NSEC_PER_SEC as u64 + self.nsec as u64
    }

    /// Total milliseconds, rounded down
    pub const fn as_millis(&self) -> u64 {
        self.sec as u64 * 1000 + (self.nsec / NSEC_PER_MSEC) as u64
    }

    /// Addition returning `None` if the seconds field would overflow
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        let mut nsec = self.nsec + rhs.nsec;
        let mut carry = 0;
        if nsec >= NSEC_PER_SEC {
            nsec -= NSEC_PER_SEC;
            carry = 1;
        }
        let sec = match self.sec.checked_add(rhs.sec) {
            Some(sec) => sec,
            None => return None,
        };
        match sec.checked_add(carry) {
            Some(sec) => Some(Self { sec, nsec }),
            None => None,
        }
    }

    /// Addition clamping at [`Timespec::MAX`]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        match self.checked_add(rhs) {
            Some(sum) => sum,
            None => Self::MAX,
        }
    }

    /// Subtraction clamping at [`Timespec::ZERO`]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        if self.sec < rhs.sec || (self.sec == rhs.sec && self.nsec <= rhs.nsec) {
            return Self::ZERO;
        }
        if self.nsec >= rhs.nsec {
            Self {
                sec: self.sec - rhs.sec,
                nsec: self.nsec - rhs.nsec,
            }
        } else {
            Self {
                sec: self.sec - rhs.sec - 1,
                nsec: self.nsec + NSEC_PER_SEC - rhs.nsec,
            }
        }
    }
}

impl Add for Timespec {
    type Output = Self;

    /// Saturating addition
    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl Sub for Timespec {
    type Output = Self;

    /// Saturating subtraction
    fn sub(self, rhs: Self) -> Self {
        self.saturating_sub(rhs)
    }
}

impl From<Duration> for Timespec {
    /// Seconds beyond `u32::MAX` saturate to [`Timespec::MAX`]
    fn from(d: Duration) -> Self {
        match u32::try_from(d.as_secs()) {
            Ok(sec) => Self {
                sec,
                nsec: d.subsec_nanos(),
            },
            Err(_) => Self::MAX,
        }
    }
}

impl From<Timespec> for Duration {
    fn from(t: Timespec) -> Self {
        Duration::new(t.sec as u64, t.nsec)
    }
}

impl fmt::Display for Timespec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.sec, self.nsec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_nanoseconds() {
        let t = Timespec::new(1, 2_500_000_000);
        assert_eq!(t.secs(), 3);
        assert_eq!(t.subsec_nanos(), 500_000_000);
    }

    #[test]
    fn new_saturates_on_carry_overflow() {
        assert_eq!(Timespec::new(u32::MAX, NSEC_PER_SEC), Timespec::MAX);
    }

    #[test]
    fn unit_constructors() {
        assert_eq!(Timespec::from_secs(5), Timespec::new(5, 0));
        assert_eq!(Timespec::from_millis(1_250), Timespec::new(1, 250_000_000));
        assert_eq!(Timespec::from_micros(50), Timespec::new(0, 50 * NSEC_PER_USEC));
        assert_eq!(
            Timespec::from_nanos(10 * NSEC_PER_SEC as u64 + 100),
            Timespec::new(10, 100)
        );
    }

    #[test]
    fn from_nanos_truncates_seconds_to_32_bits() {
        let t = Timespec::from_nanos(u64::MAX);
        assert_eq!(t.secs(), (u64::MAX / NSEC_PER_SEC as u64) as u32);
        assert_eq!(t.subsec_nanos(), (u64::MAX % NSEC_PER_SEC as u64) as u32);
    }

    #[test]
    fn add_carries_into_seconds() {
        let a = Timespec::new(0, 999_999_999);
        let b = Timespec::new(0, 1);
        assert_eq!(a + b, Timespec::new(1, 0));

        let a = Timespec::new(2, 600_000_000);
        let b = Timespec::new(3, 700_000_000);
        assert_eq!(a + b, Timespec::new(6, 300_000_000));
    }

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(Timespec::MAX.checked_add(Timespec::new(0, 1)), None);
        assert_eq!(
            Timespec::new(u32::MAX - 1, 500_000_000).checked_add(Timespec::new(0, 600_000_000)),
            Some(Timespec::new(u32::MAX, 100_000_000))
        );
        assert_eq!(Timespec::MAX + Timespec::from_secs(1), Timespec::MAX);
    }

    #[test]
    fn sub_borrows_from_seconds() {
        let a = Timespec::new(3, 100);
        let b = Timespec::new(1, 200);
        assert_eq!(a - b, Timespec::new(1, 999_999_900));
    }

    #[test]
    fn sub_saturates_at_zero() {
        let a = Timespec::new(1, 0);
        let b = Timespec::new(1, 1);
        assert_eq!(a - b, Timespec::ZERO);
        assert_eq!(a - a, Timespec::ZERO);
    }

    #[test]
    fn ordering_across_second_boundary() {
        let a = Timespec::new(0, 999_999_999);
        let b = Timespec::new(1, 0);
        assert!(a < b);
        assert!(Timespec::new(1, 5) > Timespec::new(1, 4));
        assert_eq!(Timespec::from_millis(1000), Timespec::from_secs(1));
    }

    #[test]
    fn conversions() {
        let t = Timespec::new(2, 345_678_901);
        assert_eq!(t.as_nanos(), 2_345_678_901);
        assert_eq!(t.as_millis(), 2_345);
        assert!(Timespec::ZERO.is_zero());
        assert!(!t.is_zero());

        let d: Duration = t.into();
        assert_eq!(d, Duration::new(2, 345_678_901));
        assert_eq!(Timespec::from(d), t);
        assert_eq!(Timespec::from(Duration::from_secs(u64::MAX)), Timespec::MAX);
    }

    #[test]
    fn display_pads_nanoseconds() {
        assert_eq!(format!("{}", Timespec::new(3, 50_000)), "3.000050000");
    }
}
