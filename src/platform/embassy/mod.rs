//! Embassy platform implementation
//!
//! Adapters from the Embassy time driver to the PAL traits. The hardware
//! timeout itself stays with the board crate, since Embassy exposes alarms
//! only through its own time driver.

use crate::platform::traits::UptimeCounter;

/// Uptime counter backed by `embassy_time::Instant`
///
/// Resolution is whatever tick rate the Embassy time driver is built with;
/// the value is scaled to nanoseconds via microseconds.
///
/// # Example
///
/// ```ignore
/// use sid_pal::platform::embassy::EmbassyUptimeCounter;
/// use sid_pal::Uptime;
///
/// static UPTIME: Uptime<EmbassyUptimeCounter> = Uptime::new(EmbassyUptimeCounter);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyUptimeCounter;

impl UptimeCounter for EmbassyUptimeCounter {
    fn uptime_ns(&self) -> u64 {
        embassy_time::Instant::now().as_micros().saturating_mul(1_000)
    }
}
