//! Embassy-backed monotonic clock.

use embassy_time::Instant;
use jumpstick::Clock;

/// Milliseconds since boot from the RTC1 time driver.
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
