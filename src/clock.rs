//! Monotonic millisecond clock seam.
//!
//! On target this is backed by `embassy_time::Instant`; host tests drive
//! a [`ManualClock`] by hand.

/// Monotonic, non-decreasing millisecond counter.
///
/// A `u64` millisecond count does not wrap within any realistic uptime,
/// so comparisons are plain integer comparisons.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Clock that only moves when told to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub const fn starting_at(now: u64) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now = self.now.saturating_add(ms);
    }

    /// Jump to `now`. Ignored if it would move the clock backwards.
    pub fn set(&mut self, now: u64) {
        self.now = self.now.max(now);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}
