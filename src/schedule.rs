//! Fixed-ratio divider for the slower periodic tasks.
//!
//! The report loop is the fast task; work that only needs to happen every
//! Nth report iteration (draining the OUT endpoint, housekeeping) asks a
//! [`Divider`] whether it is due.

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Divider {
    every: u32,
    count: u32,
}

impl Divider {
    /// Divider that fires once every `every` calls. Zero behaves like one.
    pub const fn new(every: u32) -> Self {
        Self {
            every: if every == 0 { 1 } else { every },
            count: 0,
        }
    }

    /// Returns `true` on the first call and then once every `every` calls.
    pub fn due(&mut self) -> bool {
        let due = self.count == 0;
        self.count += 1;
        if self.count >= self.every {
            self.count = 0;
        }
        due
    }
}
