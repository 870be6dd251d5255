//! Status LED driver.
//!
//! Mirrors the sequencer's indicator on any `embedded-hal` output pin,
//! touching the pin only when the level actually changes.

use embedded_hal::digital::OutputPin;

pub struct StatusLed<P> {
    pin: P,
    active_low: bool,
    lit: Option<bool>,
}

impl<P: OutputPin> StatusLed<P> {
    /// LED driven high to light.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
            lit: None,
        }
    }

    /// LED sinking current into the pin (lit when driven low).
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
            lit: None,
        }
    }

    /// Light or darken the LED. Returns `Ok(true)` if the pin was written.
    pub fn show(&mut self, on: bool) -> Result<bool, P::Error> {
        if self.lit == Some(on) {
            return Ok(false);
        }
        if on != self.active_low {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.lit = Some(on);
        Ok(true)
    }

    pub fn is_lit(&self) -> bool {
        self.lit == Some(true)
    }

    pub fn release(self) -> P {
        self.pin
    }
}
