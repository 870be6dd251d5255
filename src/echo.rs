//! Report echo buffer.
//!
//! Every freshly computed report is repeated verbatim for a fixed number
//! of polls, so a host sampling faster than the sequencer's logical step
//! cannot miss a step that falls between two of its samples.

use crate::hid::JoystickReport;

#[derive(Clone, Copy, Debug)]
pub struct EchoBuffer {
    last: JoystickReport,
    remaining: u8,
    echoes: u8,
}

impl EchoBuffer {
    /// Buffer that repeats each armed report `echoes` times.
    pub const fn new(echoes: u8) -> Self {
        Self {
            last: JoystickReport::neutral(),
            remaining: 0,
            echoes,
        }
    }

    /// Store a freshly computed report and restart the countdown.
    pub fn arm(&mut self, report: JoystickReport) {
        self.last = report;
        self.remaining = self.echoes;
    }

    /// Consume one echo, if any are pending.
    pub fn replay(&mut self) -> Option<JoystickReport> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.last)
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Most recently armed report.
    pub fn last(&self) -> &JoystickReport {
        &self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::Buttons;

    fn pressed_b() -> JoystickReport {
        JoystickReport {
            buttons: Buttons::B,
            ..JoystickReport::neutral()
        }
    }

    #[test]
    fn fresh_buffer_has_nothing_to_replay() {
        let mut echo = EchoBuffer::new(2);
        assert_eq!(echo.remaining(), 0);
        assert!(echo.replay().is_none());
        assert!(echo.last().is_neutral());
    }

    #[test]
    fn armed_report_replays_exactly_n_times() {
        let mut echo = EchoBuffer::new(2);
        echo.arm(pressed_b());

        assert_eq!(echo.replay(), Some(pressed_b()));
        assert_eq!(echo.replay(), Some(pressed_b()));
        assert_eq!(echo.replay(), None);
        assert_eq!(echo.remaining(), 0);
    }

    #[test]
    fn rearming_restarts_countdown() {
        let mut echo = EchoBuffer::new(2);
        echo.arm(pressed_b());
        echo.replay();
        echo.arm(JoystickReport::neutral());

        assert_eq!(echo.remaining(), 2);
        assert_eq!(echo.replay(), Some(JoystickReport::neutral()));
    }

    #[test]
    fn zero_echoes_never_replays() {
        let mut echo = EchoBuffer::new(0);
        echo.arm(pressed_b());
        assert!(echo.replay().is_none());
        assert_eq!(echo.last(), &pressed_b());
    }
}
