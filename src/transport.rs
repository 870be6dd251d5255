//! HID transport seam and the single poll-cycle driver.
//!
//! On target the report task talks to `embassy-usb` directly; this trait
//! describes the same contract synchronously so the whole loop can be
//! exercised on the host.

use crate::clock::Clock;
use crate::hid::{JoystickReport, OUTPUT_REPORT_SIZE};
use crate::schedule::Divider;
use crate::sequencer::Sequencer;

pub trait Transport {
    /// `true` when the host will accept the next IN report.
    fn poll_ready(&mut self) -> bool;

    /// Deliver one report. Called at most once per cycle, only after
    /// `poll_ready()` returned `true`.
    fn send(&mut self, report: &JoystickReport);

    /// Copy one pending OUT report into `buf`, returning its length.
    fn receive_pending(&mut self, buf: &mut [u8]) -> Option<usize>;
}

/// Run one iteration of the report loop.
///
/// Drains (and discards) one inbound report when `out_drain` is due, then
/// evaluates the sequencer and sends the result if the host is ready.
/// Returns the report that was sent, if any.
pub fn service<C, T>(
    sequencer: &mut Sequencer<'_>,
    clock: &C,
    transport: &mut T,
    out_drain: &mut Divider,
) -> Option<JoystickReport>
where
    C: Clock + ?Sized,
    T: Transport + ?Sized,
{
    if out_drain.due() {
        let mut buf = [0u8; OUTPUT_REPORT_SIZE];
        let _ = transport.receive_pending(&mut buf);
    }

    if !transport.poll_ready() {
        return None;
    }

    let report = sequencer.tick(clock);
    transport.send(&report);
    Some(report)
}
