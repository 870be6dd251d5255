//! USB Device subsystem - presents the joystick to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. We expose a single HID interface with one interrupt IN
//! endpoint (joystick reports) and one interrupt OUT endpoint (host
//! output reports, read and discarded).
//!
//! The report task evaluates the sequencer once per IN poll and writes
//! the result to the IN endpoint.

pub mod hid_device;
