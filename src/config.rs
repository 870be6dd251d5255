//! Application-wide constants and compile-time configuration.
//!
//! Macro timings, echo behaviour, task ratios and USB identity live here
//! so they can be tuned in one place.

// Macro timing

/// Width of a single jump press (ms).
pub const BUTTON_PRESS_MS: u32 = 80;

/// Pause after each jump press (ms).
///
/// Jumps need ~0.8836 s between them; 80 ms press + 803 ms wait lands on
/// the game's input window.
pub const JUMP_WAIT_MS: u32 = 803;

/// Extra wait inserted once per lap to cancel accumulated drift (ms).
pub const DRIFT_CORRECTION_MS: u32 = 30;

/// Jump (1-based) whose trailing pause carries the drift correction.
pub const DRIFT_CORRECTION_JUMP: usize = 70;

/// Number of jumps in one lap of the default macro.
pub const JUMP_COUNT: usize = 101;

/// Pause after selecting the super jump, before the first jump (ms).
pub const SELECT_SETTLE_MS: u32 = 1410;

// Sequencer

/// Number of times every fresh report is repeated verbatim.
pub const ECHOES: u8 = 2;

/// Idle delay between evaluations once a script has finished (ms).
pub const FINISHED_IDLE_MS: u64 = 250;

// Tasking

/// Inbound OUT endpoint is drained once every this many report iterations.
pub const OUT_DRAIN_EVERY: u32 = 3;

/// Housekeeping (status LED, status log) runs once every this many
/// report iterations.
pub const HOUSEKEEPING_EVERY: u32 = 100;

// USB

/// USB VID/PID of the HORI Pokken Tournament Pro Pad, which the console
/// accepts as a wired controller.
pub const USB_VID: u16 = 0x0F0D;
pub const USB_PID: u16 = 0x0092;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "HORI CO.,LTD.";
pub const USB_PRODUCT: &str = "POKKEN CONTROLLER";

/// Bus power requested from the host (mA).
pub const USB_MAX_POWER_MA: u16 = 500;

/// HID interrupt endpoint polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 5;

/// HID interrupt endpoint packet size (bytes).
pub const USB_HID_MAX_PACKET_SIZE: u16 = 64;

// GPIO pin assignments (nRF52840-DK defaults)
//
//   Status LED     → P0.13 (LED1, active-low)
//
// Lit while the macro holds A or B, dark during pauses.
