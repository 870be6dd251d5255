//! Host-testable core of jumpstick.
//!
//! Everything the firmware decides - which report to send on each poll,
//! how the macro is laid out, how often the slow tasks run - lives in
//! this library and has no hardware dependencies. The embedded binary
//! (`src/main.rs`, feature `embedded`) wires it to Embassy and the nRF52840
//! USB peripheral.
//!
//! Usage: `cargo test --lib` / `cargo test`
//!
//! Data flow per host poll:
//!
//! ```text
//! report task ──► Sequencer::tick(clock) ──► Script + window + echo ──► JoystickReport ──► HID IN endpoint
//! ```

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod echo;
pub mod error;
pub mod hid;
pub mod schedule;
pub mod script;
pub mod sequencer;
pub mod status;
pub mod transport;

pub use clock::{Clock, ManualClock};
pub use error::{EndpointFault, Error};
pub use hid::{Buttons, Hat, JoystickReport};
pub use schedule::Divider;
pub use script::{jump_script, Action, ActionKind, Hold, Script, JUMP_LOOP_START};
pub use sequencer::{Phase, Sequencer, Status, Window, WrapPolicy};
pub use status::StatusLed;
pub use transport::{service, Transport};
