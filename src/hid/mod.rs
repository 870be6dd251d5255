//! HID report types for the joystick endpoint.

pub mod joystick;


pub use joystick::{
    Buttons, Hat, JoystickReport, JOYSTICK_REPORT_DESCRIPTOR, JOYSTICK_REPORT_SIZE,
    OUTPUT_REPORT_SIZE, STICK_CENTER, STICK_MAX, STICK_MIN,
};
