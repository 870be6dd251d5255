//! USB HID joystick report (Pokken Tournament Pro Pad layout).
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0-1: Button bitfield (little-endian u16)
//!           Bit 0 = Y,  Bit 1 = B,  Bit 2 = A,  Bit 3 = X,
//!           Bit 4 = L,  Bit 5 = R,  Bit 6 = ZL, Bit 7 = ZR,
//!           Bit 8 = -,  Bit 9 = +,  Bit 10 = L-click, Bit 11 = R-click,
//!           Bit 12 = Home, Bit 13 = Capture
//! Byte 2:   HAT switch (low nibble, 0x08 = centered)
//! Byte 3-6: LX, LY, RX, RY (0x00 = min, 0x80 = center, 0xFF = max)
//! Byte 7:   Vendor-specific (always 0x00)
//! ```

use core::ops::{BitOr, BitOrAssign};

/// Joystick input report size in bytes.
pub const JOYSTICK_REPORT_SIZE: usize = 8;

/// Host → device output report size in bytes.
pub const OUTPUT_REPORT_SIZE: usize = 8;

/// Stick axis at full deflection towards up/left.
pub const STICK_MIN: u8 = 0x00;
/// Stick axis at rest.
pub const STICK_CENTER: u8 = 0x80;
/// Stick axis at full deflection towards down/right.
pub const STICK_MAX: u8 = 0xFF;

/// Button bitmask, one bit per physical button.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u16);

impl Buttons {
    pub const NONE: Self = Self(0);
    pub const Y: Self = Self(0x0001);
    pub const B: Self = Self(0x0002);
    pub const A: Self = Self(0x0004);
    pub const X: Self = Self(0x0008);
    pub const L: Self = Self(0x0010);
    pub const R: Self = Self(0x0020);
    pub const ZL: Self = Self(0x0040);
    pub const ZR: Self = Self(0x0080);
    pub const MINUS: Self = Self(0x0100);
    pub const PLUS: Self = Self(0x0200);
    pub const LCLICK: Self = Self(0x0400);
    pub const RCLICK: Self = Self(0x0800);
    pub const HOME: Self = Self(0x1000);
    pub const CAPTURE: Self = Self(0x2000);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for Buttons {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// Direction pad position, clockwise from the top.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Hat {
    Top = 0x00,
    TopRight = 0x01,
    Right = 0x02,
    BottomRight = 0x03,
    Bottom = 0x04,
    BottomLeft = 0x05,
    Left = 0x06,
    TopLeft = 0x07,
    #[default]
    Center = 0x08,
}

impl Hat {
    /// Decode the low nibble of a HAT byte. Values above 8 are invalid.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw & 0x0F {
            0x00 => Some(Hat::Top),
            0x01 => Some(Hat::TopRight),
            0x02 => Some(Hat::Right),
            0x03 => Some(Hat::BottomRight),
            0x04 => Some(Hat::Bottom),
            0x05 => Some(Hat::BottomLeft),
            0x06 => Some(Hat::Left),
            0x07 => Some(Hat::TopLeft),
            0x08 => Some(Hat::Center),
            _ => None,
        }
    }
}

/// One joystick input report, as sent on the IN endpoint every poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickReport {
    pub buttons: Buttons,
    pub hat: Hat,
    pub lx: u8,
    pub ly: u8,
    pub rx: u8,
    pub ry: u8,
    /// Vendor-specific byte; the console ignores it.
    pub vendor: u8,
}

impl Default for JoystickReport {
    fn default() -> Self {
        Self::neutral()
    }
}

impl JoystickReport {
    /// No buttons, HAT centered, both sticks at rest.
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            hat: Hat::Center,
            lx: STICK_CENTER,
            ly: STICK_CENTER,
            rx: STICK_CENTER,
            ry: STICK_CENTER,
            vendor: 0,
        }
    }

    /// Returns `true` if the report is indistinguishable from an idle pad.
    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }

    /// Parse a raw 8-byte input report.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < JOYSTICK_REPORT_SIZE {
            return None;
        }
        Some(Self {
            buttons: Buttons::from_bits(u16::from_le_bytes([data[0], data[1]])),
            hat: Hat::from_raw(data[2])?,
            lx: data[3],
            ly: data[4],
            rx: data[5],
            ry: data[6],
            vendor: data[7],
        })
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (8, or 0 if `buf` is too small).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < JOYSTICK_REPORT_SIZE {
            return 0;
        }
        buf[..2].copy_from_slice(&self.buttons.bits().to_le_bytes());
        buf[2] = self.hat as u8;
        buf[3] = self.lx;
        buf[4] = self.ly;
        buf[5] = self.rx;
        buf[6] = self.ry;
        buf[7] = self.vendor;
        JOYSTICK_REPORT_SIZE
    }

    pub fn to_bytes(&self) -> [u8; JOYSTICK_REPORT_SIZE] {
        let mut buf = [0u8; JOYSTICK_REPORT_SIZE];
        self.serialize(&mut buf);
        buf
    }
}

// USB HID report descriptor for the Pokken-compatible pad

/// USB HID Report Descriptor for the joystick.
///
/// This descriptor tells the USB host that we are a joystick with:
///   - 16 buttons (input)
///   - a 4-bit HAT switch plus 4 bits of padding (input)
///   - four 8-bit stick axes (input)
///   - one vendor-specific byte (input)
///   - 8 vendor bytes (output)
pub const JOYSTICK_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Game Pad)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Buttons (16 bits) -
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x35, 0x00, //   Physical Minimum (0)
    0x45, 0x01, //   Physical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x10, //   Report Count (16)
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (1)
    0x29, 0x10, //   Usage Maximum (16)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - HAT switch (4 bits) -
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x25, 0x07, //   Logical Maximum (7)
    0x46, 0x3B, 0x01, // Physical Maximum (315)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x65, 0x14, //   Unit (Degrees)
    0x09, 0x39, //   Usage (Hat Switch)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    //
    //   - HAT padding (4 bits) -
    0x65, 0x00, //   Unit (None)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Constant)
    //
    //   - Sticks (4 bytes) -
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x46, 0xFF, 0x00, // Physical Maximum (255)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Vendor byte -
    0x06, 0x00, 0xFF, // Usage Page (Vendor Defined 0xFF00)
    0x09, 0x20, //   Usage (0x20)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Output (8 bytes) -
    0x0A, 0x21, 0x26, // Usage (0x2621)
    0x95, 0x08, //   Report Count (8)
    0x91, 0x02, //   Output (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];
