//! Unified error type for jumpstick.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used across the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Script
    /// A script must contain at least one action.
    EmptyScript,

    /// The loop-back marker points past the end of the script.
    LoopStartOutOfRange { loop_start: usize, len: usize },

    // USB
    /// The HID endpoint refused a report.
    Endpoint(EndpointFault),
}

/// Subset of USB endpoint errors we propagate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndpointFault {
    /// Report did not fit into the endpoint buffer.
    BufferOverflow,
    /// Endpoint is disabled (host not configured or cable pulled).
    Disabled,
}

// Convenience conversions

impl From<EndpointFault> for Error {
    fn from(e: EndpointFault) -> Self {
        Error::Endpoint(e)
    }
}

#[cfg(feature = "embedded")]
impl From<embassy_usb::driver::EndpointError> for Error {
    fn from(e: embassy_usb::driver::EndpointError) -> Self {
        match e {
            embassy_usb::driver::EndpointError::BufferOverflow => {
                Error::Endpoint(EndpointFault::BufferOverflow)
            }
            embassy_usb::driver::EndpointError::Disabled => {
                Error::Endpoint(EndpointFault::Disabled)
            }
        }
    }
}
