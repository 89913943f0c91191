//! Unified error types for the rig controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! device loop's error handling uniform.  GPIO errors are `Copy` so the
//! fail-stop path can log and return them without allocation.

use core::fmt;

use crate::app::ports::{ConfigError, PinMode};
use crate::config::PinNumbering;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible device-side operation funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// The actuation/sensing layer failed.
    Gpio(GpioError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpio(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// A pin was configured before `set_mode` chose a numbering scheme.
    NumberingNotSet,
    /// The backend cannot address pins with this numbering scheme.
    UnsupportedNumbering(PinNumbering),
    /// The pin was never passed to `configure_pin`.
    PinNotConfigured(u8),
    /// The pin is configured, but in the other direction.
    WrongMode { pin: u8, configured: PinMode },
    /// The backend refused to hand out the pin (busy or out of range).
    OpenFailed(u8),
    /// Driving the output level failed.
    WriteFailed(u8),
    /// Sampling the input level failed.
    ReadFailed(u8),
    /// The GPIO peripheral itself could not be opened.
    Unavailable,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberingNotSet => write!(f, "pin numbering not set"),
            Self::UnsupportedNumbering(n) => write!(f, "{n:?} numbering not supported"),
            Self::PinNotConfigured(pin) => write!(f, "pin {pin} not configured"),
            Self::WrongMode { pin, configured } => {
                write!(f, "pin {pin} is configured as {configured:?}")
            }
            Self::OpenFailed(pin) => write!(f, "pin {pin} could not be opened"),
            Self::WriteFailed(pin) => write!(f, "write to pin {pin} failed"),
            Self::ReadFailed(pin) => write!(f, "read from pin {pin} failed"),
            Self::Unavailable => write!(f, "GPIO peripheral unavailable"),
        }
    }
}

impl std::error::Error for GpioError {}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
