//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DeviceLoop (domain)
//! ```
//!
//! Driven adapters (GPIO, event sinks, config storage) implement these
//! traits.  The [`DeviceLoop`](super::service::DeviceLoop) consumes them via
//! generics, so the control loop never touches hardware directly.  Timed
//! pauses go through [`embedded_hal::delay::DelayNs`] rather than a port of
//! our own.

use crate::config::{DeviceConfig, PinNumbering};
use crate::error::GpioError;

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: domain ↔ header pins)
// ───────────────────────────────────────────────────────────────

/// Direction a pin is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    /// Driven output, starts LOW.
    Output,
    /// Sampled input.
    Input,
}

/// The actuation/sensing capability the rig is built on.
///
/// Two implementations exist: [`SimGpio`](crate::adapters::sim_gpio::SimGpio)
/// (logs writes, reads low) and [`HalGpio`](crate::adapters::hal_gpio::HalGpio)
/// (real pins).  The choice is made once, when the loop is constructed.
pub trait GpioPort {
    /// Choose the pin numbering scheme.  Must precede `configure_pin`.
    fn set_mode(&mut self, numbering: PinNumbering) -> Result<(), GpioError>;

    /// Enable or disable warnings about pins that are reconfigured.
    fn set_warnings(&mut self, enabled: bool) -> Result<(), GpioError>;

    /// Claim `pin` for the given direction.
    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), GpioError>;

    /// Drive an output pin (true = HIGH).
    fn write_pin(&mut self, pin: u8, high: bool) -> Result<(), GpioError>;

    /// Sample an input pin (true = HIGH).
    fn read_pin(&mut self, pin: u8) -> Result<bool, GpioError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`RigEvent`](super::events::RigEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::RigEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists device configuration.
///
/// Implementations MUST validate config values before persisting and
/// after loading.  Invalid ranges are rejected with
/// [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`DeviceConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<DeviceConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &DeviceConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config could not be deserialized.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
