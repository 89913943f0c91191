//! Device configuration parameters
//!
//! All tunable parameters for the rig controller.
//! Values can be overridden from a JSON file (see
//! [`JsonConfigStore`](crate::adapters::config_file::JsonConfigStore)).

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::pins;

/// Number of pins the rig drives or samples.
pub const PIN_COUNT: usize = 8;

/// Pin numbering scheme handed to the GPIO layer's `set_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinNumbering {
    /// Broadcom SoC GPIO line numbers.
    Bcm,
    /// Physical 40-pin header positions.
    Board,
}

/// Which GPIO implementation the device loop is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpioBackend {
    /// Logging stand-in, reads are always low.
    Sim,
    /// Real header pins (needs the `rpi` feature).
    Hardware,
}

/// Named pin assignments for every actuator and sensor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinMap {
    pub winch_cw: u8,
    pub winch_ccw: u8,
    pub stepper_a: u8,
    pub stepper_b: u8,
    pub metal_sensor: u8,
    pub proximity_sensor: u8,
    pub descent_sensor: u8,
    pub relay: u8,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            winch_cw: pins::WINCH_CW_GPIO,
            winch_ccw: pins::WINCH_CCW_GPIO,
            stepper_a: pins::STEPPER_A_GPIO,
            stepper_b: pins::STEPPER_B_GPIO,
            metal_sensor: pins::METAL_SENSOR_GPIO,
            proximity_sensor: pins::PROXIMITY_SENSOR_GPIO,
            descent_sensor: pins::DESCENT_SENSOR_GPIO,
            relay: pins::POWER_RELAY_GPIO,
        }
    }
}

impl PinMap {
    /// Every assigned pin, outputs first.
    pub fn all(&self) -> Vec<u8, PIN_COUNT> {
        Vec::from_slice(&[
            self.winch_cw,
            self.winch_ccw,
            self.stepper_a,
            self.stepper_b,
            self.relay,
            self.metal_sensor,
            self.proximity_sensor,
            self.descent_sensor,
        ])
        .unwrap_or_default()
    }
}

/// Core device configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    // --- Wiring ---
    pub pins: PinMap,
    pub numbering: PinNumbering,
    /// Forwarded to the GPIO layer's `set_warnings`.
    pub gpio_warnings: bool,
    pub backend: GpioBackend,

    // --- Timing ---
    /// Pause after the hoist half of a cycle (milliseconds)
    pub hoist_pause_ms: u32,
    /// Pause after the lower half of a cycle (milliseconds)
    pub lower_pause_ms: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            pins: PinMap::default(),
            numbering: PinNumbering::Bcm,
            gpio_warnings: false,
            backend: GpioBackend::Sim,

            hoist_pause_ms: 500,
            lower_pause_ms: 100,
        }
    }
}

/// Range-check a config before it is used or persisted.
///
/// Invalid values are rejected, not clamped: a wrong pin here would drive
/// the wrong line on the header.
pub fn validate_config(cfg: &DeviceConfig) -> Result<(), ConfigError> {
    let all = cfg.pins.all();
    let (lo, hi) = match cfg.numbering {
        PinNumbering::Bcm => (0, pins::MAX_BCM_GPIO),
        PinNumbering::Board => (1, pins::MAX_BOARD_PIN),
    };
    if all.iter().any(|p| !(lo..=hi).contains(p)) {
        return Err(ConfigError::ValidationFailed(
            "pin number outside the header range for the chosen numbering",
        ));
    }
    if cfg.numbering == PinNumbering::Board
        && all.iter().any(|p| !pins::BOARD_GPIO_PINS.contains(p))
    {
        return Err(ConfigError::ValidationFailed(
            "header position is a power or ground pin, not a GPIO line",
        ));
    }
    for (i, pin) in all.iter().enumerate() {
        if all[i + 1..].contains(pin) {
            return Err(ConfigError::ValidationFailed(
                "pin assignments must be distinct",
            ));
        }
    }
    if !(1..=60_000).contains(&cfg.hoist_pause_ms) {
        return Err(ConfigError::ValidationFailed(
            "hoist_pause_ms must be 1–60000",
        ));
    }
    if !(1..=60_000).contains(&cfg.lower_pause_ms) {
        return Err(ConfigError::ValidationFailed(
            "lower_pause_ms must be 1–60000",
        ));
    }
    Ok(())
}
