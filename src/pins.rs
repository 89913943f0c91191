//! GPIO pin assignments for the rig controller board (BCM numbering).
//!
//! Single source of truth — [`PinMap::default`](crate::config::PinMap)
//! is built from these constants, and nothing else in the crate hard-codes
//! a pin number.  Override individual pins through the JSON config instead
//! of editing logic.

// ---------------------------------------------------------------------------
// Winch motor (two-direction driver)
// ---------------------------------------------------------------------------

/// Digital output: HIGH = rotate clockwise (hoist).
pub const WINCH_CW_GPIO: u8 = 5;
/// Digital output: HIGH = rotate counter-clockwise (lower).
pub const WINCH_CCW_GPIO: u8 = 6;

// ---------------------------------------------------------------------------
// 20 kgf stepper (two fixed positions)
// ---------------------------------------------------------------------------

/// Digital output: HIGH = move to position A.
pub const STEPPER_A_GPIO: u8 = 13;
/// Digital output: HIGH = move to position B.
pub const STEPPER_B_GPIO: u8 = 19;

// ---------------------------------------------------------------------------
// Sensors — digital inputs
// ---------------------------------------------------------------------------

/// Metal detection sensor.
pub const METAL_SENSOR_GPIO: u8 = 17;
/// Safety proximity sensor.  Detection cuts power and ends the run.
pub const PROXIMITY_SENSOR_GPIO: u8 = 27;
/// Descent detection sensor.
pub const DESCENT_SENSOR_GPIO: u8 = 22;

// ---------------------------------------------------------------------------
// Power relay
// ---------------------------------------------------------------------------

/// Digital output: LOW = relay de-energized (power cut).
pub const POWER_RELAY_GPIO: u8 = 26;

// ---------------------------------------------------------------------------
// Header limits
// ---------------------------------------------------------------------------

/// Highest BCM GPIO line exposed on the 40-pin header.
pub const MAX_BCM_GPIO: u8 = 27;
/// Physical header pins are numbered 1–40.
pub const MAX_BOARD_PIN: u8 = 40;

/// Physical header positions wired to a GPIO line.  The rest of 1–40 are
/// power (3V3, 5V) and ground.
pub const BOARD_GPIO_PINS: [u8; 28] = [
    3, 5, 7, 8, 10, 11, 12, 13, 15, 16, 18, 19, 21, 22, 23, 24, 26, 27, 28, 29, 31, 32, 33, 35, 36,
    37, 38, 40,
];
