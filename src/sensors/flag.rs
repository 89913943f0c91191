//! Latched digital sensor flag.
//!
//! The flag is the loop's view of a sensor: it can be set by sampling the
//! pin, or directly through [`SensorFlag::set_state`] for simulation and
//! tests.  Sampling only ever *sets* the flag; clearing is the loop's job
//! ([`SensorFlag::reset`]) once it has acted on a detection.
//!
//! ## Dual-target behaviour
//!
//! With real pins a HIGH level latches the flag.  With the simulated GPIO
//! every read is LOW, so the flag only moves through `set_state`.

use log::debug;

use crate::app::ports::{GpioPort, PinMode};
use crate::error::GpioError;

pub struct SensorFlag {
    name: &'static str,
    pin: u8,
    state: bool,
}

impl SensorFlag {
    pub fn attach(gpio: &mut impl GpioPort, name: &'static str, pin: u8) -> Result<Self, GpioError> {
        gpio.configure_pin(pin, PinMode::Input)?;
        Ok(Self {
            name,
            pin,
            state: false,
        })
    }

    pub fn detected(&self) -> bool {
        self.state
    }

    /// Simulation hook.
    pub fn set_state(&mut self, value: bool) {
        self.state = value;
    }

    pub fn reset(&mut self) {
        self.state = false;
    }

    /// Read the pin and latch on HIGH.  Returns the latched flag.
    pub fn sample(&mut self, gpio: &mut impl GpioPort) -> Result<bool, GpioError> {
        if gpio.read_pin(self.pin)? && !self.state {
            debug!("sensor {}: latched (pin {})", self.name, self.pin);
            self.state = true;
        }
        Ok(self.state)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }
}
