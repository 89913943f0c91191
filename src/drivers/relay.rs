//! Power-cut relay.
//!
//! The relay is never driven at start-up; the controlled circuit stays in
//! whatever state the external wiring holds it until [`Relay::power_off`]
//! pulls the coil line LOW.  Nothing re-energizes it afterwards.

use log::warn;

use crate::app::ports::{GpioPort, PinMode};
use crate::error::GpioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Energized,
    DeEnergized,
}

pub struct Relay {
    pin: u8,
    state: RelayState,
}

impl Relay {
    pub fn attach(gpio: &mut impl GpioPort, pin: u8) -> Result<Self, GpioError> {
        gpio.configure_pin(pin, PinMode::Output)?;
        Ok(Self {
            pin,
            state: RelayState::Energized,
        })
    }

    /// Cut power to the controlled circuit.
    pub fn power_off(&mut self, gpio: &mut impl GpioPort) -> Result<(), GpioError> {
        gpio.write_pin(self.pin, false)?;
        self.state = RelayState::DeEnergized;
        warn!("relay: power cut (pin {})", self.pin);
        Ok(())
    }

    pub fn state(&self) -> RelayState {
        self.state
    }
}
