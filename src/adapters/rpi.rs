//! Raspberry Pi pin provider (`rpi` feature).
//!
//! Hands out `rppal` pin handles to [`HalGpio`].  `rppal` addresses lines
//! by BCM number only, which is why [`HalGpio`] refuses `Board` numbering.
//! Outputs are opened LOW and are left as they are when the process exits,
//! so a cut relay stays cut.

use log::{error, info};
use rppal::gpio::{Gpio, InputPin, OutputPin};

use super::hal_gpio::{HalGpio, PinProvider};
use crate::error::GpioError;

pub struct RppalPins {
    gpio: Gpio,
}

impl PinProvider for RppalPins {
    type Output = OutputPin;
    type Input = InputPin;

    fn open_output(&mut self, pin: u8) -> Result<OutputPin, GpioError> {
        let mut out = self
            .gpio
            .get(pin)
            .map_err(|e| {
                error!("rppal: cannot open pin {}: {}", pin, e);
                GpioError::OpenFailed(pin)
            })?
            .into_output_low();
        out.set_reset_on_drop(false);
        Ok(out)
    }

    fn open_input(&mut self, pin: u8) -> Result<InputPin, GpioError> {
        self.gpio
            .get(pin)
            .map(|p| p.into_input())
            .map_err(|e| {
                error!("rppal: cannot open pin {}: {}", pin, e);
                GpioError::OpenFailed(pin)
            })
    }
}

/// Open the SoC GPIO peripheral and wrap it as a [`GpioPort`](crate::app::ports::GpioPort).
pub fn open() -> Result<HalGpio<RppalPins>, GpioError> {
    let gpio = Gpio::new().map_err(|e| {
        error!("rppal: GPIO peripheral unavailable: {}", e);
        GpioError::Unavailable
    })?;
    info!("rppal: GPIO peripheral opened");
    Ok(HalGpio::new(RppalPins { gpio }))
}
