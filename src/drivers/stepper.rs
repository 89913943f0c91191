//! Two-position stepper driver (20 kgf).
//!
//! One control line per target position; the controller board moves the
//! stepper while its line is HIGH.  Same break-before-make ordering as the
//! winch.

use log::debug;

use super::write_pair;
use crate::app::ports::{GpioPort, PinMode};
use crate::error::GpioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperPosition {
    A,
    B,
}

pub struct Stepper {
    a_pin: u8,
    b_pin: u8,
    /// `None` until the first move: the physical position at power-up
    /// is not known.
    position: Option<StepperPosition>,
}

impl Stepper {
    pub fn attach(gpio: &mut impl GpioPort, a_pin: u8, b_pin: u8) -> Result<Self, GpioError> {
        gpio.configure_pin(a_pin, PinMode::Output)?;
        gpio.configure_pin(b_pin, PinMode::Output)?;
        Ok(Self {
            a_pin,
            b_pin,
            position: None,
        })
    }

    pub fn move_to_a(&mut self, gpio: &mut impl GpioPort) -> Result<(), GpioError> {
        self.move_to(gpio, StepperPosition::A)
    }

    pub fn move_to_b(&mut self, gpio: &mut impl GpioPort) -> Result<(), GpioError> {
        self.move_to(gpio, StepperPosition::B)
    }

    fn move_to(&mut self, gpio: &mut impl GpioPort, target: StepperPosition) -> Result<(), GpioError> {
        let to_a = matches!(target, StepperPosition::A);
        write_pair(gpio, (self.a_pin, to_a), (self.b_pin, !to_a))?;
        debug!("stepper: -> {:?}", target);
        self.position = Some(target);
        Ok(())
    }

    pub fn position(&self) -> Option<StepperPosition> {
        self.position
    }
}
