//! Winch motor driver (two-direction, one enable line per direction).
//!
//! ## Safety contract
//!
//! CW and CCW are never asserted together.  [`write_pair`] releases the
//! outgoing direction before asserting the new one, and the recorded state
//! only changes once both writes have landed.

use log::debug;

use super::write_pair;
use crate::app::ports::{GpioPort, PinMode};
use crate::error::GpioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinchState {
    Idle,
    RotatingCw,
    RotatingCcw,
}

pub struct Winch {
    cw_pin: u8,
    ccw_pin: u8,
    state: WinchState,
}

impl Winch {
    /// Claim both direction pins as outputs (driven LOW → `Idle`).
    pub fn attach(gpio: &mut impl GpioPort, cw_pin: u8, ccw_pin: u8) -> Result<Self, GpioError> {
        gpio.configure_pin(cw_pin, PinMode::Output)?;
        gpio.configure_pin(ccw_pin, PinMode::Output)?;
        Ok(Self {
            cw_pin,
            ccw_pin,
            state: WinchState::Idle,
        })
    }

    pub fn rotate_cw(&mut self, gpio: &mut impl GpioPort) -> Result<(), GpioError> {
        self.drive(gpio, WinchState::RotatingCw)
    }

    pub fn rotate_ccw(&mut self, gpio: &mut impl GpioPort) -> Result<(), GpioError> {
        self.drive(gpio, WinchState::RotatingCcw)
    }

    pub fn stop(&mut self, gpio: &mut impl GpioPort) -> Result<(), GpioError> {
        self.drive(gpio, WinchState::Idle)
    }

    fn drive(&mut self, gpio: &mut impl GpioPort, target: WinchState) -> Result<(), GpioError> {
        let cw = matches!(target, WinchState::RotatingCw);
        let ccw = matches!(target, WinchState::RotatingCcw);
        write_pair(gpio, (self.cw_pin, cw), (self.ccw_pin, ccw))?;
        debug!("winch: {:?} -> {:?}", self.state, target);
        self.state = target;
        Ok(())
    }

    pub fn state(&self) -> WinchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.state, WinchState::Idle)
    }
}
