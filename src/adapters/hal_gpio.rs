//! Real-hardware GPIO adapter over `embedded-hal` pin handles.
//!
//! [`HalGpio`] turns pin-number based [`GpioPort`] calls into operations on
//! owned `embedded_hal::digital` pins.  Where those pins come from is the
//! job of a [`PinProvider`]; the `rpi` feature supplies one backed by
//! `rppal` (see [`super::rpi`]).
//!
//! Unlike the simulator this adapter is strict:
//!
//! - `set_mode` must run before any `configure_pin`, and only BCM numbering
//!   is accepted (header positions are not addressable through the SoC).
//! - Writes go only to outputs, reads only to inputs.
//! - Reconfiguring a pin releases the old handle first; with warnings
//!   enabled this is logged.

use std::collections::BTreeMap;

use embedded_hal::digital::{Error as _, InputPin, OutputPin, PinState};
use log::{error, info, warn};

use crate::app::ports::{GpioPort, PinMode};
use crate::config::PinNumbering;
use crate::error::GpioError;

/// Source of owned pin handles, addressed by BCM line number.
pub trait PinProvider {
    type Output: OutputPin;
    type Input: InputPin;

    /// Open `pin` as an output.  The handle should start LOW; [`HalGpio`]
    /// drives it LOW again right after opening.
    fn open_output(&mut self, pin: u8) -> Result<Self::Output, GpioError>;

    fn open_input(&mut self, pin: u8) -> Result<Self::Input, GpioError>;
}

enum Slot<O, I> {
    Output(O),
    Input(I),
}

pub struct HalGpio<P: PinProvider> {
    provider: P,
    numbering: Option<PinNumbering>,
    warnings: bool,
    pins: BTreeMap<u8, Slot<P::Output, P::Input>>,
}

impl<P: PinProvider> HalGpio<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            numbering: None,
            warnings: true,
            pins: BTreeMap::new(),
        }
    }

    /// Number of pins currently held.
    pub fn claimed(&self) -> usize {
        self.pins.len()
    }

    fn open_slot(&mut self, pin: u8, mode: PinMode) -> Result<Slot<P::Output, P::Input>, GpioError> {
        match mode {
            PinMode::Output => {
                let mut out = self.provider.open_output(pin)?;
                out.set_low().map_err(|_| GpioError::WriteFailed(pin))?;
                Ok(Slot::Output(out))
            }
            PinMode::Input => Ok(Slot::Input(self.provider.open_input(pin)?)),
        }
    }
}

impl<P: PinProvider> GpioPort for HalGpio<P> {
    fn set_mode(&mut self, numbering: PinNumbering) -> Result<(), GpioError> {
        if numbering != PinNumbering::Bcm {
            return Err(GpioError::UnsupportedNumbering(numbering));
        }
        self.numbering = Some(numbering);
        Ok(())
    }

    fn set_warnings(&mut self, enabled: bool) -> Result<(), GpioError> {
        self.warnings = enabled;
        Ok(())
    }

    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), GpioError> {
        if self.numbering.is_none() {
            return Err(GpioError::NumberingNotSet);
        }
        // The old handle is released before the new open: a provider may
        // refuse a line that is still held.
        let previous = self.pins.remove(&pin).map(|old| match old {
            Slot::Output(_) => PinMode::Output,
            Slot::Input(_) => PinMode::Input,
        });
        if previous.is_some() && self.warnings {
            warn!("GPIO pin {} was already in use, reconfiguring as {:?}", pin, mode);
        }

        match self.open_slot(pin, mode) {
            Ok(slot) => {
                self.pins.insert(pin, slot);
                info!("GPIO pin {} configured as {:?}", pin, mode);
                Ok(())
            }
            Err(e) => {
                if let Some(prev) = previous {
                    match self.open_slot(pin, prev) {
                        Ok(slot) => {
                            self.pins.insert(pin, slot);
                            warn!("GPIO pin {} kept as {:?}: {}", pin, prev, e);
                        }
                        Err(again) => error!("GPIO pin {} lost: {}, restore failed: {}", pin, e, again),
                    }
                }
                Err(e)
            }
        }
    }

    fn write_pin(&mut self, pin: u8, high: bool) -> Result<(), GpioError> {
        match self.pins.get_mut(&pin) {
            Some(Slot::Output(out)) => out.set_state(PinState::from(high)).map_err(|e| {
                warn!("GPIO write pin={} failed: {:?}", pin, e.kind());
                GpioError::WriteFailed(pin)
            }),
            Some(Slot::Input(_)) => Err(GpioError::WrongMode {
                pin,
                configured: PinMode::Input,
            }),
            None => Err(GpioError::PinNotConfigured(pin)),
        }
    }

    fn read_pin(&mut self, pin: u8) -> Result<bool, GpioError> {
        match self.pins.get_mut(&pin) {
            Some(Slot::Input(input)) => input.is_high().map_err(|e| {
                warn!("GPIO read pin={} failed: {:?}", pin, e.kind());
                GpioError::ReadFailed(pin)
            }),
            Some(Slot::Output(_)) => Err(GpioError::WrongMode {
                pin,
                configured: PinMode::Output,
            }),
            None => Err(GpioError::PinNotConfigured(pin)),
        }
    }
}
