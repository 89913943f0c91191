//! Sensor subsystem — the three rig sensors and the aggregating [`SensorBank`].

pub mod flag;

use crate::app::ports::GpioPort;
use crate::config::PinMap;
use crate::error::GpioError;
use flag::SensorFlag;

/// Owns every sensor flag the loop consults.
pub struct SensorBank {
    pub metal: SensorFlag,
    pub proximity: SensorFlag,
    pub descent: SensorFlag,
}

impl SensorBank {
    pub fn attach(gpio: &mut impl GpioPort, pins: &PinMap) -> Result<Self, GpioError> {
        Ok(Self {
            metal: SensorFlag::attach(gpio, "metal", pins.metal_sensor)?,
            proximity: SensorFlag::attach(gpio, "proximity", pins.proximity_sensor)?,
            descent: SensorFlag::attach(gpio, "descent", pins.descent_sensor)?,
        })
    }

    /// Sample every sensor pin, latching any that read HIGH.
    pub fn sample_all(&mut self, gpio: &mut impl GpioPort) -> Result<(), GpioError> {
        self.proximity.sample(gpio)?;
        self.metal.sample(gpio)?;
        self.descent.sample(gpio)?;
        Ok(())
    }
}
