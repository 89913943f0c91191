//! The rig: every actuator and sensor handle the loop drives.
//!
//! Built once when the loop is constructed and owned by it for the life of
//! the process.  Phase handlers receive `&mut Rig` together with the GPIO
//! port; there is no global controller instance.

use log::info;

use crate::app::ports::GpioPort;
use crate::config::PinMap;
use crate::drivers::relay::Relay;
use crate::drivers::stepper::Stepper;
use crate::drivers::winch::Winch;
use crate::error::GpioError;
use crate::sensors::SensorBank;

pub struct Rig {
    pub winch: Winch,
    pub stepper: Stepper,
    pub relay: Relay,
    pub sensors: SensorBank,
}

impl Rig {
    /// Claim every pin in the map: outputs first, then sensor inputs.
    pub fn attach(gpio: &mut impl GpioPort, pins: &PinMap) -> Result<Self, GpioError> {
        let winch = Winch::attach(gpio, pins.winch_cw, pins.winch_ccw)?;
        let stepper = Stepper::attach(gpio, pins.stepper_a, pins.stepper_b)?;
        let relay = Relay::attach(gpio, pins.relay)?;
        let sensors = SensorBank::attach(gpio, pins)?;
        info!(
            "rig: attached winch={}/{} stepper={}/{} relay={} sensors metal={} proximity={} descent={}",
            pins.winch_cw,
            pins.winch_ccw,
            pins.stepper_a,
            pins.stepper_b,
            pins.relay,
            pins.metal_sensor,
            pins.proximity_sensor,
            pins.descent_sensor,
        );
        Ok(Self {
            winch,
            stepper,
            relay,
            sensors,
        })
    }

    /// Best-effort safe state after a failure: winch stopped, power cut.
    /// Both commands are attempted even if the first fails.
    pub fn shutdown(&mut self, gpio: &mut impl GpioPort) -> Result<(), GpioError> {
        let winch = self.winch.stop(gpio);
        let relay = self.relay.power_off(gpio);
        winch.and(relay)
    }
}
