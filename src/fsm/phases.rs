//! Phase handlers.
//!
//! ```text
//!  HOIST: proximity? ──yes──▶ relay off, HALT
//!           │no
//!           ▼
//!         winch CW ──▶ metal? ──yes──▶ stepper A
//!
//!  LOWER: winch CCW ──▶ descent? ──yes──▶ stepper B, reset metal + descent
//! ```
//!
//! Every phase first samples the sensor pins so that real hardware can
//! latch flags; the simulated GPIO reads LOW and leaves them untouched.

use super::Phase;
use super::context::Rig;
use crate::app::ports::GpioPort;
use crate::drivers::stepper::StepperPosition;
use crate::error::GpioError;

/// Result of running one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep scanning.  `moved` reports a stepper command issued this phase.
    Continue { moved: Option<StepperPosition> },
    /// Proximity trip: power is cut and the loop must stop.
    Halt,
}

/// Run `phase` against the rig.
pub fn advance(phase: Phase, rig: &mut Rig, gpio: &mut impl GpioPort) -> Result<Outcome, GpioError> {
    rig.sensors.sample_all(gpio)?;
    match phase {
        Phase::Hoist => hoist(rig, gpio),
        Phase::Lower => lower(rig, gpio),
    }
}

fn hoist(rig: &mut Rig, gpio: &mut impl GpioPort) -> Result<Outcome, GpioError> {
    if rig.sensors.proximity.detected() {
        rig.relay.power_off(gpio)?;
        return Ok(Outcome::Halt);
    }

    rig.winch.rotate_cw(gpio)?;
    if rig.sensors.metal.detected() {
        rig.stepper.move_to_a(gpio)?;
        return Ok(Outcome::Continue {
            moved: Some(StepperPosition::A),
        });
    }
    Ok(Outcome::Continue { moved: None })
}

fn lower(rig: &mut Rig, gpio: &mut impl GpioPort) -> Result<Outcome, GpioError> {
    rig.winch.rotate_ccw(gpio)?;
    if rig.sensors.descent.detected() {
        rig.stepper.move_to_b(gpio)?;
        rig.sensors.metal.reset();
        rig.sensors.descent.reset();
        return Ok(Outcome::Continue {
            moved: Some(StepperPosition::B),
        });
    }
    Ok(Outcome::Continue { moved: None })
}
