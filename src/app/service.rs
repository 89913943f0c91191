//! Device loop service — the hexagonal core.
//!
//! [`DeviceLoop`] is the one explicit context for the rig: it owns the
//! GPIO port, every actuator and sensor handle, and the state machine
//! position.  It is constructed once at start-up and lives until the
//! process exits.
//!
//! ```text
//!   GpioPort ◀──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       DeviceLoop        │
//!    DelayNs ◀─── │  Rig · Phase · StateId  │
//!                 └────────────────────────┘
//! ```
//!
//! ## Failure policy
//!
//! Fail-stop.  A proximity trip is terminal; there is no resume.  Any GPIO
//! error while stepping is fatal for the loop: it attempts a safe shutdown
//! (winch stopped, relay cut), moves to `Terminated`, and hands the original
//! error back.  Nothing is retried.

use embedded_hal::delay::DelayNs;
use log::{error, info};

use crate::config::{DeviceConfig, validate_config};
use crate::error::GpioError;
use crate::fsm::context::Rig;
use crate::fsm::phases::{self, Outcome};
use crate::fsm::{HaltReason, Phase, StateId, Step};
use crate::sensors::SensorBank;

use super::events::RigEvent;
use super::ports::{EventSink, GpioPort};

/// How a completed [`DeviceLoop::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub reason: HaltReason,
}

pub struct DeviceLoop<G: GpioPort> {
    gpio: G,
    rig: Rig,
    state: StateId,
    phase: Phase,
    cycles: u64,
    halt_reason: Option<HaltReason>,
    hoist_pause_ms: u32,
    lower_pause_ms: u32,
}

impl<G: GpioPort> DeviceLoop<G> {
    /// Validate `config`, prepare the GPIO layer and claim every pin.
    ///
    /// Order matches the GPIO layer's expectations: warnings, numbering,
    /// then pin setup.
    pub fn new(mut gpio: G, config: &DeviceConfig) -> crate::error::Result<Self> {
        validate_config(config)?;
        gpio.set_warnings(config.gpio_warnings)?;
        gpio.set_mode(config.numbering)?;
        let rig = Rig::attach(&mut gpio, &config.pins)?;

        Ok(Self {
            gpio,
            rig,
            state: StateId::Scanning,
            phase: Phase::Hoist,
            cycles: 0,
            halt_reason: None,
            hoist_pause_ms: config.hoist_pause_ms,
            lower_pause_ms: config.lower_pause_ms,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&RigEvent::Started(self.phase));
        info!("DeviceLoop started in {:?}/{:?}", self.state, self.phase);
    }

    /// Advance exactly one phase.
    ///
    /// Returns the pause owed before the next call, or [`Step::Halted`]
    /// once the loop is terminated (every later call is a no-op).
    pub fn step(&mut self, sink: &mut impl EventSink) -> Result<Step, GpioError> {
        if self.state == StateId::Terminated {
            return Ok(Step::Halted);
        }

        let phase = self.phase;
        let outcome = match phases::advance(phase, &mut self.rig, &mut self.gpio) {
            Ok(o) => o,
            Err(e) => {
                self.fail_stop(e, sink);
                return Err(e);
            }
        };

        match outcome {
            Outcome::Halt => {
                self.halt(HaltReason::Proximity, sink);
                Ok(Step::Halted)
            }
            Outcome::Continue { moved } => {
                if let Some(position) = moved {
                    sink.emit(&RigEvent::StepperMoved(position));
                }
                self.phase = phase.next();
                let ms = match phase {
                    Phase::Hoist => self.hoist_pause_ms,
                    Phase::Lower => {
                        self.cycles += 1;
                        sink.emit(&RigEvent::CycleCompleted(self.cycles));
                        self.lower_pause_ms
                    }
                };
                Ok(Step::Pause { ms })
            }
        }
    }

    /// Step until terminated, sleeping through `delay` between phases.
    pub fn run(
        &mut self,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> Result<RunSummary, GpioError> {
        loop {
            match self.step(sink)? {
                Step::Pause { ms } => delay.delay_ms(ms),
                Step::Halted => break,
            }
        }
        Ok(RunSummary {
            cycles: self.cycles,
            reason: self.halt_reason.unwrap_or(HaltReason::Proximity),
        })
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.state
    }

    /// The phase the next [`step`](Self::step) will run.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed hoist + lower cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.halt_reason
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    /// Sensor flags, for simulation and tests.
    pub fn sensors_mut(&mut self) -> &mut SensorBank {
        &mut self.rig.sensors
    }

    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    pub fn gpio_mut(&mut self) -> &mut G {
        &mut self.gpio
    }

    // ── Internal ──────────────────────────────────────────────

    fn halt(&mut self, reason: HaltReason, sink: &mut impl EventSink) {
        self.state = StateId::Terminated;
        self.halt_reason = Some(reason);
        sink.emit(&RigEvent::Halted {
            reason,
            cycles: self.cycles,
        });
    }

    fn fail_stop(&mut self, err: GpioError, sink: &mut impl EventSink) {
        error!("DeviceLoop: {} during {:?}, shutting down", err, self.phase);
        if let Err(e) = self.rig.shutdown(&mut self.gpio) {
            error!("DeviceLoop: safe shutdown incomplete: {}", e);
        }
        self.halt(HaltReason::Fault, sink);
    }
}
