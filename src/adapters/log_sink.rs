//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured rig events to the
//! `log` facade (stderr through `env_logger` in the binaries).

use log::{info, warn};

use crate::app::events::RigEvent;
use crate::app::ports::EventSink;
use crate::fsm::HaltReason;

/// Adapter that logs every [`RigEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &RigEvent) {
        match event {
            RigEvent::Started(phase) => {
                info!("START | phase={:?}", phase);
            }
            RigEvent::StepperMoved(position) => {
                info!("STEPPER | -> {:?}", position);
            }
            RigEvent::CycleCompleted(n) => {
                info!("CYCLE | completed={}", n);
            }
            RigEvent::Halted {
                reason: HaltReason::Proximity,
                cycles,
            } => {
                warn!("HALT | proximity sensor tripped, power cut after {} cycles", cycles);
            }
            RigEvent::Halted {
                reason: HaltReason::Fault,
                cycles,
            } => {
                warn!("HALT | GPIO fault after {} cycles", cycles);
            }
        }
    }
}
