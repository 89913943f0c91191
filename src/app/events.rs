//! Outbound rig events.
//!
//! The [`DeviceLoop`](super::service::DeviceLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::drivers::stepper::StepperPosition;
use crate::fsm::{HaltReason, Phase};

/// Structured events emitted by the device loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RigEvent {
    /// The loop has started (carries the first phase).
    Started(Phase),

    /// The stepper was commanded to a new position.
    StepperMoved(StepperPosition),

    /// A full hoist + lower cycle finished; carries the running count.
    CycleCompleted(u64),

    /// The loop reached its terminal state.
    Halted { reason: HaltReason, cycles: u64 },
}
