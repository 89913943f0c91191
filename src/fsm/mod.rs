//! Device-loop state machine.
//!
//! ```text
//!            ┌──────────────── Scanning ────────────────┐
//!            │                                          │
//!            │   Hoist ──[pause hoist_ms]──▶ Lower      │
//!            │     ▲                           │        │
//!            │     └──────[pause lower_ms]─────┘        │
//!            └──────────────────┬───────────────────────┘
//!                   [proximity]  │  [GPIO fault]
//!                                ▼
//!                           Terminated
//! ```
//!
//! Each call to [`phases::advance`] runs exactly one phase and reports the
//! pause the caller owes before the next one.  Blocking callers sleep it
//! inline; a tick-driven caller arms a timer instead.  Sensor checks inside
//! a phase have side effects but never change the [`StateId`]; only the
//! proximity sensor (or a fault) leaves `Scanning`.

pub mod context;
pub mod phases;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Scanning,
    Terminated,
}

/// Position within one Scanning cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Safety check, winch CW, optional move to A.
    Hoist,
    /// Winch CCW, optional move to B and flag reset.
    Lower,
}

impl Phase {
    pub fn next(self) -> Self {
        match self {
            Self::Hoist => Self::Lower,
            Self::Lower => Self::Hoist,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The safety proximity sensor tripped.
    Proximity,
    /// A GPIO write or read failed.
    Fault,
}

/// What the caller must do after one [`phases::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Wait this long, then advance again.
    Pause { ms: u32 },
    /// The loop is in its terminal state.
    Halted,
}
