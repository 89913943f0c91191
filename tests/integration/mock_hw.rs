//! Mock hardware for integration tests.
//!
//! `MockGpio` and `MockDelay` share one call log so tests can assert on the
//! exact interleaving of pin writes and pauses without touching real pins.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use skyctl::app::events::RigEvent;
use skyctl::app::ports::{EventSink, GpioPort, PinMode};
use skyctl::config::PinNumbering;
use skyctl::error::GpioError;

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetWarnings(bool),
    SetMode(PinNumbering),
    Configure { pin: u8, mode: PinMode },
    Write { pin: u8, high: bool },
    Pause { ms: u32 },
}

#[derive(Default)]
pub struct BoardState {
    pub calls: Vec<Call>,
    /// Input levels returned by `read_pin`; absent pins read LOW.
    pub inputs: BTreeMap<u8, bool>,
    /// Writes to this pin fail.
    pub broken_pin: Option<u8>,
    pub pauses: usize,
}

pub type Board = Rc<RefCell<BoardState>>;

pub fn board() -> Board {
    Rc::new(RefCell::new(BoardState::default()))
}

#[allow(dead_code)]
pub fn writes(board: &Board) -> Vec<(u8, bool)> {
    board
        .borrow()
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Write { pin, high } => Some((*pin, *high)),
            _ => None,
        })
        .collect()
}

// ── MockGpio ──────────────────────────────────────────────────

pub struct MockGpio {
    pub board: Board,
}

impl MockGpio {
    pub fn new(board: &Board) -> Self {
        Self {
            board: Rc::clone(board),
        }
    }
}

impl GpioPort for MockGpio {
    fn set_mode(&mut self, numbering: PinNumbering) -> Result<(), GpioError> {
        self.board.borrow_mut().calls.push(Call::SetMode(numbering));
        Ok(())
    }

    fn set_warnings(&mut self, enabled: bool) -> Result<(), GpioError> {
        self.board.borrow_mut().calls.push(Call::SetWarnings(enabled));
        Ok(())
    }

    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), GpioError> {
        self.board
            .borrow_mut()
            .calls
            .push(Call::Configure { pin, mode });
        Ok(())
    }

    fn write_pin(&mut self, pin: u8, high: bool) -> Result<(), GpioError> {
        let mut b = self.board.borrow_mut();
        if b.broken_pin == Some(pin) {
            return Err(GpioError::WriteFailed(pin));
        }
        b.calls.push(Call::Write { pin, high });
        Ok(())
    }

    fn read_pin(&mut self, pin: u8) -> Result<bool, GpioError> {
        Ok(self.board.borrow().inputs.get(&pin).copied().unwrap_or(false))
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Records pauses instead of sleeping.  Optionally raises an input pin
/// once a given number of pauses has elapsed.
pub struct MockDelay {
    pub board: Board,
    pub raise_after: Option<(u8, usize)>,
}

impl MockDelay {
    pub fn new(board: &Board) -> Self {
        Self {
            board: Rc::clone(board),
            raise_after: None,
        }
    }

    pub fn raising(board: &Board, pin: u8, after_pauses: usize) -> Self {
        Self {
            board: Rc::clone(board),
            raise_after: Some((pin, after_pauses)),
        }
    }

    fn record(&mut self, ms: u32) {
        let mut b = self.board.borrow_mut();
        b.calls.push(Call::Pause { ms });
        b.pauses += 1;
        if let Some((pin, n)) = self.raise_after {
            if b.pauses >= n {
                b.inputs.insert(pin, true);
            }
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(ms);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<RigEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &RigEvent) {
        self.events.push(event.clone());
    }
}
