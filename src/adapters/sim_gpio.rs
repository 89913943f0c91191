//! Simulated GPIO adapter.
//!
//! Stands in for the header when no hardware is present: every write is
//! logged and remembered, every read returns LOW.  Nothing is enforced;
//! out-of-order or unconfigured accesses are logged at `debug` and accepted,
//! so the loop behaves the same as it would on a board with nothing wired.

use std::collections::BTreeMap;

use heapless::HistoryBuffer;
use log::{debug, info};

use crate::app::ports::{GpioPort, PinMode};
use crate::config::PinNumbering;
use crate::error::GpioError;

/// How many recent writes are kept for inspection.
pub const HISTORY_DEPTH: usize = 64;

pub struct SimGpio {
    numbering: Option<PinNumbering>,
    warnings: bool,
    modes: BTreeMap<u8, PinMode>,
    levels: BTreeMap<u8, bool>,
    history: HistoryBuffer<(u8, bool), HISTORY_DEPTH>,
    writes: u64,
}

impl Default for SimGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl SimGpio {
    pub fn new() -> Self {
        info!("SimGpio: no hardware, writes are logged and reads are LOW");
        Self {
            numbering: None,
            warnings: true,
            modes: BTreeMap::new(),
            levels: BTreeMap::new(),
            history: HistoryBuffer::new(),
            writes: 0,
        }
    }

    /// Last level driven on `pin`, if it is an output.
    pub fn level(&self, pin: u8) -> Option<bool> {
        self.levels.get(&pin).copied()
    }

    pub fn mode(&self, pin: u8) -> Option<PinMode> {
        self.modes.get(&pin).copied()
    }

    pub fn numbering(&self) -> Option<PinNumbering> {
        self.numbering
    }

    pub fn warnings_enabled(&self) -> bool {
        self.warnings
    }

    /// Recent writes, oldest first (at most [`HISTORY_DEPTH`]).
    pub fn history(&self) -> impl Iterator<Item = (u8, bool)> + '_ {
        self.history.oldest_ordered().copied()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Total writes since construction.
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

impl GpioPort for SimGpio {
    fn set_mode(&mut self, numbering: PinNumbering) -> Result<(), GpioError> {
        debug!("GPIO setmode {:?}", numbering);
        self.numbering = Some(numbering);
        Ok(())
    }

    fn set_warnings(&mut self, enabled: bool) -> Result<(), GpioError> {
        self.warnings = enabled;
        Ok(())
    }

    fn configure_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), GpioError> {
        if self.numbering.is_none() {
            debug!("GPIO setup pin={} before setmode", pin);
        }
        debug!("GPIO setup pin={} mode={:?}", pin, mode);
        self.modes.insert(pin, mode);
        match mode {
            PinMode::Output => {
                self.levels.insert(pin, false);
            }
            PinMode::Input => {
                self.levels.remove(&pin);
            }
        }
        Ok(())
    }

    fn write_pin(&mut self, pin: u8, high: bool) -> Result<(), GpioError> {
        if self.modes.get(&pin) != Some(&PinMode::Output) {
            debug!("GPIO output to pin {} which is not configured as an output", pin);
        }
        info!("GPIO output pin={} value={}", pin, high);
        self.levels.insert(pin, high);
        self.history.write((pin, high));
        self.writes += 1;
        Ok(())
    }

    fn read_pin(&mut self, _pin: u8) -> Result<bool, GpioError> {
        Ok(false)
    }
}
