//! Host time adapter.
//!
//! [`ThreadDelay`] implements `embedded_hal::delay::DelayNs` by blocking the
//! calling thread, which is all the single control loop needs.  It also
//! tracks monotonic uptime for run summaries.

use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;

pub struct ThreadDelay {
    start: Instant,
}

impl Default for ThreadDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadDelay {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since construction (monotonic).
    pub fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
