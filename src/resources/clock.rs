//! Injectable time sources for the frame driver.
//!
//! - [`SystemClock`] reads a monotonic wall clock.
//! - [`ManualClock`] only moves when told to; clones share the same time so a
//!   test (or a stepped loop) can keep a handle while the engine owns another.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

pub trait TimeSource {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&mut self) -> f64;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TimeSource for SystemClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn get(&self) -> f64 {
        self.now.get()
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&mut self) -> f64 {
        self.now.get()
    }
}
