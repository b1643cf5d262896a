//! Host time adapters.
//!
//! - [`SystemClock`] — wall-clock time from `std::time::Instant`; `wait_ms`
//!   really sleeps.  Used when the simulator runs in real time.
//! - [`VirtualClock`] — a counter that only moves when someone waits.
//!   Lets tests cover minutes of puppy life in microseconds.

use std::time::{Duration, Instant};

use crate::app::ports::Clock;

/// Monotonic clock anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn wait_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// Clock that advances only through `wait_ms` or [`VirtualClock::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualClock {
    now_ms: u64,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn wait_ms(&mut self, ms: u32) {
        self.advance(u64::from(ms));
    }
}
