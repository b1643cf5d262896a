//! Stopwatch timers.
//!
//! Every named timer in the puppy (decay, inactivity, blink, glance, bark)
//! is a [`Stopwatch`] owned by the component that uses it.  A stopwatch only
//! stores the instant it was last reset; elapsed time is computed against
//! the [`Clock`](crate::app::ports::Clock) reading passed in, so the same
//! code runs against the wall clock and the virtual test clock.

/// Millisecond stopwatch anchored to a monotonic clock reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stopwatch {
    started_ms: u64,
}

impl Stopwatch {
    /// A stopwatch that started at `now_ms`.
    pub fn started_at(now_ms: u64) -> Self {
        Self { started_ms: now_ms }
    }

    /// Restart from `now_ms`.
    pub fn reset(&mut self, now_ms: u64) {
        self.started_ms = now_ms;
    }

    /// Milliseconds since the last reset.  Saturates at zero if the clock
    /// reading is older than the reset.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_ms)
    }

    /// `true` once strictly more than `limit_ms` has elapsed.
    pub fn exceeded(&self, now_ms: u64, limit_ms: u64) -> bool {
        self.elapsed_ms(now_ms) > limit_ms
    }
}
