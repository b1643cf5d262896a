//! Petting and feeding counters.
//!
//! Counts rise on debounced sensor edges and fall on their own over time:
//!
//! ```text
//!  touch ──[rising edge]──▶ pet_count += 1 ─┐
//!  color ──[new colour]───▶ feed_count += 1 ├──▶ change stopwatch reset
//!  decay ──[> 15 s]───────▶ count -= 1 (≥0) ┘
//! ```
//!
//! The engine is pure: it takes sensor readings and the current clock
//! reading and reports what changed.  Sounds and eyes are the caller's job.

use crate::app::ports::{Color, RandomSource};
use crate::config::PuppyConfig;
use crate::timing::Stopwatch;

/// Number of counters; one decay call reports at most this many changes.
pub const COUNTER_KINDS: usize = 2;

/// Which of the two counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    Pet,
    Feed,
}

/// Why a count moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountCause {
    /// A sensor edge (petting or feeding).
    Edge,
    /// Time-based forgetting.
    Decay,
    /// A behavior adjusted it (Angry, Bathroom).
    Behavior,
}

/// A single count change, as reported to the event sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountChange {
    pub counter: CounterKind,
    pub count: u32,
    pub target: u32,
    pub cause: CountCause,
}

/// Counts and targets at one instant.  Input of the mood rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoodCounts {
    pub pet_count: u32,
    pub pet_target: u32,
    pub feed_count: u32,
    pub feed_target: u32,
}

#[derive(Debug, Clone, Copy, Default)]
struct Counter {
    count: u32,
    target: u32,
    decay: Stopwatch,
}

impl Counter {
    fn change(&self, counter: CounterKind, cause: CountCause) -> CountChange {
        CountChange {
            counter,
            count: self.count,
            target: self.target,
            cause,
        }
    }
}

/// Owner of both counters, their edge memory and their stopwatches.
#[derive(Debug, Clone, Default)]
pub struct CounterEngine {
    pet: Counter,
    feed: Counter,
    prev_petted: bool,
    prev_color: Option<Color>,
    changed: Stopwatch,
}

impl CounterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reset ─────────────────────────────────────────────────

    /// Draw fresh targets, set both counts to the initial value and restart
    /// every stopwatch.  Returns the drawn `(pet_target, feed_target)`.
    pub fn reset(
        &mut self,
        now_ms: u64,
        config: &PuppyConfig,
        rng: &mut impl RandomSource,
    ) -> (u32, u32) {
        let (lo, hi) = config.pet_target_range;
        let pet_target = rng.uniform_int(lo, hi);
        let (lo, hi) = config.feed_target_range;
        let feed_target = rng.uniform_int(lo, hi);
        self.reset_with_targets(now_ms, config.initial_count, pet_target, feed_target);
        (pet_target, feed_target)
    }

    /// Reset with explicit targets.
    pub fn reset_with_targets(
        &mut self,
        now_ms: u64,
        initial_count: u32,
        pet_target: u32,
        feed_target: u32,
    ) {
        self.pet = Counter {
            count: initial_count,
            target: pet_target,
            decay: Stopwatch::started_at(now_ms),
        };
        self.feed = Counter {
            count: initial_count,
            target: feed_target,
            decay: Stopwatch::started_at(now_ms),
        };
        self.changed.reset(now_ms);
    }

    // ── Edges ─────────────────────────────────────────────────

    /// Feed one touch reading.  Counts a pet on the rising edge only; the
    /// edge re-arms once the sensor has been seen released.
    pub fn observe_touch(&mut self, pressed: bool, now_ms: u64) -> Option<CountChange> {
        let rising = pressed && !self.prev_petted;
        self.prev_petted = pressed;
        if !rising {
            return None;
        }
        self.pet.count = self.pet.count.saturating_add(1);
        self.changed.reset(now_ms);
        Some(self.pet.change(CounterKind::Pet, CountCause::Edge))
    }

    /// Feed one color reading.  Counts a meal when a real color shows up
    /// that differs from the one that caused the previous meal.
    pub fn observe_color(&mut self, color: Option<Color>, now_ms: u64) -> Option<CountChange> {
        let color = color.filter(|c| *c != Color::BACKGROUND)?;
        if self.prev_color == Some(color) {
            return None;
        }
        self.prev_color = Some(color);
        self.feed.count = self.feed.count.saturating_add(1);
        self.changed.reset(now_ms);
        Some(self.feed.change(CounterKind::Feed, CountCause::Edge))
    }

    // ── Decay ─────────────────────────────────────────────────

    /// Forget one pet and/or one meal when their decay windows elapse.
    /// Each counter has its own window; counts never go below zero.
    pub fn decay(
        &mut self,
        now_ms: u64,
        interval_ms: u64,
    ) -> heapless::Vec<CountChange, COUNTER_KINDS> {
        let mut changes = heapless::Vec::new();
        for kind in [CounterKind::Pet, CounterKind::Feed] {
            let counter = self.counter_mut(kind);
            if !counter.decay.exceeded(now_ms, interval_ms) {
                continue;
            }
            counter.decay.reset(now_ms);
            if counter.count == 0 {
                continue;
            }
            counter.count -= 1;
            let change = counter.change(kind, CountCause::Decay);
            self.changed.reset(now_ms);
            let pushed = changes.push(change);
            debug_assert!(pushed.is_ok(), "one change per counter");
        }
        changes
    }

    // ── Behavior adjustments ──────────────────────────────────

    /// Angry puppy forgets one pet.
    pub fn scold(&mut self, now_ms: u64) -> Option<CountChange> {
        if self.pet.count == 0 {
            return None;
        }
        self.pet.count -= 1;
        self.changed.reset(now_ms);
        Some(self.pet.change(CounterKind::Pet, CountCause::Behavior))
    }

    /// After the bathroom the stomach is back to one meal.
    pub fn relieve(&mut self, now_ms: u64, initial_count: u32) -> Option<CountChange> {
        if self.feed.count == initial_count {
            return None;
        }
        self.feed.count = initial_count;
        self.changed.reset(now_ms);
        Some(self.feed.change(CounterKind::Feed, CountCause::Behavior))
    }

    // ── Inactivity ────────────────────────────────────────────

    /// Restart the inactivity window without touching the counts.
    pub fn note_activity(&mut self, now_ms: u64) {
        self.changed.reset(now_ms);
    }

    /// Milliseconds since either count last changed.
    pub fn idle_ms(&self, now_ms: u64) -> u64 {
        self.changed.elapsed_ms(now_ms)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn counts(&self) -> MoodCounts {
        MoodCounts {
            pet_count: self.pet.count,
            pet_target: self.pet.target,
            feed_count: self.feed.count,
            feed_target: self.feed.target,
        }
    }

    pub fn pet_count(&self) -> u32 {
        self.pet.count
    }

    pub fn feed_count(&self) -> u32 {
        self.feed.count
    }

    fn counter_mut(&mut self, kind: CounterKind) -> &mut Counter {
        match kind {
            CounterKind::Pet => &mut self.pet,
            CounterKind::Feed => &mut self.feed,
        }
    }
}
