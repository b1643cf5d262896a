//! Shared mutable context threaded through every behavior step.
//!
//! `PuppyContext` is the single struct that behaviors read from and write
//! to: configuration, the counter engine, the eyes, the body, the random
//! source, the bark timer and the outbound event queue.  Think of it as the
//! "blackboard" in a blackboard architecture.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, PuppyHardware, RandomSource, Sound};
use crate::config::PuppyConfig;
use crate::counters::{CountChange, CounterEngine};
use crate::error::Result;
use crate::expression::{Expression, ExpressionController};
use crate::motion::Body;
use crate::timing::Stopwatch;

/// Events queued between two drains by the service.
pub const OUTBOX_CAPACITY: usize = 16;

/// The shared context passed to every behavior step.
pub struct PuppyContext<R> {
    // -- Configuration --
    pub config: PuppyConfig,

    // -- Owned components --
    pub counters: CounterEngine,
    pub eyes: ExpressionController,
    pub body: Body,
    pub rng: R,

    // -- Playful --
    pub bark_timer: Stopwatch,
    pub bark_interval_ms: u64,

    outbox: heapless::Vec<AppEvent, OUTBOX_CAPACITY>,
}

impl<R: RandomSource> PuppyContext<R> {
    pub fn new(config: PuppyConfig, rng: R) -> Self {
        Self {
            config,
            counters: CounterEngine::new(),
            eyes: ExpressionController::new(),
            body: Body::new(),
            rng,
            bark_timer: Stopwatch::default(),
            bark_interval_ms: 0,
            outbox: heapless::Vec::new(),
        }
    }

    // ── Counters ──────────────────────────────────────────────

    /// Poll the touch sensor.  A new pet makes the puppy squint and sniff
    /// unless `quiet` (a hungry puppy does not react).  Returns whether a
    /// pet was counted.
    pub fn update_pet_count(&mut self, hw: &mut impl PuppyHardware, quiet: bool) -> bool {
        let pressed = hw.is_pressed();
        let Some(change) = self.counters.observe_touch(pressed, hw.now_ms()) else {
            return false;
        };
        self.record(change);
        if !quiet {
            self.set_eyes(Expression::Squinty, hw);
            hw.play(Sound::DogSniff);
        }
        true
    }

    /// Poll the color sensor.  A new meal makes the puppy squint and
    /// crunch.  Returns whether a meal was counted.
    pub fn update_feed_count(&mut self, hw: &mut impl PuppyHardware) -> bool {
        let color = hw.detected_color();
        let Some(change) = self.counters.observe_color(color, hw.now_ms()) else {
            return false;
        };
        self.record(change);
        self.set_eyes(Expression::Squinty, hw);
        hw.play(Sound::Crunching);
        true
    }

    /// Apply time-based forgetting.  Monitor only; behaviors never decay.
    pub fn decay_counts(&mut self, now_ms: u64) {
        let interval = self.config.decay_interval_ms;
        for change in self.counters.decay(now_ms, interval) {
            self.record(change);
        }
    }

    /// Angry puppy forgets one pet.
    pub fn scold(&mut self, now_ms: u64) {
        if let Some(change) = self.counters.scold(now_ms) {
            self.record(change);
        }
    }

    /// Bathroom empties the stomach down to one meal.
    pub fn relieve(&mut self, now_ms: u64) {
        if let Some(change) = self.counters.relieve(now_ms, self.config.initial_count) {
            self.record(change);
        }
    }

    /// Full puppy reset.  Must be called while seated: the seated leg angle
    /// becomes the new zero.
    pub fn reset(&mut self, hw: &mut impl PuppyHardware) -> Result<()> {
        self.body.reset_leg_angles(hw)?;
        let (pet_target, feed_target) =
            self.counters
                .reset(hw.now_ms(), &self.config, &mut self.rng);
        info!("mood reset: pet_target={pet_target} feed_target={feed_target}");
        self.push_event(AppEvent::MoodReset {
            pet_target,
            feed_target,
        });
        Ok(())
    }

    // ── Eyes ──────────────────────────────────────────────────

    pub fn set_eyes(&mut self, expression: Expression, hw: &mut impl PuppyHardware) {
        self.eyes.set(expression, hw);
    }

    pub fn animate_eyes(&mut self, hw: &mut impl PuppyHardware) {
        let now = hw.now_ms();
        self.eyes
            .tick_idle_animation(now, &self.config, &mut self.rng, hw);
    }

    // ── Playful bark timer ────────────────────────────────────

    /// Bark right away on the next check.
    pub fn arm_bark(&mut self) {
        self.bark_interval_ms = 0;
    }

    /// `true` when the bark interval has elapsed; restarts the timer with a
    /// freshly drawn interval.
    pub fn bark_due(&mut self, now_ms: u64) -> bool {
        if !self.bark_timer.exceeded(now_ms, self.bark_interval_ms) {
            return false;
        }
        self.bark_timer.reset(now_ms);
        let (lo, hi) = self.config.bark_interval_range_s;
        self.bark_interval_ms = u64::from(self.rng.uniform_int(lo, hi)) * 1000;
        true
    }

    // ── Events ────────────────────────────────────────────────

    /// Queue an event for the next drain.  Drops it with a warning when the
    /// queue is full.
    pub fn push_event(&mut self, event: AppEvent) {
        if let Err(dropped) = self.outbox.push(event) {
            warn!("event outbox full, dropping {dropped:?}");
        }
    }

    /// Forward every queued event to `sink`, oldest first.
    pub fn drain_events(&mut self, sink: &mut impl EventSink) {
        for event in &self.outbox {
            sink.emit(event);
        }
        self.outbox.clear();
    }

    pub fn pending_events(&self) -> usize {
        self.outbox.len()
    }

    fn record(&mut self, change: CountChange) {
        info!(
            "{:?} count {} / target {} ({:?})",
            change.counter, change.count, change.target, change.cause
        );
        self.push_event(change.into());
    }
}
