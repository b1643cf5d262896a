//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the behavior FSM and the shared context.  It exposes
//! a hardware-agnostic API; all I/O flows through port traits injected at
//! call sites, so the whole puppy is testable with mock adapters.
//!
//! ```text
//!  TouchInput ─┐                         ┌──▶ EventSink
//!  ColorInput ─┤  ┌──────────────────┐   │
//!  Buttons ────┼─▶│    AppService    │───┘
//!              │  │ monitor · FSM    │
//!  Motors ◀────┴──│ counters · eyes  │
//!  Screen/Sound   └──────────────────┘
//! ```

use log::info;

use crate::config::PuppyConfig;
use crate::expression::Expression;
use crate::fsm::context::PuppyContext;
use crate::fsm::states::build_behavior_table;
use crate::fsm::{BehaviorId, Fsm};
use crate::error::Result;

use super::events::{AppEvent, MoodSnapshot};
use super::ports::{EventSink, PuppyHardware, RandomSource};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService<H, R> {
    fsm: Fsm<H, R>,
    ctx: PuppyContext<R>,
    tick_count: u64,
}

impl<H, R> AppService<H, R>
where
    H: PuppyHardware,
    R: RandomSource,
{
    /// Construct the service.
    ///
    /// Does **not** touch the hardware: call [`start`](Self::start) next.
    pub fn new(config: PuppyConfig, rng: R) -> Self {
        let ctx = PuppyContext::new(config, rng);
        let fsm = Fsm::new(build_behavior_table(), BehaviorId::Idle);
        Self {
            fsm,
            ctx,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Startup sequence: sit, calibrate the head (blocks until Center),
    /// close the eyes, reset the mood.  Idle is entered on the first tick.
    pub fn start(&mut self, hw: &mut H, sink: &mut impl EventSink) -> Result<()> {
        let cfg = &self.ctx.config;
        self.ctx.body.sit_down(hw, cfg);
        self.ctx.body.adjust_head(hw, cfg);
        self.ctx.set_eyes(Expression::Sleeping, hw);
        self.ctx.reset(hw)?;
        self.ctx.drain_events(sink);

        let state = self.fsm.current_behavior();
        sink.emit(&AppEvent::Started(state));
        info!("AppService started in {:?}", state);
        Ok(())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: monitor → behavior step → events.
    pub fn tick(&mut self, hw: &mut H, sink: &mut impl EventSink) -> Result<()> {
        self.tick_count += 1;
        let prev = self.fsm.current_behavior();

        // 1. Monitor: decay and inactivity, in every behavior
        let now = hw.now_ms();
        self.ctx.decay_counts(now);
        if self.ctx.counters.idle_ms(now) > self.ctx.config.sleep_after_ms {
            self.ctx.counters.note_activity(now);
            if self.fsm.force_transition(BehaviorId::Sleeping) {
                info!("nothing happened for a while, going to sleep");
                self.ctx.push_event(AppEvent::FellAsleep);
            }
        }

        // 2. Behavior step; an error still flushes what was queued
        let stepped = self.fsm.tick(&mut self.ctx, hw);
        self.ctx.drain_events(sink);
        stepped?;

        // 3. Emit a behavior change if the FSM moved
        let next = self.fsm.current_behavior();
        if next != prev {
            sink.emit(&AppEvent::BehaviorChanged { from: prev, to: next });
        }
        Ok(())
    }

    /// One tick followed by one tick interval of waiting.
    pub fn step(&mut self, hw: &mut H, sink: &mut impl EventSink) -> Result<()> {
        self.tick(hw, sink)?;
        hw.wait_ms(self.ctx.config.tick_interval_ms);
        Ok(())
    }

    /// Stop every motor.  Call on the way out after an error.
    pub fn halt(&mut self, hw: &mut H) {
        self.ctx.body.halt(hw);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self, now_ms: u64) -> MoodSnapshot {
        let m = self.ctx.counters.counts();
        MoodSnapshot {
            behavior: self.fsm.current_behavior(),
            pet_count: m.pet_count,
            pet_target: m.pet_target,
            feed_count: m.feed_count,
            feed_target: m.feed_target,
            expression: self.ctx.eyes.current(),
            pose: self.ctx.body.pose(),
            idle_ms: self.ctx.counters.idle_ms(now_ms),
        }
    }

    /// Current behavior.
    pub fn state(&self) -> BehaviorId {
        self.fsm.current_behavior()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &PuppyConfig {
        &self.ctx.config
    }

    /// Read access to the shared context (counters, eyes, body).
    pub fn context(&self) -> &PuppyContext<R> {
        &self.ctx
    }
}
