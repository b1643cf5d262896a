//! Function-pointer behavior state machine engine.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  BehaviorTable                                             │
//! │  ┌──────────┬──────────────────────────────────────────┐   │
//! │  │ Behavior │ step(ctx, hw, entered) -> Result<Option> │   │
//! │  ├──────────┼──────────────────────────────────────────┤   │
//! │  │ Idle     │ stand · eyes · mood rule · poll counters │   │
//! │  │ Sleeping │ lie down · wait for touch + Center       │   │
//! │  │ WakingUp │ stretch and stand                        │   │
//! │  │ Playful  │ bark on a random interval until petted   │   │
//! │  │ Angry    │ growl, bark, forget a pet                │   │
//! │  │ Hungry   │ whine until fed (or petted → Angry)      │   │
//! │  │ Bathroom │ lift a leg, empty the stomach            │   │
//! │  │ Happy    │ hop around, then reset the mood          │   │
//! │  └──────────┴──────────────────────────────────────────┘   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine consumes the "changed" latch of [`BehaviorState`]
//! and passes it to the current behavior's step as `entered`.  A step runs
//! its entry sequence when `entered` is true and its per-tick logic every
//! time.  Returning `Some(next)` writes `next` into the state; the entry of
//! `next` runs on the following tick.

pub mod context;
pub mod states;

use context::PuppyContext;
use log::info;

use crate::app::ports::{PuppyHardware, RandomSource};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Behavior identity
// ---------------------------------------------------------------------------

/// Enumeration of every behavior the puppy can be in.
/// Must stay in sync with the table built in [`states::build_behavior_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BehaviorId {
    Idle = 0,
    Sleeping = 1,
    WakingUp = 2,
    Playful = 3,
    Angry = 4,
    Hungry = 5,
    Bathroom = 6,
    Happy = 7,
}

impl BehaviorId {
    /// Total number of behaviors, used to size the table array.
    pub const COUNT: usize = 8;

    pub const ALL: [BehaviorId; Self::COUNT] = [
        Self::Idle,
        Self::Sleeping,
        Self::WakingUp,
        Self::Playful,
        Self::Angry,
        Self::Hungry,
        Self::Bathroom,
        Self::Happy,
    ];
}

// ---------------------------------------------------------------------------
// Edge-triggered behavior latch
// ---------------------------------------------------------------------------

/// The active behavior plus a "changed since last read" latch.
///
/// The latch is raised by any write that differs from the current value and
/// can only be observed through [`take_changed`](Self::take_changed), which
/// clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviorState {
    current: BehaviorId,
    changed: bool,
}

impl BehaviorState {
    /// Starts in `initial` with the latch raised, so the first read sees an
    /// entry.
    pub fn new(initial: BehaviorId) -> Self {
        Self {
            current: initial,
            changed: true,
        }
    }

    pub fn current(&self) -> BehaviorId {
        self.current
    }

    /// Write `next`.  Returns whether the value actually changed.
    pub fn set(&mut self, next: BehaviorId) -> bool {
        if next == self.current {
            return false;
        }
        self.current = next;
        self.changed = true;
        true
    }

    /// Read and clear the latch.
    pub fn take_changed(&mut self) -> bool {
        core::mem::replace(&mut self.changed, false)
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature of a behavior step.
///
/// `entered` is true on the first tick after a transition into this
/// behavior.  Returns `Some(next)` to request a transition.
pub type BehaviorStepFn<H, R> =
    fn(&mut PuppyContext<R>, &mut H, bool) -> Result<Option<BehaviorId>>;

// ---------------------------------------------------------------------------
// Behavior descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single behavior.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct BehaviorDescriptor<H, R> {
    pub id: BehaviorId,
    pub name: &'static str,
    pub step: BehaviorStepFn<H, R>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The behavior state machine.
///
/// Owns the table and the [`BehaviorState`]; the [`PuppyContext`] and the
/// hardware are threaded through every step call.
pub struct Fsm<H, R> {
    /// Fixed-size table indexed by `BehaviorId as usize`.
    table: [BehaviorDescriptor<H, R>; BehaviorId::COUNT],
    state: BehaviorState,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current behavior was entered.
    state_entry_tick: u64,
}

impl<H, R> Fsm<H, R>
where
    H: PuppyHardware,
    R: RandomSource,
{
    /// Construct an FSM starting in `initial`.  Its entry runs on the
    /// first tick.
    pub fn new(table: [BehaviorDescriptor<H, R>; BehaviorId::COUNT], initial: BehaviorId) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "behavior table out of order"
        );
        Self {
            table,
            state: BehaviorState::new(initial),
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Consume the changed latch.
    /// 2. Run the current behavior's step.
    /// 3. Apply the requested transition, if any.
    pub fn tick(&mut self, ctx: &mut PuppyContext<R>, hw: &mut H) -> Result<()> {
        self.tick_count += 1;
        let entered = self.state.take_changed();
        if entered {
            self.state_entry_tick = self.tick_count;
        }
        let current = self.state.current();

        let next = (self.table[current as usize].step)(ctx, hw, entered)?;

        if let Some(next_id) = next {
            self.transition(next_id);
        }
        Ok(())
    }

    /// Force a transition from outside the behaviors (the inactivity
    /// monitor).  Forcing the active behavior does nothing.
    pub fn force_transition(&mut self, next: BehaviorId) -> bool {
        self.transition(next)
    }

    /// The current behavior.
    pub fn current_behavior(&self) -> BehaviorId {
        self.state.current()
    }

    /// How many ticks the FSM has spent in the current behavior.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: BehaviorId) -> bool {
        let from = self.state.current();
        if !self.state.set(next_id) {
            return false;
        }
        info!(
            "behavior: {} -> {}",
            self.table[from as usize].name, self.table[next_id as usize].name
        );
        true
    }
}
