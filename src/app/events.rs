//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::counters::{CountCause, CountChange, CounterKind};
use crate::expression::Expression;
use crate::fsm::BehaviorId;
use crate::motion::Pose;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(MoodSnapshot),

    /// The active behavior changed.
    BehaviorChanged { from: BehaviorId, to: BehaviorId },

    /// A petting or feeding count moved.
    CountChanged {
        counter: CounterKind,
        count: u32,
        target: u32,
        cause: CountCause,
    },

    /// Counts back to one with freshly drawn targets.
    MoodReset { pet_target: u32, feed_target: u32 },

    /// Nothing happened for too long; the puppy was sent to sleep.
    FellAsleep,

    /// The application service has started (carries initial behavior).
    Started(BehaviorId),
}

impl From<CountChange> for AppEvent {
    fn from(c: CountChange) -> Self {
        Self::CountChanged {
            counter: c.counter,
            count: c.count,
            target: c.target,
            cause: c.cause,
        }
    }
}

/// A point-in-time view of the puppy's mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodSnapshot {
    pub behavior: BehaviorId,
    pub pet_count: u32,
    pub pet_target: u32,
    pub feed_count: u32,
    pub feed_target: u32,
    pub expression: Option<Expression>,
    pub pose: Pose,
    /// Milliseconds since either count last changed.
    pub idle_ms: u64,
}
