//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr via `env_logger` in the binary).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | behavior={:?} | pet={}/{} feed={}/{} | eyes={:?} pose={:?} | idle={}ms",
                    t.behavior,
                    t.pet_count,
                    t.pet_target,
                    t.feed_count,
                    t.feed_target,
                    t.expression,
                    t.pose,
                    t.idle_ms,
                );
            }
            AppEvent::BehaviorChanged { from, to } => {
                info!("BEHAVIOR | {:?} -> {:?}", from, to);
            }
            AppEvent::CountChanged {
                counter,
                count,
                target,
                cause,
            } => {
                info!("COUNT | {:?} {}/{} ({:?})", counter, count, target, cause);
            }
            AppEvent::MoodReset {
                pet_target,
                feed_target,
            } => {
                info!("RESET | pet_target={} feed_target={}", pet_target, feed_target);
            }
            AppEvent::FellAsleep => {
                info!("SLEEP | no activity");
            }
            AppEvent::Started(state) => {
                info!("START | initial_behavior={:?}", state);
            }
        }
    }
}
