//! Eye expressions and the idle blink/glance animation.
//!
//! Behaviors set an expression explicitly; redundant sets never redraw the
//! screen.  While idling, two independent timers animate the eyes:
//!
//! | Layer  | Fires when                       | Effect                                   |
//! |--------|----------------------------------|------------------------------------------|
//! | Blink  | blink deadline passed            | closed → TiredRight (next: 1–5 s); else → Sleeping (next: 250 ms) |
//! | Glance | glance deadline passed, eyes open | toggle TiredLeft / TiredRight (next: 1–10 s) |

use crate::app::ports::{Display, Image, RandomSource};
use crate::config::PuppyConfig;
use crate::timing::Stopwatch;

/// Everything the screen can show in place of eyes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expression {
    Neutral,
    Tired,
    TiredLeft,
    TiredRight,
    Sleeping,
    Hurt,
    Angry,
    Heart,
    Squinty,
}

/// Owner of the current expression and the idle animation timers.
#[derive(Debug, Clone, Default)]
pub struct ExpressionController {
    current: Option<Expression>,
    blink: Stopwatch,
    blink_deadline_ms: u64,
    glance: Stopwatch,
    glance_deadline_ms: u64,
}

impl ExpressionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expression currently on screen (`None` before the first draw).
    pub fn current(&self) -> Option<Expression> {
        self.current
    }

    /// Show `expression`.  Draws only when it differs from what is on
    /// screen; returns whether a draw happened.
    pub fn set(&mut self, expression: Expression, display: &mut impl Display) -> bool {
        if self.current == Some(expression) {
            return false;
        }
        self.current = Some(expression);
        display.show(Image::Eyes(expression));
        true
    }

    /// Advance the idle blink and glance layers.
    pub fn tick_idle_animation(
        &mut self,
        now_ms: u64,
        config: &PuppyConfig,
        rng: &mut impl RandomSource,
        display: &mut impl Display,
    ) {
        if self.blink.exceeded(now_ms, self.blink_deadline_ms) {
            self.blink.reset(now_ms);
            if self.current == Some(Expression::Sleeping) {
                let (lo, hi) = config.blink_open_range_s;
                self.blink_deadline_ms = u64::from(rng.uniform_int(lo, hi)) * 1000;
                self.set(Expression::TiredRight, display);
            } else {
                self.blink_deadline_ms = config.blink_closed_ms;
                self.set(Expression::Sleeping, display);
            }
        }

        if self.glance.exceeded(now_ms, self.glance_deadline_ms) {
            self.glance.reset(now_ms);
            if self.current != Some(Expression::Sleeping) {
                let (lo, hi) = config.glance_range_s;
                self.glance_deadline_ms = u64::from(rng.uniform_int(lo, hi)) * 1000;
                if self.current == Some(Expression::TiredLeft) {
                    self.set(Expression::TiredRight, display);
                } else {
                    self.set(Expression::TiredLeft, display);
                }
            }
        }
    }
}
