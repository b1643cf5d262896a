//! Port traits — the hexagonal boundary between puppy logic and the robot.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, motors, screen, speaker, clock, randomness,
//! event sinks) implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the behavior core never touches a device
//! directly.

use crate::app::events::AppEvent;
use crate::expression::Expression;
use crate::motion::Side;

// ───────────────────────────────────────────────────────────────
// Sensor vocabulary
// ───────────────────────────────────────────────────────────────

/// Colors the color sensor can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Blue,
    Green,
    Yellow,
    Red,
    White,
    Brown,
}

impl Color {
    /// Reading of the empty mouth; never counts as food.
    pub const BACKGROUND: Color = Color::Black;
}

/// Brick buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Up,
    Down,
    Center,
}

/// Set of buttons held down at the moment of the read.
pub type ButtonSet = heapless::FnvIndexSet<Button, 8>;

/// Build a [`ButtonSet`] from a slice.
pub fn button_set(buttons: &[Button]) -> ButtonSet {
    let mut set = ButtonSet::new();
    for b in buttons {
        // Capacity exceeds the number of distinct buttons.
        let _ = set.insert(*b);
    }
    set
}

// ───────────────────────────────────────────────────────────────
// Actuator vocabulary
// ───────────────────────────────────────────────────────────────

/// Sound clips the speaker can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Snoring,
    DogWhine,
    DogBark1,
    DogBark2,
    DogGrowl,
    DogSniff,
    Crunching,
    Horn,
}

/// Colors of the brick status light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightColor {
    Orange,
    Green,
}

/// What the screen can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Image {
    /// A pair of eyes.
    Eyes(Expression),
    /// The brick logo, shown during head calibration.
    BrickIcon,
}

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Touch sensor on the puppy's head.
pub trait TouchInput {
    fn is_pressed(&mut self) -> bool;
}

/// Color sensor in the puppy's mouth.
pub trait ColorInput {
    /// `None` when nothing is recognised.
    fn detected_color(&mut self) -> Option<Color>;
}

/// Brick buttons.
pub trait ButtonInput {
    fn pressed_set(&mut self) -> ButtonSet;
}

// ───────────────────────────────────────────────────────────────
// Actuator ports (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// One rear-leg motor.  Angles are degrees, speeds deg/s.
pub trait LegMotor {
    /// Run at constant speed until told otherwise.
    fn run(&mut self, speed: i32);
    /// Move to an absolute angle.  With `blocking` the call returns only
    /// once the driver reports the move done.
    fn run_target(&mut self, speed: i32, angle: i32, blocking: bool);
    /// Coast.
    fn stop(&mut self);
    /// Actively hold the current angle.
    fn hold(&mut self);
    /// Declare the current position to be `angle`.
    fn reset_angle(&mut self, angle: i32);
    /// Whether the last `run_target` has completed.
    fn is_target_reached(&mut self) -> bool;
}

/// Head motor (worm-geared, so `run_target` always blocks).
pub trait HeadMotor {
    fn run(&mut self, speed: i32);
    fn run_target(&mut self, speed: i32, angle: i32);
    fn stop(&mut self);
    fn reset_angle(&mut self, angle: i32);
}

/// Screen where the eyes are drawn.
pub trait Display {
    fn show(&mut self, image: Image);
}

/// Speaker.  Fire-and-forget.
pub trait Speaker {
    fn play(&mut self, sound: Sound);
}

/// Brick status light.
pub trait StatusLight {
    fn set_light(&mut self, color: LightColor);
}

// ───────────────────────────────────────────────────────────────
// Time and randomness
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.  `wait_ms` is the only place the control loop
/// blocks; the motors keep moving while it does.
pub trait Clock {
    fn now_ms(&self) -> u64;
    fn wait_ms(&mut self, ms: u32);
}

/// Uniform integer source.
pub trait RandomSource {
    /// Draw from `lo..=hi`.
    fn uniform_int(&mut self, lo: u32, hi: u32) -> u32;
}

// ───────────────────────────────────────────────────────────────
// The whole robot
// ───────────────────────────────────────────────────────────────

/// Every device the puppy has, behind one handle.
///
/// Behaviors receive `&mut impl PuppyHardware`; the clock lives here because
/// every wait is a physical wait on the motors.
pub trait PuppyHardware:
    TouchInput + ColorInput + ButtonInput + Display + Speaker + StatusLight + Clock
{
    type Leg: LegMotor;
    type Head: HeadMotor;

    fn leg(&mut self, side: Side) -> &mut Self::Leg;
    fn head(&mut self) -> &mut Self::Head;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
