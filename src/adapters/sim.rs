//! Simulated puppy — every hardware port in one host-side struct.
//!
//! Sensors replay a scripted stimulus timeline keyed on the clock, so a
//! scenario like "pet at 12 s, feed red at 20 s" runs identically against
//! the wall clock (demo binary) and against a [`VirtualClock`] (tests).
//! Actuation is recorded and logged at debug level.
//!
//! Legs arrive at their target instantly unless jammed, in which case
//! `is_target_reached` never turns true.

use log::debug;

use crate::adapters::time::{SystemClock, VirtualClock};
use crate::app::ports::{
    Button, ButtonInput, ButtonSet, Clock, Color, ColorInput, Display, HeadMotor, Image,
    LegMotor, LightColor, PuppyHardware, Sound, Speaker, StatusLight, TouchInput, button_set,
};
use crate::motion::Side;

/// One scripted change to what the sensors read.
#[derive(Debug, Clone)]
pub enum Stimulus {
    Touch(bool),
    Color(Option<Color>),
    Buttons(ButtonSet),
}

// ── Motors ────────────────────────────────────────────────────

/// Simulated leg motor.  Reaches any target at once unless jammed.
#[derive(Debug, Clone, Default)]
pub struct SimLeg {
    side: Option<Side>,
    angle: i32,
    target: Option<i32>,
    jammed: bool,
}

impl SimLeg {
    fn new(side: Side) -> Self {
        Self {
            side: Some(side),
            ..Self::default()
        }
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }
}

impl LegMotor for SimLeg {
    fn run(&mut self, speed: i32) {
        debug!("sim: {:?} leg run {speed}", self.side);
        self.target = None;
    }

    fn run_target(&mut self, speed: i32, angle: i32, _blocking: bool) {
        debug!("sim: {:?} leg to {angle}° at {speed}", self.side);
        self.target = Some(angle);
        if !self.jammed {
            self.angle = angle;
        }
    }

    fn stop(&mut self) {
        debug!("sim: {:?} leg stop", self.side);
    }

    fn hold(&mut self) {
        debug!("sim: {:?} leg hold", self.side);
    }

    fn reset_angle(&mut self, angle: i32) {
        self.angle = angle;
        self.target = None;
    }

    fn is_target_reached(&mut self) -> bool {
        self.target.is_none_or(|t| t == self.angle)
    }
}

/// Simulated head motor.
#[derive(Debug, Clone, Default)]
pub struct SimHead {
    angle: i32,
}

impl SimHead {
    pub fn angle(&self) -> i32 {
        self.angle
    }
}

impl HeadMotor for SimHead {
    fn run(&mut self, speed: i32) {
        debug!("sim: head run {speed}");
    }

    fn run_target(&mut self, speed: i32, angle: i32) {
        debug!("sim: head to {angle}° at {speed}");
        self.angle = angle;
    }

    fn stop(&mut self) {
        debug!("sim: head stop");
    }

    fn reset_angle(&mut self, angle: i32) {
        self.angle = angle;
    }
}

// ── The puppy ─────────────────────────────────────────────────

/// Host-side stand-in for the robot.
#[derive(Debug, Clone)]
pub struct SimulatedPuppy<C = VirtualClock> {
    clock: C,
    script: Vec<(u64, Stimulus)>,
    cursor: usize,
    touch: bool,
    color: Option<Color>,
    buttons: ButtonSet,
    left: SimLeg,
    right: SimLeg,
    head: SimHead,
    images: Vec<Image>,
    sounds: Vec<Sound>,
    light: Option<LightColor>,
}

impl SimulatedPuppy<VirtualClock> {
    /// Puppy on a clock that only moves when the controller waits.
    pub fn virtual_time() -> Self {
        Self::with_clock(VirtualClock::new())
    }
}

impl SimulatedPuppy<SystemClock> {
    /// Puppy on the wall clock.
    pub fn realtime() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl<C: Clock> SimulatedPuppy<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            script: Vec::new(),
            cursor: 0,
            touch: false,
            color: None,
            buttons: ButtonSet::new(),
            left: SimLeg::new(Side::Left),
            right: SimLeg::new(Side::Right),
            head: SimHead::default(),
            images: Vec::new(),
            sounds: Vec::new(),
            light: None,
        }
    }

    // ── Scripting ─────────────────────────────────────────────

    /// Schedule a stimulus at `at_ms`.  Entries at the same instant apply
    /// in insertion order.
    pub fn script(&mut self, at_ms: u64, stimulus: Stimulus) {
        let pos = self.script[self.cursor..]
            .iter()
            .position(|(t, _)| *t > at_ms)
            .map_or(self.script.len(), |p| p + self.cursor);
        self.script.insert(pos, (at_ms, stimulus));
    }

    pub fn script_touch(&mut self, at_ms: u64, pressed: bool) {
        self.script(at_ms, Stimulus::Touch(pressed));
    }

    /// Press the touch sensor at `at_ms` and let go `hold_ms` later.
    pub fn script_pet(&mut self, at_ms: u64, hold_ms: u64) {
        self.script_touch(at_ms, true);
        self.script_touch(at_ms + hold_ms, false);
    }

    pub fn script_color(&mut self, at_ms: u64, color: Option<Color>) {
        self.script(at_ms, Stimulus::Color(color));
    }

    /// Hold `color` in front of the mouth for `hold_ms`.
    pub fn script_feed(&mut self, at_ms: u64, color: Color, hold_ms: u64) {
        self.script_color(at_ms, Some(color));
        self.script_color(at_ms + hold_ms, None);
    }

    pub fn script_buttons(&mut self, at_ms: u64, buttons: &[Button]) {
        self.script(at_ms, Stimulus::Buttons(button_set(buttons)));
    }

    /// Stop a leg from ever reaching its target.
    pub fn jam_leg(&mut self, side: Side) {
        match side {
            Side::Left => self.left.jammed = true,
            Side::Right => self.right.jammed = true,
        }
    }

    fn apply_due(&mut self) {
        let now = self.clock.now_ms();
        while let Some((at, stimulus)) = self.script.get(self.cursor) {
            if *at > now {
                break;
            }
            debug!("sim: t={now} ms stimulus {stimulus:?}");
            match stimulus {
                Stimulus::Touch(p) => self.touch = *p,
                Stimulus::Color(c) => self.color = *c,
                Stimulus::Buttons(b) => self.buttons = b.clone(),
            }
            self.cursor += 1;
        }
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn leg_angle(&self, side: Side) -> i32 {
        match side {
            Side::Left => self.left.angle(),
            Side::Right => self.right.angle(),
        }
    }

    pub fn head_angle(&self) -> i32 {
        self.head.angle()
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn sounds(&self) -> &[Sound] {
        &self.sounds
    }

    pub fn light(&self) -> Option<LightColor> {
        self.light
    }
}

// ── Port implementations ──────────────────────────────────────

impl<C: Clock> TouchInput for SimulatedPuppy<C> {
    fn is_pressed(&mut self) -> bool {
        self.apply_due();
        self.touch
    }
}

impl<C: Clock> ColorInput for SimulatedPuppy<C> {
    fn detected_color(&mut self) -> Option<Color> {
        self.apply_due();
        self.color
    }
}

impl<C: Clock> ButtonInput for SimulatedPuppy<C> {
    fn pressed_set(&mut self) -> ButtonSet {
        self.apply_due();
        self.buttons.clone()
    }
}

impl<C: Clock> Display for SimulatedPuppy<C> {
    fn show(&mut self, image: Image) {
        debug!("sim: screen {image:?}");
        self.images.push(image);
    }
}

impl<C: Clock> Speaker for SimulatedPuppy<C> {
    fn play(&mut self, sound: Sound) {
        debug!("sim: speaker {sound:?}");
        self.sounds.push(sound);
    }
}

impl<C: Clock> StatusLight for SimulatedPuppy<C> {
    fn set_light(&mut self, color: LightColor) {
        debug!("sim: light {color:?}");
        self.light = Some(color);
    }
}

impl<C: Clock> Clock for SimulatedPuppy<C> {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn wait_ms(&mut self, ms: u32) {
        self.clock.wait_ms(ms);
    }
}

impl<C: Clock> PuppyHardware for SimulatedPuppy<C> {
    type Leg = SimLeg;
    type Head = SimHead;

    fn leg(&mut self, side: Side) -> &mut SimLeg {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn head(&mut self) -> &mut SimHead {
        &mut self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stimuli_apply_when_their_time_comes() {
        let mut sim = SimulatedPuppy::virtual_time();
        sim.script_pet(1_000, 200);
        assert!(!sim.is_pressed());
        sim.wait_ms(1_000);
        assert!(sim.is_pressed());
        sim.wait_ms(199);
        assert!(sim.is_pressed());
        sim.wait_ms(1);
        assert!(!sim.is_pressed());
    }

    #[test]
    fn late_script_entries_are_ordered() {
        let mut sim = SimulatedPuppy::virtual_time();
        sim.script_color(500, Some(Color::Red));
        sim.script_color(100, Some(Color::Blue));
        sim.wait_ms(200);
        assert_eq!(sim.detected_color(), Some(Color::Blue));
        sim.wait_ms(400);
        assert_eq!(sim.detected_color(), Some(Color::Red));
    }

    #[test]
    fn jammed_leg_never_arrives() {
        let mut sim = SimulatedPuppy::virtual_time();
        sim.jam_leg(Side::Left);
        sim.leg(Side::Left).run_target(100, 65, false);
        sim.leg(Side::Right).run_target(100, 65, false);
        assert!(!sim.leg(Side::Left).is_target_reached());
        assert!(sim.leg(Side::Right).is_target_reached());
        assert_eq!(sim.leg_angle(Side::Right), 65);
    }

    #[test]
    fn actuation_is_recorded() {
        let mut sim = SimulatedPuppy::virtual_time();
        sim.play(Sound::Horn);
        sim.show(Image::BrickIcon);
        sim.set_light(LightColor::Orange);
        assert_eq!(sim.sounds(), &[Sound::Horn]);
        assert_eq!(sim.images(), &[Image::BrickIcon]);
        assert_eq!(sim.light(), Some(LightColor::Orange));
    }
}
