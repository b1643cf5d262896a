//! Mock puppy for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history, runs on a virtual clock that only moves when the controller
//! waits, and lets tests set the sensors directly.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use robopup::app::events::AppEvent;
use robopup::app::ports::{
    Button, ButtonInput, ButtonSet, Clock, Color, ColorInput, Display, EventSink, HeadMotor,
    Image, LegMotor, LightColor, PuppyHardware, RandomSource, Sound, Speaker, StatusLight,
    TouchInput, button_set,
};
use robopup::fsm::BehaviorId;
use robopup::motion::Side;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HwCall {
    LegRun { side: Side, speed: i32 },
    LegTarget { side: Side, speed: i32, angle: i32 },
    LegStop(Side),
    LegHold(Side),
    LegReset(Side),
    HeadRun(i32),
    HeadTarget(i32),
    HeadStop,
    HeadReset,
    Show(Image),
    Play(Sound),
    Light(LightColor),
}

type CallLog = Rc<RefCell<Vec<HwCall>>>;

// ── Motors ────────────────────────────────────────────────────

pub struct MockLeg {
    side: Side,
    log: CallLog,
    angle: i32,
    target: Option<i32>,
    stuck: bool,
}

impl LegMotor for MockLeg {
    fn run(&mut self, speed: i32) {
        self.log.borrow_mut().push(HwCall::LegRun {
            side: self.side,
            speed,
        });
        self.target = None;
    }

    fn run_target(&mut self, speed: i32, angle: i32, _blocking: bool) {
        self.log.borrow_mut().push(HwCall::LegTarget {
            side: self.side,
            speed,
            angle,
        });
        self.target = Some(angle);
        if !self.stuck {
            self.angle = angle;
        }
    }

    fn stop(&mut self) {
        self.log.borrow_mut().push(HwCall::LegStop(self.side));
    }

    fn hold(&mut self) {
        self.log.borrow_mut().push(HwCall::LegHold(self.side));
    }

    fn reset_angle(&mut self, angle: i32) {
        self.log.borrow_mut().push(HwCall::LegReset(self.side));
        self.angle = angle;
        self.target = None;
    }

    fn is_target_reached(&mut self) -> bool {
        self.target.is_none_or(|t| t == self.angle)
    }
}

pub struct MockHead {
    log: CallLog,
}

impl HeadMotor for MockHead {
    fn run(&mut self, speed: i32) {
        self.log.borrow_mut().push(HwCall::HeadRun(speed));
    }

    fn run_target(&mut self, _speed: i32, angle: i32) {
        self.log.borrow_mut().push(HwCall::HeadTarget(angle));
    }

    fn stop(&mut self) {
        self.log.borrow_mut().push(HwCall::HeadStop);
    }

    fn reset_angle(&mut self, _angle: i32) {
        self.log.borrow_mut().push(HwCall::HeadReset);
    }
}

// ── MockPuppy ─────────────────────────────────────────────────

pub struct MockPuppy {
    pub touch: bool,
    pub color: Option<Color>,
    buttons: ButtonSet,
    now_ms: u64,
    log: CallLog,
    left: MockLeg,
    right: MockLeg,
    head: MockHead,
}

#[allow(dead_code)]
impl MockPuppy {
    /// A puppy with Center held, so head calibration finishes at once.
    pub fn new() -> Self {
        let log = CallLog::default();
        let leg = |side| MockLeg {
            side,
            log: Rc::clone(&log),
            angle: 0,
            target: None,
            stuck: false,
        };
        Self {
            touch: false,
            color: None,
            buttons: button_set(&[Button::Center]),
            now_ms: 0,
            left: leg(Side::Left),
            right: leg(Side::Right),
            head: MockHead {
                log: Rc::clone(&log),
            },
            log,
        }
    }

    pub fn press(&mut self, buttons: &[Button]) {
        self.buttons = button_set(buttons);
    }

    pub fn release_buttons(&mut self) {
        self.buttons = ButtonSet::new();
    }

    pub fn jam(&mut self, side: Side) {
        match side {
            Side::Left => self.left.stuck = true,
            Side::Right => self.right.stuck = true,
        }
    }

    pub fn calls(&self) -> Vec<HwCall> {
        self.log.borrow().clone()
    }

    pub fn clear_calls(&mut self) {
        self.log.borrow_mut().clear();
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.log
            .borrow()
            .iter()
            .filter_map(|c| match c {
                HwCall::Play(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn played(&self, sound: Sound) -> usize {
        self.sounds().iter().filter(|s| **s == sound).count()
    }
}

impl Default for MockPuppy {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchInput for MockPuppy {
    fn is_pressed(&mut self) -> bool {
        self.touch
    }
}

impl ColorInput for MockPuppy {
    fn detected_color(&mut self) -> Option<Color> {
        self.color
    }
}

impl ButtonInput for MockPuppy {
    fn pressed_set(&mut self) -> ButtonSet {
        self.buttons.clone()
    }
}

impl Display for MockPuppy {
    fn show(&mut self, image: Image) {
        self.log.borrow_mut().push(HwCall::Show(image));
    }
}

impl Speaker for MockPuppy {
    fn play(&mut self, sound: Sound) {
        self.log.borrow_mut().push(HwCall::Play(sound));
    }
}

impl StatusLight for MockPuppy {
    fn set_light(&mut self, color: LightColor) {
        self.log.borrow_mut().push(HwCall::Light(color));
    }
}

impl Clock for MockPuppy {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn wait_ms(&mut self, ms: u32) {
        self.now_ms += u64::from(ms);
    }
}

impl PuppyHardware for MockPuppy {
    type Leg = MockLeg;
    type Head = MockHead;

    fn leg(&mut self, side: Side) -> &mut MockLeg {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn head(&mut self) -> &mut MockHead {
        &mut self.head
    }
}

// ── ScriptedRandom ────────────────────────────────────────────

/// Hands out queued values; falls back to the low end once empty.
#[derive(Default)]
pub struct ScriptedRandom {
    queue: VecDeque<u32>,
}

impl ScriptedRandom {
    pub fn new(values: &[u32]) -> Self {
        Self {
            queue: values.iter().copied().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, lo: u32, hi: u32) -> u32 {
        match self.queue.pop_front() {
            Some(v) => {
                assert!((lo..=hi).contains(&v), "scripted {v} outside {lo}..={hi}");
                v
            }
            None => lo,
        }
    }
}

// ── Recording sink ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every behavior change, in order.
    pub fn transitions(&self) -> Vec<(BehaviorId, BehaviorId)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::BehaviorChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
