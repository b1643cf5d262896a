//! End-to-end puppy flows: AppService → monitor → FSM → mock robot.
//!
//! Each test drives the service the way the main loop does (`step` with a
//! 100 ms wait) on a virtual clock, so half a minute of puppy life runs in
//! a few milliseconds.

use super::mock_hw::{HwCall, MockPuppy, RecordingSink, ScriptedRandom};

use robopup::app::events::AppEvent;
use robopup::app::ports::{Button, Clock, Color, Sound};
use robopup::app::service::AppService;
use robopup::config::PuppyConfig;
use robopup::error::{Error, MotionError};
use robopup::fsm::BehaviorId;
use robopup::motion::{Joint, Pose, Side};

type App = AppService<MockPuppy, ScriptedRandom>;

/// Started service with the given targets; Center released after start.
fn make_app(pet_target: u32, feed_target: u32) -> (App, MockPuppy, RecordingSink) {
    let mut app = AppService::new(
        PuppyConfig::default(),
        ScriptedRandom::new(&[pet_target, feed_target]),
    );
    let mut hw = MockPuppy::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink).unwrap();
    hw.release_buttons();
    (app, hw, sink)
}

fn step(app: &mut App, hw: &mut MockPuppy, sink: &mut RecordingSink) {
    app.step(hw, sink).unwrap();
}

/// Step until `behavior` is active, failing after `max_steps`.
fn step_until(
    app: &mut App,
    hw: &mut MockPuppy,
    sink: &mut RecordingSink,
    behavior: BehaviorId,
    max_steps: usize,
) {
    for _ in 0..max_steps {
        if app.state() == behavior {
            return;
        }
        step(app, hw, sink);
    }
    panic!(
        "never reached {behavior:?} in {max_steps} steps, stuck in {:?}",
        app.state()
    );
}

fn pet(app: &mut App, hw: &mut MockPuppy, sink: &mut RecordingSink) {
    hw.touch = true;
    step(app, hw, sink);
    hw.touch = false;
    step(app, hw, sink);
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_sits_calibrates_and_resets() {
    let (app, hw, sink) = make_app(3, 2);

    let calls = hw.calls();
    assert!(calls.contains(&HwCall::LegReset(Side::Left)));
    assert!(calls.contains(&HwCall::LegReset(Side::Right)));
    assert!(calls.contains(&HwCall::HeadReset));

    assert_eq!(
        sink.events,
        vec![
            AppEvent::MoodReset {
                pet_target: 3,
                feed_target: 2
            },
            AppEvent::Started(BehaviorId::Idle),
        ]
    );
    assert_eq!(app.context().body.pose(), Pose::Seated);
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn feed_once_pet_twice_makes_the_puppy_happy() {
    let (mut app, mut hw, mut sink) = make_app(3, 2);

    step(&mut app, &mut hw, &mut sink); // Idle entry: stand up
    assert_eq!(app.context().body.pose(), Pose::Standing);

    hw.color = Some(Color::Red);
    step(&mut app, &mut hw, &mut sink);
    hw.color = None;
    pet(&mut app, &mut hw, &mut sink);
    pet(&mut app, &mut hw, &mut sink);

    let m = app.context().counters.counts();
    assert_eq!((m.pet_count, m.feed_count), (3, 2));

    step_until(&mut app, &mut hw, &mut sink, BehaviorId::Happy, 3);
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.state(), BehaviorId::Idle);

    let m = app.context().counters.counts();
    assert_eq!((m.pet_count, m.feed_count), (1, 1));
    assert_eq!(
        sink.transitions(),
        vec![
            (BehaviorId::Idle, BehaviorId::Happy),
            (BehaviorId::Happy, BehaviorId::Idle),
        ]
    );
    assert_eq!(hw.played(Sound::DogBark1), 3);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::MoodReset { .. })),
        2,
        "startup reset plus the happy reset"
    );
}

#[test]
fn every_new_pet_sniffs_and_every_meal_crunches() {
    let (mut app, mut hw, mut sink) = make_app(6, 4);
    step(&mut app, &mut hw, &mut sink);

    pet(&mut app, &mut hw, &mut sink);
    hw.color = Some(Color::Green);
    step(&mut app, &mut hw, &mut sink);
    step(&mut app, &mut hw, &mut sink);

    assert_eq!(hw.played(Sound::DogSniff), 1);
    assert_eq!(hw.played(Sound::Crunching), 1, "held color counts once");
}

// ── Inactivity ────────────────────────────────────────────────

#[test]
fn inactivity_puts_the_puppy_to_sleep_and_the_gesture_wakes_it() {
    let (mut app, mut hw, mut sink) = make_app(3, 2);

    step_until(&mut app, &mut hw, &mut sink, BehaviorId::Sleeping, 1_000);
    assert!(sink.events.contains(&AppEvent::FellAsleep));
    assert_eq!(hw.played(Sound::Snoring), 1);
    let asleep_at = hw.now_ms();
    assert!(asleep_at > 30_000, "slept too early at {asleep_at} ms");

    // Either half of the gesture alone does nothing.
    hw.touch = true;
    for _ in 0..5 {
        step(&mut app, &mut hw, &mut sink);
    }
    assert_eq!(app.state(), BehaviorId::Sleeping);
    hw.touch = false;
    hw.press(&[Button::Center]);
    for _ in 0..5 {
        step(&mut app, &mut hw, &mut sink);
    }
    assert_eq!(app.state(), BehaviorId::Sleeping);

    // Both together.
    hw.touch = true;
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.state(), BehaviorId::WakingUp);
    hw.touch = false;
    hw.release_buttons();
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.state(), BehaviorId::Idle);

    let t = sink.transitions();
    assert!(t.contains(&(BehaviorId::Sleeping, BehaviorId::WakingUp)));
    assert!(t.contains(&(BehaviorId::WakingUp, BehaviorId::Idle)));
}

#[test]
fn sleeping_puppy_is_not_put_to_sleep_twice() {
    let (mut app, mut hw, mut sink) = make_app(3, 2);
    step_until(&mut app, &mut hw, &mut sink, BehaviorId::Sleeping, 1_000);
    for _ in 0..700 {
        step(&mut app, &mut hw, &mut sink);
    }
    assert_eq!(app.state(), BehaviorId::Sleeping);
    assert_eq!(hw.played(Sound::Snoring), 1);
    assert_eq!(sink.count(|e| *e == AppEvent::FellAsleep), 1);
}

// ── Hungry / Angry ────────────────────────────────────────────

#[test]
fn starving_puppy_gets_angry_when_petted_instead_of_fed() {
    let (mut app, mut hw, mut sink) = make_app(4, 2);

    // Both counts decay to zero after 15 s; empty stomach means hungry.
    step_until(&mut app, &mut hw, &mut sink, BehaviorId::Hungry, 400);
    step(&mut app, &mut hw, &mut sink); // Hungry entry
    assert_eq!(app.context().body.pose(), Pose::Seated);

    pet(&mut app, &mut hw, &mut sink);
    assert!(
        sink.transitions()
            .contains(&(BehaviorId::Hungry, BehaviorId::Angry))
    );
    assert_eq!(hw.played(Sound::DogSniff), 0, "hungry puppies don't sniff");
    assert_eq!(hw.played(Sound::DogGrowl), 1);
    assert_eq!(app.context().counters.pet_count(), 0, "angry forgets the pet");
}

#[test]
fn hungry_puppy_is_content_once_fed() {
    let (mut app, mut hw, mut sink) = make_app(4, 2);
    step_until(&mut app, &mut hw, &mut sink, BehaviorId::Hungry, 400);
    step(&mut app, &mut hw, &mut sink);

    hw.color = Some(Color::Blue);
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(app.state(), BehaviorId::Idle);
    assert_eq!(app.context().counters.feed_count(), 1);
}

// ── Bathroom ──────────────────────────────────────────────────

#[test]
fn overfed_puppy_goes_to_the_bathroom() {
    let (mut app, mut hw, mut sink) = make_app(4, 2);
    let cfg = app.config().clone();
    step(&mut app, &mut hw, &mut sink);

    hw.color = Some(Color::Red);
    step(&mut app, &mut hw, &mut sink);
    hw.color = Some(Color::Blue);
    step(&mut app, &mut hw, &mut sink);
    hw.color = None;

    step_until(&mut app, &mut hw, &mut sink, BehaviorId::Bathroom, 3);
    hw.clear_calls();
    step(&mut app, &mut hw, &mut sink);

    assert_eq!(app.state(), BehaviorId::Idle);
    assert_eq!(app.context().counters.feed_count(), 1);
    assert_eq!(hw.played(Sound::Horn), 1);

    let right_targets: Vec<i32> = hw
        .calls()
        .iter()
        .filter_map(|c| match c {
            HwCall::LegTarget {
                side: Side::Right,
                angle,
                ..
            } => Some(*angle),
            _ => None,
        })
        .collect();
    let lift = cfg.stretch_angle;
    let up = lift + cfg.wiggle_angle;
    assert_eq!(
        right_targets,
        vec![
            cfg.half_up_angle,
            cfg.stand_up_angle,
            lift,
            up,
            lift,
            up,
            lift,
            up,
            lift,
            cfg.stand_up_angle,
        ]
    );
}

// ── Playful ───────────────────────────────────────────────────

#[test]
fn forgotten_pets_with_food_left_make_the_puppy_playful() {
    let (mut app, mut hw, mut sink) = make_app(4, 3);
    step(&mut app, &mut hw, &mut sink);
    hw.color = Some(Color::Yellow);
    step(&mut app, &mut hw, &mut sink);
    hw.color = None;

    // First decay: pets 1 → 0, meals 2 → 1.
    step_until(&mut app, &mut hw, &mut sink, BehaviorId::Playful, 400);
    step(&mut app, &mut hw, &mut sink);
    assert_eq!(hw.played(Sound::DogBark2), 1, "barks as soon as it starts playing");

    pet(&mut app, &mut hw, &mut sink);
    assert!(
        sink.transitions()
            .contains(&(BehaviorId::Playful, BehaviorId::Idle))
    );
}

// ── Faults ────────────────────────────────────────────────────

#[test]
fn stuck_leg_fails_the_tick_instead_of_hanging() {
    let (mut app, mut hw, mut sink) = make_app(3, 2);
    hw.jam(Side::Left);

    let before = hw.now_ms();
    let err = app.tick(&mut hw, &mut sink).unwrap_err();
    assert_eq!(
        err,
        Error::Motion(MotionError::Timeout {
            joint: Joint::LeftLeg,
            waited_ms: app.config().motion_timeout_ms,
        })
    );
    assert!(hw.now_ms() - before >= u64::from(app.config().motion_timeout_ms));

    app.halt(&mut hw);
    assert!(hw.calls().ends_with(&[
        HwCall::LegStop(Side::Left),
        HwCall::LegStop(Side::Right),
        HwCall::HeadStop,
    ]));
}
