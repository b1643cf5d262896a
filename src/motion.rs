//! Body motion primitives.
//!
//! Every gesture the puppy makes is composed here from raw motor calls and
//! clock waits.  The body also tracks the pose it last left the puppy in,
//! so operations that only make sense while seated can refuse otherwise.
//!
//! Leg moves are commanded non-blocking on both legs and then awaited with a
//! bounded poll; a leg that never arrives turns into
//! [`MotionError::Timeout`] instead of stalling the control loop.

use log::{debug, info};

use crate::app::ports::{
    Button, HeadMotor, Image, LegMotor, LightColor, PuppyHardware, Sound,
};
use crate::config::PuppyConfig;
use crate::error::{MotionError, PoseError, Result};

/// Rear leg selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// A leg joint, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    LeftLeg,
    RightLeg,
}

impl From<Side> for Joint {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => Joint::LeftLeg,
            Side::Right => Joint::RightLeg,
        }
    }
}

/// Physical posture, as far as the body knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pose {
    #[default]
    Unknown,
    Seated,
    Standing,
}

/// Pose tracker plus the motion primitives.
#[derive(Debug, Clone, Default)]
pub struct Body {
    pose: Pose,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    // ── Legs ──────────────────────────────────────────────────

    /// Run both legs backwards against the floor, then relax.
    pub fn sit_down(&mut self, hw: &mut impl PuppyHardware, cfg: &PuppyConfig) {
        debug!("body: sit down");
        hw.leg(Side::Left).run(-cfg.sit_speed);
        hw.leg(Side::Right).run(-cfg.sit_speed);
        hw.wait_ms(cfg.sit_duration_ms);
        hw.leg(Side::Left).stop();
        hw.leg(Side::Right).stop();
        hw.wait_ms(cfg.settle_ms);
        self.pose = Pose::Seated;
    }

    /// Two-stage stand: a quick push to the half angle, then a slow finish.
    pub fn stand_up(&mut self, hw: &mut impl PuppyHardware, cfg: &PuppyConfig) -> Result<()> {
        debug!("body: stand up");
        move_legs(hw, cfg, cfg.leg_fast_speed, cfg.half_up_angle)?;
        move_legs(hw, cfg, cfg.leg_slow_speed, cfg.stand_up_angle)?;
        hw.wait_ms(cfg.stand_pause_ms);
        self.pose = Pose::Standing;
        Ok(())
    }

    /// Stand, push the legs all the way back with a whine, come back up.
    pub fn stretch(&mut self, hw: &mut impl PuppyHardware, cfg: &PuppyConfig) -> Result<()> {
        self.stand_up(hw, cfg)?;
        debug!("body: stretch");
        move_legs(hw, cfg, cfg.leg_fast_speed, cfg.stretch_angle)?;
        hw.play(Sound::DogWhine);
        move_legs(hw, cfg, cfg.leg_fast_speed, cfg.stand_up_angle)?;
        Ok(())
    }

    /// One hop: kick, hold in the air, drop back.
    pub fn hop(&mut self, hw: &mut impl PuppyHardware, cfg: &PuppyConfig) {
        debug!("body: hop");
        hw.leg(Side::Left).run(cfg.hop_speed);
        hw.leg(Side::Right).run(cfg.hop_speed);
        hw.wait_ms(cfg.hop_phase_ms);
        hw.leg(Side::Left).hold();
        hw.leg(Side::Right).hold();
        hw.wait_ms(cfg.hop_phase_ms);
        hw.leg(Side::Left).run(-cfg.sit_speed);
        hw.leg(Side::Right).run(-cfg.sit_speed);
        hw.wait_ms(cfg.hop_phase_ms);
        hw.leg(Side::Left).stop();
        hw.leg(Side::Right).stop();
        self.pose = Pose::Unknown;
    }

    /// Move a single leg to `angle` and wait for it.
    pub fn lift_leg(
        &mut self,
        hw: &mut impl PuppyHardware,
        cfg: &PuppyConfig,
        side: Side,
        angle: i32,
        speed: i32,
    ) -> Result<()> {
        debug!("body: {side:?} leg to {angle}°");
        hw.leg(side).run_target(speed, angle, false);
        await_leg(hw, cfg, side)
    }

    /// Swing a raised leg `amplitude` degrees further and back, `times` times.
    /// Starts from, and ends at, `base_angle`.
    pub fn wiggle_leg(
        &mut self,
        hw: &mut impl PuppyHardware,
        cfg: &PuppyConfig,
        side: Side,
        base_angle: i32,
        amplitude: i32,
        times: u8,
    ) -> Result<()> {
        for _ in 0..times {
            self.lift_leg(hw, cfg, side, base_angle + amplitude, cfg.leg_fast_speed)?;
            self.lift_leg(hw, cfg, side, base_angle, cfg.leg_fast_speed)?;
        }
        Ok(())
    }

    /// Zero both leg encoders.  Seated is the reference pose.
    pub fn reset_leg_angles(&mut self, hw: &mut impl PuppyHardware) -> Result<()> {
        if self.pose != Pose::Seated {
            return Err(PoseError::NotSeated { actual: self.pose }.into());
        }
        hw.leg(Side::Left).reset_angle(0);
        hw.leg(Side::Right).reset_angle(0);
        Ok(())
    }

    // ── Head ──────────────────────────────────────────────────

    pub fn move_head(&mut self, hw: &mut impl PuppyHardware, cfg: &PuppyConfig, angle: i32) {
        debug!("body: head to {angle}°");
        hw.head().run_target(cfg.head_speed, angle);
    }

    pub fn head_up(&mut self, hw: &mut impl PuppyHardware, cfg: &PuppyConfig) {
        self.move_head(hw, cfg, cfg.head_up_angle);
    }

    pub fn head_down(&mut self, hw: &mut impl PuppyHardware, cfg: &PuppyConfig) {
        self.move_head(hw, cfg, cfg.head_down_angle);
    }

    /// Interactive head calibration.
    ///
    /// The operator levels the head with Up/Down and confirms with Center;
    /// that position becomes 0°.  Blocks until Center is seen.
    pub fn adjust_head(&mut self, hw: &mut impl PuppyHardware, cfg: &PuppyConfig) {
        info!("head calibration: level the head with Up/Down, confirm with Center");
        hw.show(Image::BrickIcon);
        hw.set_light(LightColor::Orange);
        loop {
            let buttons = hw.pressed_set();
            if buttons.contains(&Button::Center) {
                break;
            } else if buttons.contains(&Button::Up) {
                hw.head().run(cfg.head_speed);
            } else if buttons.contains(&Button::Down) {
                hw.head().run(-cfg.head_speed);
            } else {
                hw.head().stop();
            }
            hw.wait_ms(cfg.motion_poll_ms);
        }
        hw.head().stop();
        hw.head().reset_angle(0);
        hw.set_light(LightColor::Green);
        info!("head calibration done");
    }

    /// Stop every motor.  Used on the way out after a fault.
    pub fn halt(&mut self, hw: &mut impl PuppyHardware) {
        hw.leg(Side::Left).stop();
        hw.leg(Side::Right).stop();
        hw.head().stop();
        self.pose = Pose::Unknown;
    }
}

// ---------------------------------------------------------------------------
// Bounded move-and-wait
// ---------------------------------------------------------------------------

/// Command both legs to `angle` and wait until both report arrival.
fn move_legs(
    hw: &mut impl PuppyHardware,
    cfg: &PuppyConfig,
    speed: i32,
    angle: i32,
) -> Result<()> {
    hw.leg(Side::Left).run_target(speed, angle, false);
    hw.leg(Side::Right).run_target(speed, angle, false);
    await_leg(hw, cfg, Side::Right)?;
    await_leg(hw, cfg, Side::Left)
}

/// Poll one leg until it reaches its target or the timeout runs out.
/// Time already spent waiting on a sibling leg does not count.
fn await_leg(hw: &mut impl PuppyHardware, cfg: &PuppyConfig, side: Side) -> Result<()> {
    let mut waited_ms = 0u32;
    while !hw.leg(side).is_target_reached() {
        if waited_ms >= cfg.motion_timeout_ms {
            return Err(MotionError::Timeout {
                joint: side.into(),
                waited_ms,
            }
            .into());
        }
        hw.wait_ms(cfg.motion_poll_ms);
        waited_ms = waited_ms.saturating_add(cfg.motion_poll_ms);
    }
    Ok(())
}
