//! Concrete behavior step functions and table builder.
//!
//! Each behavior is one plain generic `fn`: no closures, no dynamic
//! dispatch, no heap.  Entry sequences run when `entered` is set; the
//! single-pass behaviors (WakingUp, Angry, Bathroom, Happy) always return
//! to Idle after one step.
//!
//! ```text
//!           ┌──[mood rule]──▶ HAPPY ─┐ ANGRY ─┐ BATHROOM ─┐ PLAYFUL ─┐ HUNGRY ─┐
//!  IDLE ◀───┘◀──────────────────────┘◀───────┘◀──────────┘◀─[pet]───┘◀[feed]─┘
//!                                                                   [pet]─▶ ANGRY
//!
//!  Any behavior ──[30 s without a count change]──▶ SLEEPING
//!  SLEEPING ──[touch + Center]──▶ WAKING_UP ──▶ IDLE
//! ```

use log::info;

use super::context::PuppyContext;
use super::{BehaviorDescriptor, BehaviorId};
use crate::app::ports::{Button, PuppyHardware, RandomSource, Sound};
use crate::counters::MoodCounts;
use crate::error::Result;
use crate::expression::Expression;
use crate::motion::Side;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static behavior table.  Called once at startup.
pub fn build_behavior_table<H, R>() -> [BehaviorDescriptor<H, R>; BehaviorId::COUNT]
where
    H: PuppyHardware,
    R: RandomSource,
{
    [
        // Index 0 — Idle
        BehaviorDescriptor {
            id: BehaviorId::Idle,
            name: "Idle",
            step: idle::<H, R>,
        },
        // Index 1 — Sleeping
        BehaviorDescriptor {
            id: BehaviorId::Sleeping,
            name: "Sleeping",
            step: sleeping::<H, R>,
        },
        // Index 2 — WakingUp
        BehaviorDescriptor {
            id: BehaviorId::WakingUp,
            name: "WakingUp",
            step: waking_up::<H, R>,
        },
        // Index 3 — Playful
        BehaviorDescriptor {
            id: BehaviorId::Playful,
            name: "Playful",
            step: playful::<H, R>,
        },
        // Index 4 — Angry
        BehaviorDescriptor {
            id: BehaviorId::Angry,
            name: "Angry",
            step: angry::<H, R>,
        },
        // Index 5 — Hungry
        BehaviorDescriptor {
            id: BehaviorId::Hungry,
            name: "Hungry",
            step: hungry::<H, R>,
        },
        // Index 6 — Bathroom
        BehaviorDescriptor {
            id: BehaviorId::Bathroom,
            name: "Bathroom",
            step: bathroom::<H, R>,
        },
        // Index 7 — Happy
        BehaviorDescriptor {
            id: BehaviorId::Happy,
            name: "Happy",
            step: happy::<H, R>,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Mood rule
// ═══════════════════════════════════════════════════════════════════════════

/// Pick the behavior the counts call for.  First match wins; `None` keeps
/// the puppy where it is.
pub fn select_behavior(m: &MoodCounts) -> Option<BehaviorId> {
    if m.pet_count == m.pet_target && m.feed_count == m.feed_target {
        Some(BehaviorId::Happy)
    } else if m.pet_count > m.pet_target && m.feed_count < m.feed_target {
        Some(BehaviorId::Angry)
    } else if m.pet_count < m.pet_target && m.feed_count > m.feed_target {
        Some(BehaviorId::Bathroom)
    } else if m.pet_count == 0 && m.feed_count > 0 {
        Some(BehaviorId::Playful)
    } else if m.feed_count == 0 {
        Some(BehaviorId::Hungry)
    } else {
        None
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE
// ═══════════════════════════════════════════════════════════════════════════

fn idle<H: PuppyHardware, R: RandomSource>(
    ctx: &mut PuppyContext<R>,
    hw: &mut H,
    entered: bool,
) -> Result<Option<BehaviorId>> {
    if entered {
        info!("idle: waiting for pets and food");
        ctx.body.stand_up(hw, &ctx.config)?;
    }
    ctx.animate_eyes(hw);

    let next = select_behavior(&ctx.counters.counts());
    // A puppy that just turned hungry does not sniff at a pet.
    ctx.update_pet_count(hw, next == Some(BehaviorId::Hungry));
    ctx.update_feed_count(hw);
    Ok(next)
}

// ═══════════════════════════════════════════════════════════════════════════
//  SLEEPING
// ═══════════════════════════════════════════════════════════════════════════

fn sleeping<H: PuppyHardware, R: RandomSource>(
    ctx: &mut PuppyContext<R>,
    hw: &mut H,
    entered: bool,
) -> Result<Option<BehaviorId>> {
    if entered {
        info!("sleeping: touch the head and press Center to wake");
        ctx.set_eyes(Expression::Tired, hw);
        ctx.body.sit_down(hw, &ctx.config);
        ctx.body.head_down(hw, &ctx.config);
        ctx.set_eyes(Expression::Sleeping, hw);
        hw.play(Sound::Snoring);
    }

    if hw.is_pressed() && hw.pressed_set().contains(&Button::Center) {
        ctx.counters.note_activity(hw.now_ms());
        return Ok(Some(BehaviorId::WakingUp));
    }
    Ok(None)
}

// ═══════════════════════════════════════════════════════════════════════════
//  WAKING UP
// ═══════════════════════════════════════════════════════════════════════════

fn waking_up<H: PuppyHardware, R: RandomSource>(
    ctx: &mut PuppyContext<R>,
    hw: &mut H,
    _entered: bool,
) -> Result<Option<BehaviorId>> {
    info!("waking up");
    ctx.set_eyes(Expression::Tired, hw);
    hw.play(Sound::DogWhine);
    ctx.body.head_up(hw, &ctx.config);
    ctx.body.sit_down(hw, &ctx.config);
    ctx.body.stretch(hw, &ctx.config)?;
    hw.wait_ms(ctx.config.wake_pause_ms);
    ctx.body.stand_up(hw, &ctx.config)?;
    Ok(Some(BehaviorId::Idle))
}

// ═══════════════════════════════════════════════════════════════════════════
//  PLAYFUL
// ═══════════════════════════════════════════════════════════════════════════

fn playful<H: PuppyHardware, R: RandomSource>(
    ctx: &mut PuppyContext<R>,
    hw: &mut H,
    entered: bool,
) -> Result<Option<BehaviorId>> {
    if entered {
        info!("playful: pet me!");
        ctx.set_eyes(Expression::Neutral, hw);
        ctx.body.stand_up(hw, &ctx.config)?;
        ctx.arm_bark();
    }

    let next = ctx
        .update_pet_count(hw, false)
        .then_some(BehaviorId::Idle);

    if ctx.bark_due(hw.now_ms()) {
        hw.play(Sound::DogBark2);
    }
    Ok(next)
}

// ═══════════════════════════════════════════════════════════════════════════
//  ANGRY
// ═══════════════════════════════════════════════════════════════════════════

fn angry<H: PuppyHardware, R: RandomSource>(
    ctx: &mut PuppyContext<R>,
    hw: &mut H,
    _entered: bool,
) -> Result<Option<BehaviorId>> {
    info!("angry: too many pets, not enough food");
    ctx.set_eyes(Expression::Angry, hw);
    hw.play(Sound::DogGrowl);
    ctx.body.stand_up(hw, &ctx.config)?;
    hw.wait_ms(ctx.config.angry_pause_ms);
    hw.play(Sound::DogBark1);
    ctx.scold(hw.now_ms());
    Ok(Some(BehaviorId::Idle))
}

// ═══════════════════════════════════════════════════════════════════════════
//  HUNGRY
// ═══════════════════════════════════════════════════════════════════════════

fn hungry<H: PuppyHardware, R: RandomSource>(
    ctx: &mut PuppyContext<R>,
    hw: &mut H,
    entered: bool,
) -> Result<Option<BehaviorId>> {
    if entered {
        info!("hungry: feed me");
        ctx.set_eyes(Expression::Hurt, hw);
        ctx.body.sit_down(hw, &ctx.config);
        hw.play(Sound::DogWhine);
    }

    let mut next = None;
    if ctx.update_feed_count(hw) {
        next = Some(BehaviorId::Idle);
    }
    // Petting instead of feeding wins.
    if ctx.update_pet_count(hw, true) {
        next = Some(BehaviorId::Angry);
    }
    Ok(next)
}

// ═══════════════════════════════════════════════════════════════════════════
//  BATHROOM
// ═══════════════════════════════════════════════════════════════════════════

fn bathroom<H: PuppyHardware, R: RandomSource>(
    ctx: &mut PuppyContext<R>,
    hw: &mut H,
    _entered: bool,
) -> Result<Option<BehaviorId>> {
    info!("bathroom: too much food, not enough pets");
    ctx.set_eyes(Expression::Squinty, hw);
    let cfg = &ctx.config;
    ctx.body.stand_up(hw, cfg)?;
    hw.wait_ms(cfg.settle_ms);
    ctx.body
        .lift_leg(hw, cfg, Side::Right, cfg.stretch_angle, cfg.leg_fast_speed)?;
    hw.wait_ms(cfg.bathroom_lift_pause_ms);
    hw.play(Sound::Horn);
    hw.wait_ms(cfg.bathroom_horn_pause_ms);
    ctx.body.wiggle_leg(
        hw,
        cfg,
        Side::Right,
        cfg.stretch_angle,
        cfg.wiggle_angle,
        cfg.wiggle_count,
    )?;
    ctx.body
        .lift_leg(hw, cfg, Side::Right, cfg.stand_up_angle, cfg.leg_fast_speed)?;
    ctx.relieve(hw.now_ms());
    Ok(Some(BehaviorId::Idle))
}

// ═══════════════════════════════════════════════════════════════════════════
//  HAPPY
// ═══════════════════════════════════════════════════════════════════════════

fn happy<H: PuppyHardware, R: RandomSource>(
    ctx: &mut PuppyContext<R>,
    hw: &mut H,
    _entered: bool,
) -> Result<Option<BehaviorId>> {
    info!("happy: just the right amount of pets and food");
    ctx.set_eyes(Expression::Heart, hw);
    ctx.body.sit_down(hw, &ctx.config);
    for _ in 0..ctx.config.hop_count {
        hw.play(Sound::DogBark1);
        ctx.body.hop(hw, &ctx.config);
    }
    hw.wait_ms(ctx.config.happy_pause_ms);
    ctx.body.sit_down(hw, &ctx.config);
    ctx.reset(hw)?;
    Ok(Some(BehaviorId::Idle))
}
