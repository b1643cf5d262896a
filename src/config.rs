//! Tunable constants
//!
//! Every angle, speed, delay and range the puppy uses.  These are fixed at
//! build time; the struct exists so tests and the simulator can shorten or
//! inspect them.

use serde::{Deserialize, Serialize};

/// Core puppy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuppyConfig {
    // --- Leg angles (degrees from the seated zero) ---
    /// Intermediate angle used on the way up
    pub half_up_angle: i32,
    /// Fully standing
    pub stand_up_angle: i32,
    /// Legs pushed back for a stretch / lifted for the bathroom
    pub stretch_angle: i32,
    /// Amplitude of one bathroom leg wiggle
    pub wiggle_angle: i32,
    /// Number of wiggles
    pub wiggle_count: u8,

    // --- Head angles (degrees from the calibrated zero) ---
    pub head_up_angle: i32,
    pub head_down_angle: i32,

    // --- Motor speeds (deg/s) ---
    pub leg_fast_speed: i32,
    pub leg_slow_speed: i32,
    /// Magnitude of the backwards run used to sit down
    pub sit_speed: i32,
    pub hop_speed: i32,
    pub head_speed: i32,

    // --- Motion timing (ms) ---
    pub sit_duration_ms: u32,
    pub settle_ms: u32,
    pub stand_pause_ms: u32,
    pub hop_phase_ms: u32,
    pub hop_count: u8,
    /// Poll period while waiting for a leg to reach its target
    pub motion_poll_ms: u32,
    /// Give up on a leg move after this long
    pub motion_timeout_ms: u32,

    // --- Behavior pauses (ms) ---
    pub wake_pause_ms: u32,
    pub angry_pause_ms: u32,
    pub happy_pause_ms: u32,
    pub bathroom_lift_pause_ms: u32,
    pub bathroom_horn_pause_ms: u32,

    // --- Mood counters ---
    /// Inclusive range the petting target is drawn from
    pub pet_target_range: (u32, u32),
    /// Inclusive range the feeding target is drawn from
    pub feed_target_range: (u32, u32),
    /// Value both counts take after a reset
    pub initial_count: u32,
    /// A count drops by one after this long without a decay step
    pub decay_interval_ms: u64,
    /// Fall asleep when no count changed for this long
    pub sleep_after_ms: u64,

    // --- Eyes ---
    /// How long the eyes stay shut during a blink
    pub blink_closed_ms: u64,
    /// Inclusive range (seconds) the eyes stay open between blinks
    pub blink_open_range_s: (u32, u32),
    /// Inclusive range (seconds) between left/right glances
    pub glance_range_s: (u32, u32),

    // --- Playful ---
    /// Inclusive range (seconds) between playful barks
    pub bark_interval_range_s: (u32, u32),

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub tick_interval_ms: u32,
    /// Telemetry report interval (milliseconds)
    pub telemetry_interval_ms: u32,
}

impl Default for PuppyConfig {
    fn default() -> Self {
        Self {
            // Legs
            half_up_angle: 25,
            stand_up_angle: 65,
            stretch_angle: 125,
            wiggle_angle: 20,
            wiggle_count: 3,

            // Head
            head_up_angle: 0,
            head_down_angle: -40,

            // Speeds
            leg_fast_speed: 100,
            leg_slow_speed: 50,
            sit_speed: 50,
            hop_speed: 500,
            head_speed: 20,

            // Motion timing
            sit_duration_ms: 1000,
            settle_ms: 100,
            stand_pause_ms: 500,
            hop_phase_ms: 275,
            hop_count: 3,
            motion_poll_ms: 100,
            motion_timeout_ms: 5000,

            // Behavior pauses
            wake_pause_ms: 1000,
            angry_pause_ms: 1500,
            happy_pause_ms: 500,
            bathroom_lift_pause_ms: 800,
            bathroom_horn_pause_ms: 1000,

            // Counters
            pet_target_range: (3, 6),
            feed_target_range: (2, 4),
            initial_count: 1,
            decay_interval_ms: 15_000,
            sleep_after_ms: 30_000,

            // Eyes
            blink_closed_ms: 250,
            blink_open_range_s: (1, 5),
            glance_range_s: (1, 10),

            // Playful
            bark_interval_range_s: (4, 8),

            // Timing
            tick_interval_ms: 100,       // 10 Hz
            telemetry_interval_ms: 10_000, // 1 per 10 s
        }
    }
}
