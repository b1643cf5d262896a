//! RoboPup — Main Entry Point
//!
//! Runs the puppy against the simulated robot in real time.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SimulatedPuppy        LogEventSink       StdRandom            │
//! │  (PuppyHardware)       (EventSink)        (RandomSource)       │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Monitor · FSM · Counters · Eyes · Body                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use env_logger::Env;
use log::{error, info};

use robopup::adapters::log_sink::LogEventSink;
use robopup::adapters::random::StdRandom;
use robopup::adapters::sim::SimulatedPuppy;
use robopup::adapters::time::SystemClock;
use robopup::app::events::AppEvent;
use robopup::app::ports::{Button, Clock, Color, EventSink};
use robopup::app::service::AppService;
use robopup::config::PuppyConfig;
use robopup::timing::Stopwatch;

/// A short scripted visit: confirm the head calibration, then feed and pet
/// the puppy a few times before leaving it alone.
fn demo_script(sim: &mut SimulatedPuppy<SystemClock>) {
    // Calibration runs right after the 1.1 s sit; hold Center across it.
    sim.script_buttons(0, &[Button::Center]);
    sim.script_buttons(2_500, &[]);

    sim.script_feed(8_000, Color::Red, 1_500);
    sim.script_pet(12_000, 400);
    sim.script_feed(16_000, Color::Green, 1_500);
    sim.script_pet(20_000, 400);
    sim.script_pet(23_000, 400);
    sim.script_feed(27_000, Color::Yellow, 1_500);
}

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  RoboPup v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Adapters ───────────────────────────────────────────
    let config = PuppyConfig::default();
    let mut hw = SimulatedPuppy::realtime();
    demo_script(&mut hw);
    let mut sink = LogEventSink::new();

    // ── 3. Service ────────────────────────────────────────────
    let mut app = AppService::new(config, StdRandom::from_entropy());
    app.start(&mut hw, &mut sink)
        .context("puppy failed to start")?;

    let telemetry_every = u64::from(app.config().telemetry_interval_ms);
    let mut telemetry = Stopwatch::started_at(hw.now_ms());

    // ── 4. Control loop ───────────────────────────────────────
    loop {
        if let Err(e) = app.step(&mut hw, &mut sink) {
            error!("fault in {:?}: {e}; stopping motors", app.state());
            app.halt(&mut hw);
            return Err(e).context("control loop stopped");
        }

        let now = hw.now_ms();
        if telemetry.exceeded(now, telemetry_every) {
            telemetry.reset(now);
            sink.emit(&AppEvent::Telemetry(app.build_telemetry(now)));
        }
    }
}
