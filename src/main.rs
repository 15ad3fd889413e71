//! Shake Tilt headless runner
//!
//! Plays a level on the simulation thread with a synthetic device: held tilted
//! to the right, with seeded sensor jitter and a shake every couple of seconds.
//!
//! Usage: `shake-tilt [level-id] [tuning.json]`

use std::error::Error;
use std::thread;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use shake_tilt::sim::SensorSample;
use shake_tilt::{LevelCatalog, SimulationThread, Tuning, format_elapsed};

/// Standard gravity (m/s²)
const GRAVITY: f32 = 9.81;
/// Roll the synthetic device is held at (radians)
const HELD_ROLL: f32 = 0.35;
/// Sensor sample period
const SAMPLE_PERIOD: Duration = Duration::from_millis(10);
/// Time between shakes
const SHAKE_PERIOD: Duration = Duration::from_millis(2_000);
/// Give up after this long
const TIME_LIMIT: Duration = Duration::from_secs(90);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let level_id: u32 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 1,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::default(),
    };

    let catalog = LevelCatalog::builtin()?;
    let level = catalog.load_or_first(level_id);
    log::info!("Shake Tilt (headless) starting on level {}", level.id);

    let sim = SimulationThread::spawn(level, tuning)?;
    let sensors = sim.sensor_sender();
    let mut rng = Pcg32::seed_from_u64(u64::from(level_id));

    let start = Instant::now();
    let mut last_shake = start;
    let mut last_report = start;

    loop {
        let now = Instant::now();
        let timestamp_ms = now.duration_since(start).as_millis() as u64;

        let roll = HELD_ROLL + rng.random_range(-0.05..0.05);
        let mut accel = [
            rng.random_range(-0.2..0.2),
            GRAVITY * roll.sin(),
            GRAVITY * roll.cos(),
        ];
        if now.duration_since(last_shake) >= SHAKE_PERIOD {
            accel[0] += 14.0;
            last_shake = now;
        }
        sensors.send(SensorSample::accelerometer(accel[0], accel[1], accel[2], timestamp_ms));
        sensors.send(SensorSample::gyroscope(
            rng.random_range(-0.1..0.1),
            rng.random_range(-0.1..0.1),
            0.0,
            timestamp_ms,
        ));

        let frame = sim.frame();
        if now.duration_since(last_report) >= Duration::from_secs(1) {
            log::info!(
                "t={} ball=({:.0}, {:.0}) camera=({:.0}, {:.0})",
                format_elapsed(frame.elapsed_ms),
                frame.ball_position.x,
                frame.ball_position.y,
                frame.camera_origin.x,
                frame.camera_origin.y
            );
            last_report = now;
        }
        if frame.outcome.is_terminal() || now.duration_since(start) >= TIME_LIMIT {
            break;
        }

        thread::sleep(SAMPLE_PERIOD);
    }

    let frame = sim.shutdown();
    log::info!(
        "Finished: {:?} after {}",
        frame.outcome,
        format_elapsed(frame.elapsed_ms)
    );
    Ok(())
}
