//! Simulation facade for the host
//!
//! Owns the level, tuning, state and clock. The host feeds raw sensor samples
//! as they arrive, calls `tick` once per frame with a monotonic timestamp, and
//! sends intents (`Command`) instead of poking state directly.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::clock::SimulationClock;
use super::jump::try_jump;
use super::state::{FrameState, SimulationState};
use super::tick::{step, update_camera};
use crate::level::{Level, LevelError};
use crate::tuning::{Tuning, TuningError};

/// Which sensor produced a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorKind {
    /// m/s², includes gravity
    Accelerometer,
    /// rad/s
    Gyroscope,
}

/// One raw sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    pub kind: SensorKind,
    pub value: Vec3,
    pub timestamp_ms: u64,
}

impl SensorSample {
    pub fn accelerometer(x: f32, y: f32, z: f32, timestamp_ms: u64) -> Self {
        Self {
            kind: SensorKind::Accelerometer,
            value: Vec3::new(x, y, z),
            timestamp_ms,
        }
    }

    pub fn gyroscope(x: f32, y: f32, z: f32, timestamp_ms: u64) -> Self {
        Self {
            kind: SensorKind::Gyroscope,
            value: Vec3::new(x, y, z),
            timestamp_ms,
        }
    }
}

/// Intents sent by UI collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Restart,
    SetPaused(bool),
    TogglePause,
    SelectLevel(Box<Level>),
}

/// Why a simulation could not be created
#[derive(Debug)]
pub enum SetupError {
    Level(LevelError),
    Tuning(TuningError),
    /// The simulation thread could not be started
    Spawn(std::io::Error),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::Level(err) => write!(f, "{}", err),
            SetupError::Tuning(err) => write!(f, "{}", err),
            SetupError::Spawn(err) => write!(f, "failed to start simulation thread: {}", err),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Level(err) => Some(err),
            SetupError::Tuning(err) => Some(err),
            SetupError::Spawn(err) => Some(err),
        }
    }
}

impl From<LevelError> for SetupError {
    fn from(err: LevelError) -> Self {
        SetupError::Level(err)
    }
}

impl From<TuningError> for SetupError {
    fn from(err: TuningError) -> Self {
        SetupError::Tuning(err)
    }
}

/// One level attempt, driven by an external frame clock
#[derive(Debug, Clone)]
pub struct Simulation {
    level: Arc<Level>,
    tuning: Tuning,
    state: SimulationState,
    clock: SimulationClock,
}

impl Simulation {
    pub fn new(level: Level, tuning: Tuning) -> Result<Self, SetupError> {
        level.validate()?;
        tuning.validate()?;
        log::info!(
            "Starting level {} ({}x{}, {} platforms, {} rotating, {} spikes)",
            level.id,
            level.width,
            level.height,
            level.platforms.len(),
            level.rotating_platforms.len(),
            level.spikes.len()
        );
        let state = SimulationState::new(&level, tuning.ball_radius);
        let clock = SimulationClock::new(tuning.max_frame_dt);
        let mut sim = Self {
            level: Arc::new(level),
            tuning,
            state,
            clock,
        };
        update_camera(&mut sim.state, &sim.level, &sim.tuning);
        Ok(sim)
    }

    pub fn level(&self) -> &Arc<Level> {
        &self.level
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Feed a raw sensor sample. Accelerometer samples also run shake-to-jump
    /// against the ball as it is right now.
    pub fn on_raw_sensor_sample(&mut self, sample: SensorSample) {
        match sample.kind {
            SensorKind::Accelerometer => {
                if !self.state.tilt.on_accelerometer(sample.value, &self.tuning) {
                    return;
                }
                if !self.state.is_active() {
                    return;
                }
                let polygons = self.level.all_polygons(&self.state.rotating);
                try_jump(
                    &mut self.state.ball,
                    sample.value,
                    self.level.height,
                    &polygons,
                    &self.tuning,
                );
            }
            SensorKind::Gyroscope => {
                self.state.tilt.on_gyroscope(sample.value, &self.tuning);
            }
        }
    }

    /// Run one frame at wall-clock time `now_ms` and return the snapshot
    pub fn tick(&mut self, now_ms: u64) -> FrameState {
        let delta = self.clock.advance(now_ms);
        // Paused or finished: the delta is discarded
        if self.state.is_active() {
            self.state.elapsed_ms += delta.elapsed_ms;
            step(&mut self.state, &self.level, &self.tuning, delta.dt);
        }
        update_camera(&mut self.state, &self.level, &self.tuning);
        self.frame()
    }

    /// Snapshot of the current state without stepping
    pub fn frame(&self) -> FrameState {
        FrameState::capture(&self.state, &self.level)
    }

    /// Back to level-start conditions
    pub fn restart(&mut self) {
        log::info!("Restarting level {}", self.level.id);
        self.state.restart(&self.level);
        self.clock.reset();
        update_camera(&mut self.state, &self.level, &self.tuning);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.state.paused != paused {
            log::info!("{}", if paused { "Paused" } else { "Resumed" });
            if !paused {
                // Time spent paused is never integrated: the next tick has dt 0
                self.clock.reset();
            }
        }
        self.state.paused = paused;
    }

    /// Replace the level and restart on it
    pub fn select_level(&mut self, level: Level) -> Result<(), LevelError> {
        level.validate()?;
        let tilt = self.state.tilt;
        self.state = SimulationState::new(&level, self.tuning.ball_radius);
        // The device orientation carries over between levels
        self.state.tilt = tilt;
        self.state.tilt.reset_control();
        self.level = Arc::new(level);
        self.clock.reset();
        update_camera(&mut self.state, &self.level, &self.tuning);
        log::info!("Selected level {}", self.level.id);
        Ok(())
    }

    /// Apply a UI intent
    pub fn apply(&mut self, command: Command) -> Result<(), LevelError> {
        match command {
            Command::Restart => self.restart(),
            Command::SetPaused(paused) => self.set_paused(paused),
            Command::TogglePause => self.set_paused(!self.state.paused),
            Command::SelectLevel(level) => self.select_level(*level)?,
        }
        Ok(())
    }
}
