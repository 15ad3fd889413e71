//! Simulation state and the per-frame snapshot handed to collaborators
//!
//! Everything the simulation mutates lives in one owned `SimulationState`;
//! component functions borrow the pieces they need.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Polygon;
use super::platform::RotatingPlatform;
use super::tilt::TiltState;
use crate::level::Level;

/// Why an attempt was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    FellOutOfBounds,
    HitHazard,
}

/// Classification of the current attempt. Terminal once Won or Lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimulationOutcome {
    #[default]
    Running,
    Won,
    Lost(LossCause),
}

impl SimulationOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SimulationOutcome::Running)
    }
}

/// The player's ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Visual spin in degrees
    pub rotation: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            rotation: 0.0,
        }
    }

    /// Put the ball back at `pos`, at rest and unrotated
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.rotation = 0.0;
    }
}

/// All state owned and mutated by the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub ball: Ball,
    pub tilt: TiltState,
    /// Live copies of the level's rotating platforms (angle mutates)
    pub rotating: Vec<RotatingPlatform>,
    pub outcome: SimulationOutcome,
    pub paused: bool,
    /// Level timer; accrues only while running and unpaused
    pub elapsed_ms: u64,
    /// Camera origin from the most recent step
    pub camera: Vec2,
}

impl SimulationState {
    /// Fresh state at the level's start conditions
    pub fn new(level: &Level, ball_radius: f32) -> Self {
        let mut rotating = level.rotating_platforms.clone();
        // Every attempt starts with the platforms at angle 0, same as a restart
        for platform in &mut rotating {
            platform.reset_rotation();
        }
        Self {
            ball: Ball::new(level.ball_start, ball_radius),
            tilt: TiltState::default(),
            rotating,
            outcome: SimulationOutcome::Running,
            paused: false,
            elapsed_ms: 0,
            camera: Vec2::ZERO,
        }
    }

    /// Restore level-start conditions. The tilt baseline is kept (it tracks the device).
    pub fn restart(&mut self, level: &Level) {
        self.ball.reset(level.ball_start);
        self.tilt.reset_control();
        for platform in &mut self.rotating {
            platform.reset_rotation();
        }
        self.outcome = SimulationOutcome::Running;
        self.elapsed_ms = 0;
        self.camera = Vec2::ZERO;
    }

    /// Whether the step body should run
    pub fn is_active(&self) -> bool {
        !self.paused && !self.outcome.is_terminal()
    }
}

/// Immutable snapshot published once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameState {
    pub ball_position: Vec2,
    pub ball_rotation: f32,
    pub camera_origin: Vec2,
    pub outcome: SimulationOutcome,
    pub paused: bool,
    pub elapsed_ms: u64,
    /// Static platforms followed by rotating platforms at their current angle
    pub platforms: Vec<Polygon>,
}

impl FrameState {
    pub fn capture(state: &SimulationState, level: &Level) -> Self {
        Self {
            ball_position: state.ball.pos,
            ball_rotation: state.ball.rotation,
            camera_origin: state.camera,
            outcome: state.outcome,
            paused: state.paused,
            elapsed_ms: state.elapsed_ms,
            platforms: level.all_polygons(&state.rotating),
        }
    }
}
