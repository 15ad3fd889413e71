//! One simulation step
//!
//! Order within a step: tilt sample -> ball integration -> collisions against
//! static then rotating geometry (at the current angle) -> rotating platforms
//! advance -> win/loss rules. Paused or finished attempts skip the step.

use super::camera;
use super::collision::resolve_collisions;
use super::integrate::integrate_ball;
use super::rules::evaluate;
use super::state::SimulationState;
use crate::level::Level;
use crate::tuning::Tuning;

/// Advance the simulation by one step of `dt` seconds.
/// Returns false (and changes nothing) when paused or the attempt is over.
pub fn step(state: &mut SimulationState, level: &Level, tuning: &Tuning, dt: f32) -> bool {
    if !state.is_active() {
        return false;
    }

    let tilt = state.tilt.sample(tuning);
    integrate_ball(&mut state.ball, dt, tilt, tuning);

    let polygons = level.all_polygons(&state.rotating);
    resolve_collisions(&mut state.ball, &polygons, tuning.collision_response);

    for platform in &mut state.rotating {
        platform.advance();
    }

    state.outcome = evaluate(&mut state.ball, level, state.outcome, tuning.goal_radius);
    true
}

/// Recompute the camera origin for the ball's current position
pub fn update_camera(state: &mut SimulationState, level: &Level, tuning: &Tuning) {
    let viewport = glam::Vec2::new(tuning.viewport_width, tuning.viewport_height);
    state.camera = camera::follow(state.ball.pos, viewport, level.size());
}
