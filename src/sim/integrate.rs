//! Ball integrator
//!
//! Velocity changes by fixed per-step amounts (gravity, tilt, friction) while
//! position advances by wall-clock time scaled to 60 fps units. A faster frame
//! rate accumulates velocity faster; the feel of the game depends on it.

use super::state::Ball;
use crate::tuning::Tuning;

/// Advance the ball by one step of `dt` seconds under control signal `tilt`
pub fn integrate_ball(ball: &mut Ball, dt: f32, tilt: f32, tuning: &Tuning) {
    ball.vel.x += tilt * tuning.tilt_accel;
    ball.vel.y += tuning.gravity;

    ball.vel *= tuning.air_friction;

    ball.vel.x = ball.vel.x.clamp(-tuning.max_vel_x, tuning.max_vel_x);
    ball.vel.y = ball.vel.y.clamp(tuning.min_vel_y, tuning.max_vel_y);

    ball.pos += ball.vel * dt * tuning.frame_scale;

    update_spin(ball, tuning);
}

/// Roll the ball visually in its direction of travel, or let the spin settle
fn update_spin(ball: &mut Ball, tuning: &Tuning) {
    let speed = ball.vel.length();
    if speed > tuning.spin_threshold {
        let dir = if ball.vel.x >= 0.0 { 1.0 } else { -1.0 };
        ball.rotation = (ball.rotation + dir * speed * tuning.spin_factor) % 360.0;
    } else {
        ball.rotation *= tuning.spin_decay;
    }
}
