//! Shake-to-jump
//!
//! Runs on every accelerometer sample, outside the fixed step. A shake whose
//! magnitude exceeds the threshold launches the ball upward, but only when it
//! rests on something. There is no cooldown: every qualifying sample while
//! grounded re-applies the jump velocity.

use glam::Vec3;

use super::collision::edge_distance;
use super::geometry::Polygon;
use super::state::Ball;
use crate::tuning::Tuning;

/// Whether the ball rests on the level floor or on top of any platform edge
pub fn is_touching_ground<'a>(
    ball: &Ball,
    floor_y: f32,
    polygons: impl IntoIterator<Item = &'a Polygon>,
    tolerance: f32,
) -> bool {
    if ball.pos.y >= floor_y - ball.radius - tolerance {
        return true;
    }
    polygons.into_iter().any(|polygon| {
        polygon.edges().any(|(a, b)| {
            edge_distance(ball.pos, a, b).is_some_and(|(closest, dist)| {
                // Ball center above the contact point (y grows downward)
                dist < ball.radius + tolerance && ball.pos.y - closest.y < 0.0
            })
        })
    })
}

/// Apply a jump if `accel` is a shake and the ball is grounded.
/// Returns true when the jump fired.
pub fn try_jump<'a>(
    ball: &mut Ball,
    accel: Vec3,
    floor_y: f32,
    polygons: impl IntoIterator<Item = &'a Polygon>,
    tuning: &Tuning,
) -> bool {
    if !accel.is_finite() || accel.length() <= tuning.shake_threshold {
        return false;
    }
    if !is_touching_ground(ball, floor_y, polygons, tuning.ground_tolerance) {
        return false;
    }
    ball.vel.y = tuning.jump_velocity;
    log::debug!("Jump at ({:.1}, {:.1})", ball.pos.x, ball.pos.y);
    true
}
