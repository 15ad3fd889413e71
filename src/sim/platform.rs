//! Rotating platform kinematics
//!
//! A rotating platform stores its polygon at angle 0 and a pivot. The angle
//! (degrees) advances by a fixed amount every simulation step; the world-space
//! polygon is derived on demand so it always reflects the latest angle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Polygon;
use crate::wrap_degrees;

/// A polygon spinning rigidly about a pivot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotatingPlatform {
    /// Polygon at angle 0, in level coordinates
    pub base: Polygon,
    pub pivot: Vec2,
    /// Current angle in degrees, kept in [0, 360)
    #[serde(default)]
    pub angle: f32,
    /// Degrees added per simulation step (negative spins the other way)
    pub angular_speed: f32,
}

impl RotatingPlatform {
    pub fn new(base: Polygon, pivot: Vec2, angular_speed: f32) -> Self {
        Self {
            base,
            pivot,
            angle: 0.0,
            angular_speed,
        }
    }

    /// Advance one step
    pub fn advance(&mut self) {
        self.angle = wrap_degrees(self.angle + self.angular_speed);
    }

    /// Back to angle 0 (level restart)
    pub fn reset_rotation(&mut self) {
        self.angle = 0.0;
    }

    /// World-space polygon at the current angle
    pub fn rotated(&self) -> Polygon {
        if self.angle == 0.0 {
            // Exact: no trig round-off at rest
            return self.base.clone();
        }
        let rotation = Vec2::from_angle(self.angle.to_radians());
        let vertices = self
            .base
            .vertices
            .iter()
            .map(|v| self.pivot + rotation.rotate(*v - self.pivot))
            .collect();
        Polygon::new(vertices, self.base.style)
    }
}
