//! Polygon geometry shared by collision, jump and rendering collaborators
//!
//! Coordinates are in level units with y growing downward (screen space).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Visual style tag for a platform. Only the renderer interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformStyle {
    /// Red to yellow
    #[default]
    Ember,
    /// Blue to cyan
    Ocean,
    /// Magenta to green
    Neon,
    /// Dark to light green
    Grass,
    /// Radial white to gray
    Stone,
}

/// A closed polygon (last vertex connects back to the first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
    #[serde(default)]
    pub style: PlatformStyle,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>, style: PlatformStyle) -> Self {
        Self { vertices, style }
    }

    /// Iterate edges as (start, end) pairs, wrapping to close the loop
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Number of edges with zero length
    pub fn degenerate_edge_count(&self) -> usize {
        self.edges().filter(|(a, b)| is_degenerate_edge(*a, *b)).count()
    }
}

/// Edges shorter than this are skipped by every query
pub const MIN_EDGE_LENGTH_SQ: f32 = 1e-12;

#[inline]
pub fn is_degenerate_edge(a: Vec2, b: Vec2) -> bool {
    (b - a).length_squared() <= MIN_EDGE_LENGTH_SQ
}

/// Closest point on segment `a..b` to `p`, via clamped scalar projection.
///
/// Returns `None` for a zero-length segment, where the projection would
/// divide by zero.
#[inline]
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Option<Vec2> {
    let edge = b - a;
    let len2 = edge.length_squared();
    if len2 <= MIN_EDGE_LENGTH_SQ {
        return None;
    }
    let t = ((p - a).dot(edge) / len2).clamp(0.0, 1.0);
    Some(a + edge * t)
}
