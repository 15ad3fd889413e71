//! Collision detection and response against polygon platforms
//!
//! The ball is a circle; every polygon edge is a segment. Each penetrating
//! edge is resolved on its own, in vertex order: push the ball out along the
//! contact normal, then remove a damped multiple of the normal velocity.
//! There is no global solve, so a later edge may nudge the ball back into an
//! earlier one; over successive steps this settles visually.

use glam::Vec2;

use super::geometry::{Polygon, closest_point_on_segment};
use super::state::Ball;

/// A penetrating contact between the ball and one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Closest point on the edge
    pub point: Vec2,
    /// Unit normal pointing from the edge toward the ball center
    pub normal: Vec2,
    /// How far the ball overlaps the edge
    pub penetration: f32,
}

/// Closest point on edge `a..b` and the distance from `center` to it.
/// `None` for zero-length edges.
#[inline]
pub fn edge_distance(center: Vec2, a: Vec2, b: Vec2) -> Option<(Vec2, f32)> {
    let closest = closest_point_on_segment(center, a, b)?;
    Some((closest, center.distance(closest)))
}

/// Check a circle against one edge
///
/// When the center lies exactly on the edge the offset gives no direction, so
/// the normal falls back to the edge perpendicular, on the side facing away
/// from the ball's motion (or upward when the ball is at rest).
pub fn circle_edge_contact(
    center: Vec2,
    radius: f32,
    velocity: Vec2,
    a: Vec2,
    b: Vec2,
) -> Option<Contact> {
    let (closest, dist) = edge_distance(center, a, b)?;
    if dist >= radius {
        return None;
    }

    let normal = if dist > 0.0 {
        (center - closest) / dist
    } else {
        fallback_normal(a, b, velocity)
    };

    Some(Contact {
        point: closest,
        normal,
        penetration: radius - dist,
    })
}

fn fallback_normal(a: Vec2, b: Vec2, velocity: Vec2) -> Vec2 {
    // Non-degenerate edge guaranteed by the caller's closest-point query
    let perp = (b - a).perp().normalize();
    let flip = if velocity.length_squared() > 0.0 {
        perp.dot(velocity) > 0.0
    } else {
        // Screen space: up is -y
        perp.y > 0.0
    };
    if flip { -perp } else { perp }
}

/// Resolve the ball against every edge of every polygon, in order.
/// Returns the number of contacts resolved.
pub fn resolve_collisions<'a>(
    ball: &mut Ball,
    polygons: impl IntoIterator<Item = &'a Polygon>,
    response: f32,
) -> usize {
    let mut contacts = 0;
    for polygon in polygons {
        for (a, b) in polygon.edges() {
            let Some(contact) = circle_edge_contact(ball.pos, ball.radius, ball.vel, a, b) else {
                continue;
            };
            ball.pos += contact.normal * contact.penetration;
            let along_normal = ball.vel.dot(contact.normal);
            ball.vel -= response * along_normal * contact.normal;
            contacts += 1;
        }
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::COLLISION_RESPONSE;
    use crate::sim::geometry::PlatformStyle;
    use proptest::prelude::*;

    fn floor(y: f32) -> Polygon {
        Polygon::new(
            vec![
                Vec2::new(0.0, y),
                Vec2::new(1000.0, y),
                Vec2::new(1000.0, y + 100.0),
                Vec2::new(0.0, y + 100.0),
            ],
            PlatformStyle::Grass,
        )
    }

    #[test]
    fn test_no_contact_when_clear() {
        let mut ball = Ball::new(Vec2::new(500.0, 400.0), 50.0);
        ball.vel = Vec2::new(0.0, 5.0);
        let contacts = resolve_collisions(&mut ball, [&floor(500.0)], COLLISION_RESPONSE);
        assert_eq!(contacts, 0);
        assert_eq!(ball.pos, Vec2::new(500.0, 400.0));
    }

    #[test]
    fn test_push_out_and_damped_bounce() {
        let mut ball = Ball::new(Vec2::new(500.0, 460.0), 50.0);
        ball.vel = Vec2::new(3.0, 10.0);
        let contacts = resolve_collisions(&mut ball, [&floor(500.0)], COLLISION_RESPONSE);
        assert_eq!(contacts, 1);
        assert!((ball.pos.y - 450.0).abs() < 1e-4);
        // Normal is (0, -1): v.n = -10, v -= 1.5 * -10 * (0, -1) -> vy = -5
        assert!((ball.vel.y - (-5.0)).abs() < 1e-4);
        assert_eq!(ball.vel.x, 3.0);
    }

    #[test]
    fn test_corner_contact_pushes_diagonally() {
        let mut ball = Ball::new(Vec2::new(-30.0, 470.0), 50.0);
        resolve_collisions(&mut ball, [&floor(500.0)], COLLISION_RESPONSE);
        let dist = ball.pos.distance(Vec2::new(0.0, 500.0));
        assert!((dist - 50.0).abs() < 1e-3);
        assert!(ball.pos.x < -30.0 && ball.pos.y < 470.0);
    }

    #[test]
    fn test_degenerate_edges_are_skipped() {
        let poly = Polygon::new(
            vec![
                Vec2::new(0.0, 500.0),
                Vec2::new(0.0, 500.0),
                Vec2::new(1000.0, 500.0),
                Vec2::new(500.0, 800.0),
            ],
            PlatformStyle::Stone,
        );
        let mut ball = Ball::new(Vec2::new(0.0, 500.0), 50.0);
        resolve_collisions(&mut ball, [&poly], COLLISION_RESPONSE);
        assert!(ball.pos.is_finite());
        assert!(ball.vel.is_finite());
    }

    #[test]
    fn test_center_on_edge_uses_fallback_normal() {
        // Falling straight down onto the edge: pushed back up
        let contact = circle_edge_contact(
            Vec2::new(500.0, 500.0),
            50.0,
            Vec2::new(0.0, 4.0),
            Vec2::new(0.0, 500.0),
            Vec2::new(1000.0, 500.0),
        )
        .unwrap();
        assert_eq!(contact.penetration, 50.0);
        assert!((contact.normal - Vec2::new(0.0, -1.0)).length() < 1e-6);

        // At rest: upward
        let contact = circle_edge_contact(
            Vec2::new(500.0, 500.0),
            50.0,
            Vec2::ZERO,
            Vec2::new(1000.0, 500.0),
            Vec2::new(0.0, 500.0),
        )
        .unwrap();
        assert!((contact.normal - Vec2::new(0.0, -1.0)).length() < 1e-6);

        let mut ball = Ball::new(Vec2::new(500.0, 500.0), 50.0);
        ball.vel = Vec2::new(0.0, 4.0);
        resolve_collisions(&mut ball, [&floor(500.0)], COLLISION_RESPONSE);
        assert!(ball.pos.is_finite());
    }

    #[test]
    fn test_repeated_resolution_does_not_diverge() {
        // Wedge: ball jammed between two slopes
        let wedge = Polygon::new(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 100.0),
                Vec2::new(200.0, 0.0),
                Vec2::new(200.0, 300.0),
                Vec2::new(0.0, 300.0),
            ],
            PlatformStyle::Ember,
        );
        let mut ball = Ball::new(Vec2::new(100.0, 60.0), 30.0);
        for _ in 0..120 {
            ball.vel.y += 1.0;
            ball.pos += ball.vel;
            resolve_collisions(&mut ball, [&wedge], COLLISION_RESPONSE);
            assert!(ball.pos.is_finite());
            assert!(ball.pos.y < 100.0);
        }
    }

    proptest! {
        #[test]
        fn prop_single_edge_penetration_eliminated(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            px in -500.0f32..500.0, py in -500.0f32..500.0,
            radius in 1.0f32..80.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assume!(a.distance(b) > 1.0);
            let center = Vec2::new(px, py);
            let (_, before) = edge_distance(center, a, b).unwrap();
            prop_assume!(before > 1e-3);

            let poly = Polygon::new(vec![a, b, a], PlatformStyle::Ember);
            let mut ball = Ball::new(center, radius);
            resolve_collisions(&mut ball, [&poly], COLLISION_RESPONSE);

            let (_, after) = edge_distance(ball.pos, a, b).unwrap();
            prop_assert!(after >= radius.min(before) - 1e-2, "after {} radius {}", after, radius);
        }
    }
}
