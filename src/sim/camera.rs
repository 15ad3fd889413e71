//! Camera follow: keep the ball centered without showing outside the level

use glam::Vec2;

/// Viewport origin (top-left) that centers `ball_pos`, clamped to the level bounds.
/// A viewport larger than the level pins the origin at 0 on that axis.
pub fn follow(ball_pos: Vec2, viewport: Vec2, level_size: Vec2) -> Vec2 {
    let max_origin = (level_size - viewport).max(Vec2::ZERO);
    (ball_pos - viewport / 2.0).clamp(Vec2::ZERO, max_origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Vec2 = Vec2::new(1920.0, 1080.0);

    #[test]
    fn test_centers_ball() {
        let cam = follow(Vec2::new(3000.0, 1000.0), VIEW, Vec2::new(6400.0, 2000.0));
        assert_eq!(cam, Vec2::new(3000.0 - 960.0, 1000.0 - 540.0));
    }

    #[test]
    fn test_clamps_to_edges() {
        let level = Vec2::new(6400.0, 2000.0);
        assert_eq!(follow(Vec2::new(10.0, 10.0), VIEW, level), Vec2::ZERO);
        assert_eq!(
            follow(Vec2::new(6390.0, 1990.0), VIEW, level),
            Vec2::new(6400.0 - 1920.0, 2000.0 - 1080.0)
        );
    }

    #[test]
    fn test_level_smaller_than_viewport() {
        // Level 1 is exactly one screen tall
        let cam = follow(Vec2::new(3000.0, 900.0), VIEW, Vec2::new(6400.0, 1080.0));
        assert_eq!(cam.y, 0.0);
        let cam = follow(Vec2::new(500.0, 500.0), VIEW, Vec2::new(1000.0, 800.0));
        assert_eq!(cam, Vec2::ZERO);
    }
}
