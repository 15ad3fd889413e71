//! Win/loss rules: falling out, spikes, reaching the flag
//!
//! Checked after collision resolution every step, in order: fall-out, hazard,
//! goal. The first match decides, and a terminal outcome never changes again
//! until the level is restarted.

use glam::Vec2;

use super::state::{Ball, LossCause, SimulationOutcome};
use crate::level::Level;

/// Evaluate the rules for the ball's current position.
///
/// Any transition to Won or Lost zeroes the ball's velocity.
pub fn evaluate(
    ball: &mut Ball,
    level: &Level,
    current: SimulationOutcome,
    goal_radius: f32,
) -> SimulationOutcome {
    if current.is_terminal() {
        return current;
    }

    let outcome = if fell_out(ball, level) {
        SimulationOutcome::Lost(LossCause::FellOutOfBounds)
    } else if hit_hazard(ball, level) {
        SimulationOutcome::Lost(LossCause::HitHazard)
    } else if reached_goal(ball.pos, level.flag, goal_radius) {
        SimulationOutcome::Won
    } else {
        SimulationOutcome::Running
    };

    if outcome.is_terminal() {
        ball.vel = Vec2::ZERO;
        log::info!(
            "Level {} outcome {:?} at ({:.1}, {:.1})",
            level.id,
            outcome,
            ball.pos.x,
            ball.pos.y
        );
    }
    outcome
}

/// Ball dropped completely below the level
pub fn fell_out(ball: &Ball, level: &Level) -> bool {
    ball.pos.y > level.height + ball.radius
}

/// Ball overlaps any spike
pub fn hit_hazard(ball: &Ball, level: &Level) -> bool {
    level
        .spikes
        .iter()
        .any(|spike| ball.pos.distance(spike.center) < ball.radius + spike.radius)
}

/// Ball center within the goal radius of the flag (inclusive)
pub fn reached_goal(pos: Vec2, flag: Vec2, goal_radius: f32) -> bool {
    pos.distance_squared(flag) <= goal_radius * goal_radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Spike;

    fn level() -> Level {
        Level {
            id: 7,
            width: 2000.0,
            height: 1000.0,
            ball_start: Vec2::new(100.0, 100.0),
            flag: Vec2::new(1800.0, 400.0),
            spikes: vec![Spike {
                center: Vec2::new(600.0, 800.0),
                radius: 40.0,
            }],
            platforms: Vec::new(),
            rotating_platforms: Vec::new(),
        }
    }

    fn ball_at(x: f32, y: f32) -> Ball {
        let mut ball = Ball::new(Vec2::new(x, y), 50.0);
        ball.vel = Vec2::new(4.0, 6.0);
        ball
    }

    #[test]
    fn test_running_when_nothing_matches() {
        let mut ball = ball_at(300.0, 300.0);
        let outcome = evaluate(&mut ball, &level(), SimulationOutcome::Running, 50.0);
        assert_eq!(outcome, SimulationOutcome::Running);
        assert_eq!(ball.vel, Vec2::new(4.0, 6.0));
    }

    #[test]
    fn test_fall_out() {
        let mut ball = ball_at(300.0, 1050.5);
        let outcome = evaluate(&mut ball, &level(), SimulationOutcome::Running, 50.0);
        assert_eq!(outcome, SimulationOutcome::Lost(LossCause::FellOutOfBounds));
        assert_eq!(ball.vel, Vec2::ZERO);

        // Exactly on the boundary is still in play
        let mut ball = ball_at(300.0, 1050.0);
        let outcome = evaluate(&mut ball, &level(), SimulationOutcome::Running, 50.0);
        assert_eq!(outcome, SimulationOutcome::Running);
    }

    #[test]
    fn test_hazard_contact() {
        let mut ball = ball_at(600.0 + 89.0, 800.0);
        let outcome = evaluate(&mut ball, &level(), SimulationOutcome::Running, 50.0);
        assert_eq!(outcome, SimulationOutcome::Lost(LossCause::HitHazard));

        let mut ball = ball_at(600.0 + 90.0, 800.0);
        let outcome = evaluate(&mut ball, &level(), SimulationOutcome::Running, 50.0);
        assert_eq!(outcome, SimulationOutcome::Running);
    }

    #[test]
    fn test_goal_at_flag() {
        let mut ball = ball_at(1800.0, 400.0);
        let outcome = evaluate(&mut ball, &level(), SimulationOutcome::Running, 50.0);
        assert_eq!(outcome, SimulationOutcome::Won);
        assert_eq!(ball.vel, Vec2::ZERO);

        // Inclusive boundary, independent of ball radius
        let mut ball = ball_at(1850.0, 400.0);
        ball.radius = 5.0;
        let outcome = evaluate(&mut ball, &level(), SimulationOutcome::Running, 50.0);
        assert_eq!(outcome, SimulationOutcome::Won);
    }

    #[test]
    fn test_loss_beats_win_in_same_step() {
        let mut lvl = level();
        lvl.spikes[0].center = lvl.flag + Vec2::new(60.0, 0.0);
        let mut ball = ball_at(1800.0, 400.0);
        let outcome = evaluate(&mut ball, &lvl, SimulationOutcome::Running, 50.0);
        assert_eq!(outcome, SimulationOutcome::Lost(LossCause::HitHazard));
    }

    #[test]
    fn test_terminal_outcome_is_frozen() {
        let mut ball = ball_at(600.0, 800.0);
        let outcome = evaluate(&mut ball, &level(), SimulationOutcome::Won, 50.0);
        assert_eq!(outcome, SimulationOutcome::Won);
        // Frozen outcomes do not touch the ball
        assert_eq!(ball.vel, Vec2::new(4.0, 6.0));

        let mut ball = ball_at(1800.0, 400.0);
        let lost = SimulationOutcome::Lost(LossCause::FellOutOfBounds);
        assert_eq!(evaluate(&mut ball, &level(), lost, 50.0), lost);
    }
}
