//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so levels can be
//! retuned without touching the physics code. Loaded from JSON; any key left
//! out keeps its default.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics, input and camera tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball ===
    pub ball_radius: f32,
    /// Added to velocity.y every step
    pub gravity: f32,
    /// Velocity multiplier applied every step
    pub air_friction: f32,
    /// Added to velocity.x every step, scaled by the tilt signal
    pub tilt_accel: f32,
    pub max_vel_x: f32,
    pub min_vel_y: f32,
    pub max_vel_y: f32,
    /// Position integration scale (velocities are per 1/60 s)
    pub frame_scale: f32,

    // === Spin (visual only) ===
    pub spin_threshold: f32,
    pub spin_factor: f32,
    pub spin_decay: f32,

    // === Collision ===
    /// Multiple of the normal velocity component removed on contact
    pub collision_response: f32,

    // === Tilt filter ===
    pub tilt_smoothing: f32,
    pub tilt_deadzone: f32,
    pub baseline_adapt_rate: f32,
    pub gyro_gain: f32,

    // === Jump ===
    pub shake_threshold: f32,
    pub jump_velocity: f32,
    pub ground_tolerance: f32,

    // === Goal ===
    pub goal_radius: f32,

    // === Camera / clock ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub target_fps: f32,
    /// Wall-clock gaps longer than this are clamped before integration
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            gravity: GRAVITY,
            air_friction: AIR_FRICTION,
            tilt_accel: TILT_ACCEL,
            max_vel_x: MAX_VEL_X,
            min_vel_y: MIN_VEL_Y,
            max_vel_y: MAX_VEL_Y,
            frame_scale: FRAME_SCALE,

            spin_threshold: SPIN_THRESHOLD,
            spin_factor: SPIN_FACTOR,
            spin_decay: SPIN_DECAY,

            collision_response: COLLISION_RESPONSE,

            tilt_smoothing: TILT_SMOOTHING,
            tilt_deadzone: TILT_DEADZONE,
            baseline_adapt_rate: BASELINE_ADAPT_RATE,
            gyro_gain: GYRO_GAIN,

            shake_threshold: SHAKE_THRESHOLD,
            jump_velocity: JUMP_VELOCITY,
            ground_tolerance: GROUND_TOLERANCE,

            goal_radius: GOAL_RADIUS,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            target_fps: TARGET_FPS,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

/// Reason a tuning file was rejected
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Invalid { field: &'static str, value: f32 },
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::Parse(err) => write!(f, "failed to parse tuning: {}", err),
            TuningError::Invalid { field, value } => {
                write!(f, "invalid tuning value {} = {}", field, value)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Reject values that would poison the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("ball_radius", self.ball_radius),
            ("frame_scale", self.frame_scale),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("target_fps", self.target_fps),
            ("max_frame_dt", self.max_frame_dt),
            ("goal_radius", self.goal_radius),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid { field, value });
            }
        }

        let finite = [
            ("gravity", self.gravity),
            ("air_friction", self.air_friction),
            ("tilt_accel", self.tilt_accel),
            ("spin_threshold", self.spin_threshold),
            ("spin_factor", self.spin_factor),
            ("spin_decay", self.spin_decay),
            ("collision_response", self.collision_response),
            ("tilt_deadzone", self.tilt_deadzone),
            ("gyro_gain", self.gyro_gain),
            ("shake_threshold", self.shake_threshold),
            ("jump_velocity", self.jump_velocity),
            ("ground_tolerance", self.ground_tolerance),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::Invalid { field, value });
            }
        }

        // Clamp bounds must form a non-empty range
        if !(self.max_vel_x.is_finite() && self.max_vel_x >= 0.0) {
            return Err(TuningError::Invalid { field: "max_vel_x", value: self.max_vel_x });
        }
        if !(self.min_vel_y.is_finite() && self.max_vel_y.is_finite())
            || self.min_vel_y > self.max_vel_y
        {
            return Err(TuningError::Invalid { field: "min_vel_y", value: self.min_vel_y });
        }

        // The loop sleeps for 1 / target_fps; keep that a sane duration
        if !(1.0..=1000.0).contains(&self.target_fps) {
            return Err(TuningError::Invalid { field: "target_fps", value: self.target_fps });
        }

        for (field, value) in [
            ("tilt_smoothing", self.tilt_smoothing),
            ("baseline_adapt_rate", self.baseline_adapt_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::Invalid { field, value });
            }
        }

        Ok(())
    }

    /// Frame budget of the simulation loop in seconds
    pub fn frame_budget(&self) -> f32 {
        1.0 / self.target_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.ball_radius, 50.0);
        assert_eq!(tuning.jump_velocity, -30.0);
        assert!((tuning.frame_budget() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 2.0, "viewport_width": 1280 }"#).unwrap();
        assert_eq!(tuning.gravity, 2.0);
        assert_eq!(tuning.viewport_width, 1280.0);
        assert_eq!(tuning.air_friction, AIR_FRICTION);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "ball_radius": 0 }"#),
            Err(TuningError::Invalid { field: "ball_radius", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "min_vel_y": 50, "max_vel_y": 20 }"#),
            Err(TuningError::Invalid { field: "min_vel_y", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "tilt_smoothing": 1.5 }"#),
            Err(TuningError::Invalid { field: "tilt_smoothing", .. })
        ));
        assert!(matches!(Tuning::from_json("not json"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_target_fps_range() {
        for fps in [1e-30, 0.5, 5000.0] {
            let tuning = Tuning {
                target_fps: fps,
                ..Tuning::default()
            };
            assert!(matches!(
                tuning.validate(),
                Err(TuningError::Invalid { field: "target_fps", .. })
            ));
        }
        let tuning = Tuning {
            target_fps: 1.0,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.frame_budget(), 1.0);
    }
}
