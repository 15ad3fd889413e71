//! Shake Tilt - a tilt-controlled ball platformer
//!
//! Core modules:
//! - `sim`: Simulation core (integration, collisions, rotating platforms, rules)
//! - `level`: Level geometry, validation and the built-in level catalog
//! - `tuning`: Data-driven game balance
//! - `runtime`: Dedicated simulation thread fed by sensor/command channels

pub mod level;
pub mod runtime;
pub mod sim;
pub mod tuning;

pub use level::{Level, LevelCatalog, LevelError};
pub use runtime::{SensorSender, SimulationThread};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Target simulation rate (Hz)
    pub const TARGET_FPS: f32 = 60.0;
    /// Position integration scale: velocities are expressed per 1/60 s
    pub const FRAME_SCALE: f32 = 60.0;
    /// Largest wall-clock delta a single frame may integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Virtual viewport (the camera works in level units)
    pub const VIEWPORT_WIDTH: f32 = 1920.0;
    pub const VIEWPORT_HEIGHT: f32 = 1080.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 50.0;
    pub const GRAVITY: f32 = 1.0;
    pub const AIR_FRICTION: f32 = 0.98;
    /// Horizontal acceleration per unit of tilt, per step
    pub const TILT_ACCEL: f32 = 1.0;
    pub const MAX_VEL_X: f32 = 10.0;
    /// Upward (negative y) velocity limit; jumps start at -30 so this rarely binds
    pub const MIN_VEL_Y: f32 = -100.0;
    pub const MAX_VEL_Y: f32 = 20.0;

    /// Visual spin
    pub const SPIN_THRESHOLD: f32 = 0.5;
    pub const SPIN_FACTOR: f32 = 0.5;
    pub const SPIN_DECAY: f32 = 0.9;

    /// Fraction of the normal velocity removed on contact (1.0 = stop, 2.0 = elastic)
    pub const COLLISION_RESPONSE: f32 = 1.5;

    /// Tilt filter
    pub const TILT_SMOOTHING: f32 = 0.2;
    pub const TILT_DEADZONE: f32 = 0.05;
    pub const BASELINE_ADAPT_RATE: f32 = 0.001;
    pub const GYRO_GAIN: f32 = 0.02;
    /// Gyro readings beyond this rate (rad/s) are discarded as malformed
    pub const MAX_GYRO_RATE: f32 = 35.0;

    /// Shake-to-jump
    pub const SHAKE_THRESHOLD: f32 = 15.0;
    pub const JUMP_VELOCITY: f32 = -30.0;
    pub const GROUND_TOLERANCE: f32 = 1.0;

    /// Goal check radius (independent of the ball radius)
    pub const GOAL_RADIUS: f32 = 50.0;
    /// Spike radius when the level data omits one
    pub const SPIKE_RADIUS: f32 = 40.0;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Normalize an angle in radians to [-PI, PI)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped >= PI { -PI } else { wrapped }
}

/// Format a level timer as `M:SS.mmm`
pub fn format_elapsed(ms: u64) -> String {
    let minutes = ms / 1000 / 60;
    let seconds = (ms / 1000) % 60;
    let millis = ms % 1000;
    format!("{}:{:02}.{:03}", minutes, seconds, millis)
}
