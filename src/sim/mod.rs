//! Simulation core
//!
//! All gameplay logic lives here. This module must stay pure:
//! - No rendering, storage or network dependencies
//! - Time comes in from the host (`Simulation::tick`)
//! - Sensor input comes in as raw samples (`Simulation::on_raw_sensor_sample`)

pub mod camera;
pub mod clock;
pub mod collision;
pub mod geometry;
pub mod integrate;
pub mod jump;
pub mod platform;
pub mod rules;
pub mod session;
pub mod state;
pub mod tick;
pub mod tilt;

pub use clock::{FrameDelta, SimulationClock};
pub use collision::{Contact, circle_edge_contact, resolve_collisions};
pub use geometry::{PlatformStyle, Polygon};
pub use jump::{is_touching_ground, try_jump};
pub use platform::RotatingPlatform;
pub use session::{Command, SensorKind, SensorSample, SetupError, Simulation};
pub use state::{Ball, FrameState, LossCause, SimulationOutcome, SimulationState};
pub use tick::step;
pub use tilt::TiltState;
