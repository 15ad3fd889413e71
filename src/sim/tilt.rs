//! Tilt filter: raw device orientation -> horizontal control signal
//!
//! The accelerometer gives an absolute roll angle; a slowly adapting baseline
//! tracks how the player naturally holds the device, and the control signal is
//! the sine of the deviation from that baseline, exponentially smoothed and
//! hard-clipped to zero inside a dead-zone. Gyroscope samples nudge the roll
//! between accelerometer updates for responsiveness. The gyro shortcut is not
//! a proper sensor-fusion filter; the next accelerometer sample overwrites it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_GYRO_RATE;
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Filter state, mutated by sensor callbacks and once per simulation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TiltState {
    /// Latest roll (radians), from the accelerometer plus gyro nudges
    pub roll: f32,
    /// Latest pitch (radians), tracked from the gyro only
    pub pitch: f32,
    /// "Neutral" roll the player holds the device at
    pub baseline_roll: f32,
    /// Exponentially smoothed tilt signal before the dead-zone
    pub smoothed: f32,
}

impl TiltState {
    /// Feed a raw roll angle (radians) from the accelerometer
    pub fn update(&mut self, raw_roll: f32, baseline_adapt_rate: f32) {
        if !raw_roll.is_finite() {
            log::warn!("Ignoring non-finite roll sample");
            return;
        }
        self.roll = raw_roll;
        self.baseline_roll =
            self.baseline_roll * (1.0 - baseline_adapt_rate) + raw_roll * baseline_adapt_rate;
    }

    /// Feed an accelerometer vector; roll is the rotation about the device x axis.
    /// Returns false if the sample was rejected.
    pub fn on_accelerometer(&mut self, accel: Vec3, tuning: &Tuning) -> bool {
        if !accel.is_finite() {
            log::warn!("Ignoring non-finite accelerometer sample {:?}", accel);
            return false;
        }
        self.update(accel.y.atan2(accel.z), tuning.baseline_adapt_rate);
        true
    }

    /// Feed a gyroscope vector (rad/s); perturbs roll and pitch until the next
    /// accelerometer sample. Returns false if the sample was rejected.
    pub fn on_gyroscope(&mut self, gyro: Vec3, tuning: &Tuning) -> bool {
        if !gyro.is_finite() || gyro.abs().max_element() > MAX_GYRO_RATE {
            log::warn!("Ignoring out-of-range gyroscope sample {:?}", gyro);
            return false;
        }
        // Wrapped so repeated nudges stay bounded; the sine signal is unaffected
        self.roll = normalize_angle(self.roll + gyro.y * tuning.gyro_gain);
        self.pitch = normalize_angle(self.pitch + gyro.x * tuning.gyro_gain);
        true
    }

    /// Advance the smoothing by one step and return the effective control signal
    pub fn sample(&mut self, tuning: &Tuning) -> f32 {
        let instantaneous = (self.roll - self.baseline_roll).sin();
        self.smoothed =
            self.smoothed * (1.0 - tuning.tilt_smoothing) + instantaneous * tuning.tilt_smoothing;
        self.effective(tuning)
    }

    /// Current control signal without advancing the filter
    pub fn effective(&self, tuning: &Tuning) -> f32 {
        apply_deadzone(self.smoothed, tuning.tilt_deadzone)
    }

    /// Forget the smoothed signal; baseline and raw roll describe the device and survive
    pub fn reset_control(&mut self) {
        self.smoothed = 0.0;
    }
}

/// Hard clip: inside the dead-zone the output is exactly zero, outside it is untouched
#[inline]
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() < deadzone { 0.0 } else { value }
}
