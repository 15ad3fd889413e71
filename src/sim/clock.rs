//! Wall-clock driver for the variable-length frame
//!
//! The host calls `advance` with a monotonic millisecond timestamp once per
//! frame. The first call after construction or `reset` has no previous sample
//! and yields a zero delta.

/// Time elapsed since the previous frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameDelta {
    /// Raw wall-clock milliseconds since the previous frame
    pub elapsed_ms: u64,
    /// Seconds to integrate, clamped to the maximum frame delta
    pub dt: f32,
}

#[derive(Debug, Clone)]
pub struct SimulationClock {
    last_ms: Option<u64>,
    max_frame_dt: f32,
}

impl SimulationClock {
    pub fn new(max_frame_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_frame_dt,
        }
    }

    /// Record a frame at `now_ms` and return the delta since the previous one.
    /// A clock that went backwards yields a zero delta.
    pub fn advance(&mut self, now_ms: u64) -> FrameDelta {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return FrameDelta::default();
        };
        let elapsed_ms = now_ms.saturating_sub(last);
        let raw_dt = elapsed_ms as f32 / 1000.0;
        let dt = if raw_dt > self.max_frame_dt {
            log::warn!("Frame gap of {} ms clamped to {} s", elapsed_ms, self.max_frame_dt);
            self.max_frame_dt
        } else {
            raw_dt
        };
        FrameDelta { elapsed_ms, dt }
    }

    /// Forget the previous sample; the next frame integrates nothing
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = SimulationClock::new(0.1);
        assert_eq!(clock.advance(5_000), FrameDelta::default());
        let delta = clock.advance(5_016);
        assert_eq!(delta.elapsed_ms, 16);
        assert!((delta.dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_clock() {
        let mut clock = SimulationClock::new(0.1);
        clock.advance(1_000);
        assert_eq!(clock.advance(900), FrameDelta::default());
        assert_eq!(clock.advance(917).elapsed_ms, 17);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = SimulationClock::new(0.1);
        clock.advance(0);
        let delta = clock.advance(2_000);
        assert_eq!(delta.elapsed_ms, 2_000);
        assert_eq!(delta.dt, 0.1);
    }

    #[test]
    fn test_reset() {
        let mut clock = SimulationClock::new(0.1);
        clock.advance(0);
        clock.reset();
        assert_eq!(clock.advance(50), FrameDelta::default());
    }
}
