//! Frame clock
//!
//! Turns the host's animation-frame timestamps (milliseconds) into the
//! per-tick delta in seconds.

/// Tracks the previous frame timestamp
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous frame, clamped to `[0, max_dt]`.
    ///
    /// The first frame after construction or [`FrameClock::reset`] yields 0.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        dt.clamp(0.0, self.max_dt)
    }

    /// Drop the reference timestamp (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.advance(1234.0), 0.0);
    }

    #[test]
    fn test_delta_in_seconds() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(1000.0);
        assert!((clock.advance(1016.0) - 0.016).abs() < 1e-6);
        assert!((clock.advance(1048.0) - 0.032).abs() < 1e-6);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(0.0);
        assert_eq!(clock.advance(3000.0), 0.1);
    }

    #[test]
    fn test_backwards_timestamp_is_zero() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), 0.0);
    }

    #[test]
    fn test_reset_restarts_reference() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(10_000.0), 0.0);
        assert!((clock.advance(10_050.0) - 0.05).abs() < 1e-6);
    }
}
