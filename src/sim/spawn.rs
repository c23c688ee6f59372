//! Obstacle generation
//!
//! Gap positions are random but chained: each gap stays within
//! `max_gap_delta` of the previous one so consecutive gates stay reachable.

use rand::Rng;

use crate::consts::MIN_GAP_WINDOW;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Picks gap-top offsets for new obstacles
#[derive(Debug, Clone)]
pub struct ObstacleGenerator {
    /// Hard band `[min, max]` for gap tops
    min_top: f32,
    max_top: f32,
    max_delta: f32,
    /// Gap top of the previously generated obstacle this run
    prev: Option<f32>,
}

impl ObstacleGenerator {
    pub fn new(tuning: &Tuning) -> Result<Self, ConfigError> {
        let (min_top, max_top) = tuning.gap_top_bounds();
        if max_top < min_top {
            return Err(ConfigError::GapDoesNotFit {
                gap_height: tuning.gap_height,
                min_gap_top: tuning.min_gap_top,
                field_height: tuning.field_height,
            });
        }
        // Below half a window, a collapse could land further than the delta
        if tuning.max_gap_delta.is_nan() || tuning.max_gap_delta < MIN_GAP_WINDOW / 2.0 {
            return Err(ConfigError::GapDeltaTooSmall {
                delta: tuning.max_gap_delta,
                min: MIN_GAP_WINDOW / 2.0,
            });
        }
        Ok(Self {
            min_top,
            max_top,
            max_delta: tuning.max_gap_delta,
            prev: None,
        })
    }

    /// Forget the previous gap (new run)
    pub fn reset(&mut self) {
        self.prev = None;
    }

    /// Hard band for gap tops
    pub fn bounds(&self) -> (f32, f32) {
        (self.min_top, self.max_top)
    }

    /// Reference gap used before the first obstacle of a run
    pub fn default_top(&self) -> f32 {
        (self.min_top + self.max_top) / 2.0
    }

    /// Allowed range for the next gap top given the previous one
    ///
    /// Returns a degenerate `(b, b)` range on the nearest hard bound when the
    /// soft window is narrower than one unit.
    pub fn window(&self, prev: f32) -> (f32, f32) {
        let lo = (prev - self.max_delta).max(self.min_top);
        let hi = (prev + self.max_delta).min(self.max_top);
        if hi - lo < MIN_GAP_WINDOW {
            let nearest = if (prev - self.min_top).abs() <= (self.max_top - prev).abs() {
                self.min_top
            } else {
                self.max_top
            };
            return (nearest, nearest);
        }
        (lo, hi)
    }

    /// Draw the next gap top uniformly from the allowed window
    pub fn next_gap_top(&mut self, rng: &mut impl Rng) -> f32 {
        let prev = self.prev.unwrap_or_else(|| self.default_top());
        let (lo, hi) = self.window(prev);
        let top = if hi > lo {
            rng.random_range(lo..=hi)
        } else {
            lo
        };
        self.prev = Some(top);
        top
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn generator() -> ObstacleGenerator {
        ObstacleGenerator::new(&Tuning::default()).expect("default tuning is valid")
    }

    #[test]
    fn test_window_is_clamped_to_hard_band() {
        let spawner = generator();
        assert_eq!(spawner.window(60.0), (50.0, 210.0));
        assert_eq!(spawner.window(360.0), (210.0, 370.0));
        assert_eq!(spawner.window(200.0), (50.0, 350.0));
    }

    #[test]
    fn test_narrow_window_collapses_to_nearest_bound() {
        let tuning = Tuning {
            field_height: 280.5,
            gap_height: 180.0,
            min_gap_top: 50.0,
            ..Default::default()
        };
        // Hard band is [50, 50.5], narrower than one unit
        let spawner = ObstacleGenerator::new(&tuning).expect("band is not empty");
        assert_eq!(spawner.window(50.1), (50.0, 50.0));
        assert_eq!(spawner.window(50.4), (50.5, 50.5));
    }

    #[test]
    fn test_impossible_band_is_a_config_error() {
        let tuning = Tuning {
            field_height: 200.0,
            ..Default::default()
        };
        assert!(matches!(
            ObstacleGenerator::new(&tuning),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_tiny_delta_is_a_config_error() {
        for delta in [0.0, 0.3, 0.49] {
            let tuning = Tuning {
                max_gap_delta: delta,
                ..Default::default()
            };
            assert!(matches!(
                ObstacleGenerator::new(&tuning),
                Err(ConfigError::GapDeltaTooSmall { .. })
            ));
        }
    }

    #[test]
    fn test_half_window_delta_stays_reachable_at_the_band_edge() {
        let tuning = Tuning {
            max_gap_delta: 0.5,
            ..Default::default()
        };
        let spawner = ObstacleGenerator::new(&tuning).expect("delta of half a window is allowed");
        let (lo, hi) = spawner.window(210.0);
        assert!(lo >= 209.5 && hi <= 210.5);
        // Clipped by the hard floor: collapses onto the floor, which is in reach
        assert_eq!(spawner.window(50.2), (50.0, 50.0));
    }

    #[test]
    fn test_first_gap_is_near_center() {
        let mut spawner = generator();
        let mut rng = Pcg32::seed_from_u64(3);
        let center = spawner.default_top();
        let top = spawner.next_gap_top(&mut rng);
        assert!((top - center).abs() <= 150.0);
    }

    #[test]
    fn test_reset_forgets_previous_gap() {
        let mut spawner = generator();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..5 {
            spawner.next_gap_top(&mut rng);
        }
        spawner.reset();
        assert!(spawner.prev.is_none());
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut a = generator();
        let mut b = generator();
        let mut rng_a = Pcg32::seed_from_u64(99);
        let mut rng_b = Pcg32::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(a.next_gap_top(&mut rng_a), b.next_gap_top(&mut rng_b));
        }
    }

    proptest! {
        #[test]
        fn gaps_stay_in_hard_band(seed in any::<u64>()) {
            let mut spawner = generator();
            let (lo, hi) = spawner.bounds();
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..200 {
                let top = spawner.next_gap_top(&mut rng);
                prop_assert!(top >= lo && top <= hi, "gap top {} outside [{}, {}]", top, lo, hi);
            }
        }

        #[test]
        fn consecutive_gaps_are_reachable(seed in any::<u64>(), max_delta in 0.5f32..400.0) {
            let tuning = Tuning { max_gap_delta: max_delta, ..Default::default() };
            let mut spawner = ObstacleGenerator::new(&tuning).unwrap();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut prev = spawner.next_gap_top(&mut rng);
            for _ in 0..200 {
                let top = spawner.next_gap_top(&mut rng);
                prop_assert!((top - prev).abs() <= max_delta + 1e-3);
                prev = top;
            }
        }
    }
}
