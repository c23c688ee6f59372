//! Difficulty progression
//!
//! Every `difficulty_threshold` points the obstacles scroll faster and spawn
//! more often. The spawn interval never drops below `min_spawn_interval`.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Obstacle speed and spawn cadence in effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pace {
    /// Obstacle scroll speed (pixels/s)
    pub speed: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
}

impl Pace {
    pub fn initial(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.initial_speed,
            spawn_interval: tuning.initial_spawn_interval,
        }
    }

    /// Apply one difficulty step, flooring the interval
    pub fn raise(&mut self, step: DifficultyStep, min_interval: f32) {
        self.speed += step.speed_delta;
        self.spawn_interval = (self.spawn_interval - step.interval_delta).max(min_interval);
    }
}

/// Change to apply after a scoring event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyStep {
    pub speed_delta: f32,
    pub interval_delta: f32,
}

/// Step for a freshly reached score, if it lands on a threshold multiple
pub fn step_for_score(score: u32, tuning: &Tuning) -> Option<DifficultyStep> {
    let threshold = tuning.difficulty_threshold;
    if score == 0 || threshold == 0 || score % threshold != 0 {
        return None;
    }
    Some(DifficultyStep {
        speed_delta: tuning.speed_increment,
        interval_delta: tuning.interval_decrement,
    })
}
