//! Data-driven game balance
//!
//! Every tunable the simulation reads lives here. Defaults come from
//! [`crate::consts`]; a JSON file can override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Complete set of simulation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub body_x: f32,
    pub body_radius: f32,

    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Velocity set by an impulse (negative is up)
    pub impulse_velocity: f32,

    pub obstacle_width: f32,
    pub gap_height: f32,
    pub min_gap_top: f32,
    pub max_gap_delta: f32,

    pub initial_speed: f32,
    pub initial_spawn_interval: f32,

    pub difficulty_threshold: u32,
    pub speed_increment: f32,
    pub interval_decrement: f32,
    pub min_spawn_interval: f32,

    /// Frame delta clamp (seconds)
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            body_x: BODY_X,
            body_radius: BODY_RADIUS,
            gravity: GRAVITY_ACCEL,
            impulse_velocity: IMPULSE_VELOCITY,
            obstacle_width: OBSTACLE_WIDTH,
            gap_height: GAP_HEIGHT,
            min_gap_top: MIN_GAP_TOP,
            max_gap_delta: MAX_GAP_DELTA,
            initial_speed: INITIAL_SPEED,
            initial_spawn_interval: INITIAL_SPAWN_INTERVAL,
            difficulty_threshold: DIFFICULTY_THRESHOLD,
            speed_increment: SPEED_INCREMENT,
            interval_decrement: INTERVAL_DECREMENT,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Hard band for gap-top offsets: `[min_gap_top, field_height - gap_height - min_gap_top]`
    pub fn gap_top_bounds(&self) -> (f32, f32) {
        (
            self.min_gap_top,
            self.field_height - self.gap_height - self.min_gap_top,
        )
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reals = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("body_x", self.body_x),
            ("body_radius", self.body_radius),
            ("gravity", self.gravity),
            ("impulse_velocity", self.impulse_velocity),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("min_gap_top", self.min_gap_top),
            ("max_gap_delta", self.max_gap_delta),
            ("initial_speed", self.initial_speed),
            ("initial_spawn_interval", self.initial_spawn_interval),
            ("speed_increment", self.speed_increment),
            ("interval_decrement", self.interval_decrement),
            ("min_spawn_interval", self.min_spawn_interval),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in reals {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }

        let positives = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("body_radius", self.body_radius),
            ("gravity", self.gravity),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("max_gap_delta", self.max_gap_delta),
            ("initial_speed", self.initial_speed),
            ("initial_spawn_interval", self.initial_spawn_interval),
            ("min_spawn_interval", self.min_spawn_interval),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        let steps = [
            ("speed_increment", self.speed_increment),
            ("interval_decrement", self.interval_decrement),
        ];
        for (name, value) in steps {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if self.max_gap_delta < MIN_GAP_WINDOW / 2.0 {
            return Err(ConfigError::GapDeltaTooSmall {
                delta: self.max_gap_delta,
                min: MIN_GAP_WINDOW / 2.0,
            });
        }

        if self.impulse_velocity >= 0.0 {
            return Err(ConfigError::ImpulseNotUpward(self.impulse_velocity));
        }
        if self.difficulty_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.min_spawn_interval > self.initial_spawn_interval {
            return Err(ConfigError::IntervalFloorAboveStart {
                min: self.min_spawn_interval,
                initial: self.initial_spawn_interval,
            });
        }

        let (lo, hi) = self.gap_top_bounds();
        if self.min_gap_top < 0.0 || hi < lo {
            return Err(ConfigError::GapDoesNotFit {
                gap_height: self.gap_height,
                min_gap_top: self.min_gap_top,
                field_height: self.field_height,
            });
        }

        // The body must fit through a gap and between floor and ceiling
        let limit = (self.gap_height / 2.0).min(self.field_height / 2.0);
        if self.body_radius >= limit {
            return Err(ConfigError::BodyDoesNotFit {
                radius: self.body_radius,
                limit,
            });
        }
        if self.body_x < 0.0 || self.body_x > self.field_width {
            return Err(ConfigError::BodyOutsideField {
                x: self.body_x,
                field_width: self.field_width,
            });
        }

        Ok(())
    }
}
