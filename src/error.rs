//! Configuration errors
//!
//! The simulation itself has no failure paths; everything that can go wrong
//! is a bad set of tunables, caught once at startup.

/// Errors raised while loading or validating a [`crate::Tuning`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A value that must be strictly positive was zero or negative.
    #[error("{name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f32 },

    /// A value was NaN or infinite.
    #[error("{name} must be finite (got {value})")]
    NotFinite { name: &'static str, value: f32 },

    /// A step size was negative, which would make a run easier over time.
    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: f32 },

    /// Gap jump too small to keep a usable soft window around the previous gap.
    #[error("max gap delta {delta} is below {min}")]
    GapDeltaTooSmall { delta: f32, min: f32 },

    /// Gap plus its margins does not fit in the field, so no gap can spawn.
    #[error(
        "gap of {gap_height} with {min_gap_top} margins does not fit a field of height {field_height}"
    )]
    GapDoesNotFit {
        gap_height: f32,
        min_gap_top: f32,
        field_height: f32,
    },

    /// The body cannot fit inside the field or its gap.
    #[error("body radius {radius} does not fit (limit {limit})")]
    BodyDoesNotFit { radius: f32, limit: f32 },

    /// The body's fixed x lies outside the field.
    #[error("body x {x} lies outside the field width {field_width}")]
    BodyOutsideField { x: f32, field_width: f32 },

    /// Minimum spawn interval is larger than the starting interval.
    #[error("min spawn interval {min} exceeds initial spawn interval {initial}")]
    IntervalFloorAboveStart { min: f32, initial: f32 },

    /// Difficulty threshold of zero would raise difficulty on every point.
    #[error("difficulty threshold must be at least 1")]
    ZeroThreshold,

    /// The impulse must push the body upward.
    #[error("impulse velocity must be negative (got {0})")]
    ImpulseNotUpward(f32),

    /// Malformed tuning JSON.
    #[error("invalid tuning file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Tuning file could not be read.
    #[error("cannot read tuning file: {0}")]
    Io(#[from] std::io::Error),
}
