//! Sky Gates - a one-button arcade flyer
//!
//! Core modules:
//! - `sim`: Simulation core (physics, obstacle spawning, difficulty, collisions)
//! - `tuning`: Validated game balance values
//! - `platform`: Frame clock, input routing and the presentation seam
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// Physics values are in field units (pixels) and seconds, so behavior does
/// not depend on the display refresh rate.
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Nominal frame delta used by headless runs (60 Hz)
    pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Body defaults
    pub const BODY_X: f32 = 50.0;
    pub const BODY_RADIUS: f32 = 15.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY_ACCEL: f32 = 540.0;
    /// Velocity set by an impulse (pixels/s, negative is up)
    pub const IMPULSE_VELOCITY: f32 = -240.0;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const GAP_HEIGHT: f32 = 180.0;
    /// Closest a gap may come to the top or bottom of the field
    pub const MIN_GAP_TOP: f32 = 50.0;
    /// Largest vertical jump between consecutive gaps
    pub const MAX_GAP_DELTA: f32 = 150.0;
    /// Soft gap windows narrower than this collapse onto a hard bound
    pub const MIN_GAP_WINDOW: f32 = 1.0;

    /// Obstacle scroll speed at run start (pixels/s)
    pub const INITIAL_SPEED: f32 = 90.0;
    /// Seconds between spawns at run start
    pub const INITIAL_SPAWN_INTERVAL: f32 = 2.0;

    /// Difficulty steps every N points
    pub const DIFFICULTY_THRESHOLD: u32 = 10;
    pub const SPEED_INCREMENT: f32 = 15.0;
    pub const INTERVAL_DECREMENT: f32 = 0.15;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.9;
}
