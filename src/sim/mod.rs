//! Simulation module
//!
//! All gameplay logic lives here. It must stay free of rendering and
//! platform dependencies:
//! - Time-based integration (seconds, never frame counts)
//! - Seeded RNG only
//! - Obstacles processed in spawn order

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{body_obstacle_collision, body_out_of_bounds};
pub use difficulty::{DifficultyStep, Pace, step_for_score};
pub use spawn::ObstacleGenerator;
pub use state::{Body, EndCause, GameEvent, GamePhase, GameState, Obstacle, Snapshot};
pub use tick::{TickInput, tick};
