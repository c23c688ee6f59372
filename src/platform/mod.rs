//! Platform abstraction layer
//!
//! The seams between the simulation and the host:
//! - `clock`: frame timestamps to clamped deltas
//! - `input`: raw device events to start/impulse intents
//! - `present`: snapshot + event hand-off to rendering/audio/HUD

pub mod clock;
pub mod input;
pub mod present;

pub use clock::FrameClock;
pub use input::{Action, InputRouter, key_action};
pub use present::{LogPresenter, Presenter, RunRecord, present};
