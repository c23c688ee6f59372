//! Input routing
//!
//! Device handlers never touch the simulation. They record intents here and
//! the game loop hands the collected [`TickInput`] to the next tick.

use crate::sim::{GamePhase, TickInput};

/// What a raw key, click or tap asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start when no run is active, impulse while running
    Primary,
    /// Toggle idle/demo mode
    ToggleDemo,
    /// Toggle whether restarts keep the reached difficulty
    TogglePreserve,
    /// Toggle audio mute
    ToggleMute,
}

/// Map a `KeyboardEvent.key` value to an action
pub fn key_action(key: &str) -> Option<Action> {
    match key {
        " " | "Spacebar" | "Enter" | "ArrowUp" | "w" | "W" => Some(Action::Primary),
        "i" | "I" => Some(Action::ToggleDemo),
        "p" | "P" => Some(Action::TogglePreserve),
        "m" | "M" => Some(Action::ToggleMute),
        _ => None,
    }
}

/// Collects intents between ticks
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    pending: TickInput,
    /// Restarts keep speed/interval from the previous run
    pub preserve_difficulty: bool,
}

impl InputRouter {
    pub fn new(preserve_difficulty: bool) -> Self {
        Self {
            pending: TickInput::default(),
            preserve_difficulty,
        }
    }

    /// Single-button handling: clicks, taps and the space bar all land here
    pub fn primary(&mut self, phase: GamePhase) {
        match phase {
            GamePhase::Running => self.request_impulse(),
            GamePhase::Idle | GamePhase::Ended => self.request_start(self.preserve_difficulty),
        }
    }

    pub fn request_start(&mut self, preserve_difficulty: bool) {
        self.pending.start = true;
        self.pending.preserve_difficulty = preserve_difficulty;
    }

    pub fn request_impulse(&mut self) {
        self.pending.impulse = true;
    }

    pub fn demo_mode(&self) -> bool {
        self.pending.idle_mode
    }

    pub fn set_demo_mode(&mut self, on: bool) {
        self.pending.idle_mode = on;
    }

    /// Hand the collected intents to a tick; one-shot intents are cleared
    ///
    /// Starts the tick makes on its own (the autopilot) follow the router's
    /// preserve setting; explicit start requests keep the flag they carried.
    pub fn take(&mut self) -> TickInput {
        let mut input = self.pending.clone();
        if !input.start {
            input.preserve_difficulty = self.preserve_difficulty;
        }
        self.pending.clear_one_shots();
        input
    }
}
