//! Idle/demo mode controller
//!
//! Plays the game through the same intents a player has: start a run when
//! none is active, and impulse whenever the body sags below the next gap.

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// How far below the aim point the body may drop before flapping
const AIM_SLACK: f32 = 20.0;

/// Height the autopilot is steering toward
///
/// The center of the first gap the body has not fully cleared, or the middle
/// of the field when no obstacle is ahead.
pub fn aim_height(state: &GameState) -> f32 {
    let body = &state.body;
    state
        .obstacles
        .iter()
        .find(|o| o.trailing_edge() > body.left())
        .map(|o| o.gap_top + o.gap_height / 2.0)
        .unwrap_or(state.tuning.field_height / 2.0)
}

/// Fill in the intents for this tick
pub fn steer(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Idle | GamePhase::Ended => input.start = true,
        GamePhase::Running => {
            let falling = state.body.vel >= 0.0;
            if falling && state.body.pos.y > aim_height(state) + AIM_SLACK {
                input.impulse = true;
            }
        }
    }
}
