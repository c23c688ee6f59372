//! Variable-timestep simulation tick
//!
//! One call per rendered frame. Pending inputs are applied first, then the
//! run advances by the (clamped) elapsed time.

use super::autopilot;
use super::collision::{
    body_obstacle_collision, body_out_of_bounds, obstacle_cleared, obstacle_offscreen,
};
use super::difficulty::step_for_score;
use super::state::{EndCause, GameEvent, GamePhase, GameState};

/// Input intents collected between two ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a run (or restart after one ended)
    pub start: bool,
    /// Keep speed/interval from the previous run on restart
    pub preserve_difficulty: bool,
    /// Kick the body upward
    pub impulse: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Clear one-shot intents after they have been consumed
    pub fn clear_one_shots(&mut self) {
        self.start = false;
        self.impulse = false;
    }
}

/// Advance the game state by `dt` seconds of wall time
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut input = input.clone();
    if input.idle_mode {
        autopilot::steer(state, &mut input);
    }

    if input.start {
        state.request_start(input.preserve_difficulty);
    }
    if input.impulse {
        state.request_impulse();
    }

    // Ended and Idle are frozen
    if state.phase != GamePhase::Running {
        return;
    }

    let dt = dt.clamp(0.0, state.tuning.max_frame_dt);
    if let Some(cause) = advance(state, dt) {
        state.end_run(cause);
    }
}

/// Integrate one step of the running game.
///
/// Returns the terminal condition if one was hit; the state is left exactly
/// as it was at the moment of detection.
fn advance(state: &mut GameState, dt: f32) -> Option<EndCause> {
    state.time += dt;

    state.body.integrate(dt, state.tuning.gravity);
    if let Some(cause) = body_out_of_bounds(&state.body, state.tuning.field_height) {
        return Some(cause);
    }

    if state.time - state.last_spawn > state.pace.spawn_interval {
        state.spawn_obstacle();
    }

    let body = state.body;
    let shift = state.pace.speed * dt;
    let mut ended = None;
    let mut scored = Vec::new();

    for obstacle in state.obstacles.iter_mut() {
        obstacle.x -= shift;

        if body_obstacle_collision(&body, obstacle) {
            ended = Some(EndCause::Obstacle);
            break;
        }

        if !obstacle.scored && obstacle_cleared(&body, obstacle) {
            obstacle.scored = true;
            state.score += 1;
            scored.push(state.score);
            if let Some(step) = step_for_score(state.score, &state.tuning) {
                state.pace.raise(step, state.tuning.min_spawn_interval);
            }
        }
    }

    for score in scored {
        log::debug!("Scored: {}", score);
        state.push_event(GameEvent::Scored { score });
        if step_for_score(score, &state.tuning).is_some() {
            log::info!(
                "Difficulty raised at {}: speed {:.1}, spawn every {:.2}s",
                score,
                state.pace.speed,
                state.pace.spawn_interval
            );
            state.push_event(GameEvent::DifficultyRaised {
                speed: state.pace.speed,
                spawn_interval: state.pace.spawn_interval,
            });
        }
    }

    if ended.is_some() {
        return ended;
    }

    state.obstacles.retain(|o| !obstacle_offscreen(o));
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NOMINAL_FRAME_DT;
    use crate::sim::state::Obstacle;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(Tuning::default(), seed).expect("default tuning is valid");
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            0.0,
        );
        state.drain_events();
        state
    }

    fn impulse() -> TickInput {
        TickInput {
            impulse: true,
            ..Default::default()
        }
    }

    /// Obstacle whose gap is centered on the body's start height
    fn open_gate(state: &GameState, x: f32) -> Obstacle {
        let gap_top = state.body.pos.y - state.tuning.gap_height / 2.0;
        Obstacle::new(x, gap_top, &state.tuning)
    }

    #[test]
    fn test_tick_idle_to_running() {
        let mut state = GameState::new(Tuning::default(), 12345).unwrap();
        assert_eq!(state.phase, GamePhase::Idle);

        // Tick without start - stays idle and frozen
        tick(&mut state, &TickInput::default(), NOMINAL_FRAME_DT);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.body.vel, 0.0);

        // Impulse while idle is ignored
        tick(&mut state, &impulse(), NOMINAL_FRAME_DT);
        assert_eq!(state.phase, GamePhase::Idle);

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            NOMINAL_FRAME_DT,
        );
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.body.vel > 0.0);
    }

    #[test]
    fn test_falling_hits_floor() {
        let mut state = running(1);
        let mut ticks = 0;
        while state.phase == GamePhase::Running && ticks < 1000 {
            tick(&mut state, &TickInput::default(), NOMINAL_FRAME_DT);
            ticks += 1;
        }
        assert_eq!(state.phase, GamePhase::Ended);
        let events = state.drain_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::RunEnded {
                final_score: 0,
                cause: EndCause::Floor
            })
        );
        // Free fall of 285px at 540px/s² takes a little over a second
        assert!((60..=70).contains(&ticks), "ended after {} ticks", ticks);
    }

    #[test]
    fn test_flapping_hits_ceiling() {
        let mut state = running(1);
        for _ in 0..200 {
            tick(&mut state, &impulse(), NOMINAL_FRAME_DT);
            if state.phase == GamePhase::Ended {
                break;
            }
        }
        let events = state.drain_events();
        assert!(matches!(
            events.last(),
            Some(GameEvent::RunEnded {
                cause: EndCause::Ceiling,
                ..
            })
        ));
    }

    #[test]
    fn test_ended_is_frozen() {
        let mut state = running(1);
        state.end_run(EndCause::Obstacle);
        let body = state.body;
        let time = state.time;
        tick(&mut state, &impulse(), NOMINAL_FRAME_DT);
        assert_eq!(state.body, body);
        assert_eq!(state.time, time);
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = running(1);
        tick(&mut state, &TickInput::default(), 5.0);
        assert_eq!(state.time, state.tuning.max_frame_dt);
    }

    #[test]
    fn test_first_spawn_after_interval() {
        let mut state = running(5);
        let interval = state.pace.spawn_interval;
        // Keep the body airborne while time passes
        let mut t = 0.0;
        while t + NOMINAL_FRAME_DT <= interval {
            state.body.pos.y = 300.0;
            state.body.vel = 0.0;
            tick(&mut state, &TickInput::default(), NOMINAL_FRAME_DT);
            t += NOMINAL_FRAME_DT;
        }
        assert!(state.obstacles.is_empty());

        state.body.pos.y = 300.0;
        state.body.vel = 0.0;
        tick(&mut state, &TickInput::default(), 0.05);
        assert_eq!(state.obstacles.len(), 1);
        let obstacle = &state.obstacles[0];
        let (lo, hi) = state.tuning.gap_top_bounds();
        assert!(obstacle.gap_top >= lo && obstacle.gap_top <= hi);
        assert!(obstacle.x < state.tuning.field_width);
        assert_eq!(state.last_spawn, state.time);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut state = running(1);
        // Gap far above the body, column right on top of it
        state
            .obstacles
            .push(Obstacle::new(40.0, 50.0, &state.tuning));
        tick(&mut state, &TickInput::default(), NOMINAL_FRAME_DT);
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(matches!(
            state.drain_events().last(),
            Some(GameEvent::RunEnded {
                cause: EndCause::Obstacle,
                ..
            })
        ));
    }

    #[test]
    fn test_gap_geometry_decides_collision() {
        let gate = |gap_top| Obstacle {
            x: 55.0,
            width: 60.0,
            gap_top,
            gap_height: 175.0,
            scored: false,
        };

        // Body spans y 85..115, inside a gap of 50..225
        let mut state = running(1);
        state.body.pos.y = 100.0;
        state.obstacles.push(gate(50.0));
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.phase, GamePhase::Running);

        // Gap of 150..325 leaves the body's top half in the pillar
        let mut state = running(1);
        state.body.pos.y = 100.0;
        state.obstacles.push(gate(150.0));
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::RunEnded {
                final_score: 0,
                cause: EndCause::Obstacle
            }]
        );
    }

    #[test]
    fn test_score_earlier_in_the_ending_tick_is_reported() {
        let mut state = running(1);
        // First in line: cleared this tick
        let mut passed = open_gate(&state, 0.0);
        passed.x = state.body.pos.x - passed.width - 0.1;
        state.obstacles.push(passed);
        // Second: gap far above the body, column on top of it
        state
            .obstacles
            .push(Obstacle::new(40.0, 50.0, &state.tuning));

        tick(&mut state, &TickInput::default(), 1.0 / 120.0);

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.score, 1);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Scored { score: 1 },
                GameEvent::RunEnded {
                    final_score: 1,
                    cause: EndCause::Obstacle
                },
            ]
        );
        // Frozen at detection: nothing was dropped
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_scores_exactly_once_when_trailing_edge_passes() {
        let mut state = running(1);
        // Trailing edge 1.2px ahead of the body center
        let mut gate = open_gate(&state, 0.0);
        gate.x = state.body.pos.x - gate.width + 1.2;
        state.obstacles.push(gate);

        // Speed 90 * 1/120s = 0.75px: not yet past
        tick(&mut state, &TickInput::default(), 1.0 / 120.0);
        assert_eq!(state.score, 0);
        assert!(!state.obstacles[0].scored);

        // Another 0.75px: now past
        tick(&mut state, &TickInput::default(), 1.0 / 120.0);
        assert_eq!(state.score, 1);
        assert!(state.obstacles[0].scored);

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 1.0 / 120.0);
        }
        assert_eq!(state.score, 1);
        let scored: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .collect();
        assert_eq!(scored, vec![GameEvent::Scored { score: 1 }]);
    }

    #[test]
    fn test_offscreen_obstacles_are_removed() {
        let mut state = running(1);
        let mut gate = open_gate(&state, 0.0);
        gate.x = -gate.width + 0.1;
        gate.scored = true;
        state.obstacles.push(gate);
        tick(&mut state, &TickInput::default(), NOMINAL_FRAME_DT);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_difficulty_raised_at_threshold() {
        let mut state = running(1);
        state.score = 9;
        let mut gate = open_gate(&state, 0.0);
        gate.x = state.body.pos.x - gate.width - 0.1;
        state.obstacles.push(gate);
        tick(&mut state, &TickInput::default(), 1.0 / 120.0);

        assert_eq!(state.score, 10);
        let expected_speed = state.tuning.initial_speed + state.tuning.speed_increment;
        assert_eq!(state.pace.speed, expected_speed);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Scored { score: 10 }));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::DifficultyRaised { speed, .. } if *speed == expected_speed)));
    }

    #[test]
    fn test_restart_preserving_difficulty() {
        let mut state = running(1);
        let step = step_for_score(10, &state.tuning).unwrap();
        state.pace.raise(step, state.tuning.min_spawn_interval);
        let raised = state.pace;
        state.end_run(EndCause::Floor);

        tick(
            &mut state,
            &TickInput {
                start: true,
                preserve_difficulty: true,
                ..Default::default()
            },
            0.0,
        );
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.pace, raised);
        assert_eq!(state.score, 0);

        state.end_run(EndCause::Floor);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            0.0,
        );
        assert_eq!(state.pace.speed, state.tuning.initial_speed);
        assert_eq!(
            state.pace.spawn_interval,
            state.tuning.initial_spawn_interval
        );
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed and inputs should produce identical runs
        let mut state1 = running(99999);
        let mut state2 = running(99999);

        for i in 0..600 {
            let input = TickInput {
                impulse: i % 25 == 0,
                ..Default::default()
            };
            tick(&mut state1, &input, NOMINAL_FRAME_DT);
            tick(&mut state2, &input, NOMINAL_FRAME_DT);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.body, state2.body);
    }

    proptest! {
        #[test]
        fn velocity_is_frame_rate_independent(
            steps in prop::collection::vec(0.001f32..0.1, 1..40)
        ) {
            let tuning = Tuning::default();
            let mut state = running(1);
            // Tall field so the body never hits the floor
            state.tuning.field_height = 1.0e9;
            state.body.pos.y = 1.0e6;
            let total: f32 = steps.iter().sum();
            for dt in &steps {
                tick(&mut state, &TickInput::default(), *dt);
            }
            let expected = tuning.gravity * total;
            prop_assert!((state.body.vel - expected).abs() <= 1e-3 * expected.max(1.0));
        }
    }
}
