//! Run state and core simulation types
//!
//! `GameState` is the single owner of the body and the obstacle stream.
//! Everything outside the simulation reads it through a [`Snapshot`] and
//! the drained [`GameEvent`] queue.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Pace;
use super::spawn::ObstacleGenerator;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet, waiting for the first start input
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, frozen until restarted
    Ended,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    Floor,
    Ceiling,
    Obstacle,
}

/// Discrete notifications for audio/UI feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted { run: u32, speed: f32 },
    Impulse,
    Scored { score: u32 },
    DifficultyRaised { speed: f32, spawn_interval: f32 },
    RunEnded { final_score: u32, cause: EndCause },
}

/// The player-controlled falling body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center position; x never changes during a run
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vel: f32,
    pub radius: f32,
}

impl Body {
    /// Body at its start position: fixed x, vertically centered, at rest
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.body_x, tuning.field_height / 2.0),
            vel: 0.0,
            radius: tuning.body_radius,
        }
    }

    /// Semi-implicit Euler step: velocity first, then position
    #[inline]
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        self.vel += gravity * dt;
        self.pos.y += self.vel * dt;
    }

    /// Replace (never add to) the current velocity
    #[inline]
    pub fn impulse(&mut self, velocity: f32) {
        self.vel = velocity;
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// A vertical barrier with one passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Leading (left) edge
    pub x: f32,
    pub width: f32,
    /// Distance from the field top to the gap's upper edge
    pub gap_top: f32,
    pub gap_height: f32,
    /// Set once the body has cleared this obstacle
    pub scored: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: f32, tuning: &Tuning) -> Self {
        Self {
            x,
            width: tuning.obstacle_width,
            gap_top,
            gap_height: tuning.gap_height,
            scored: false,
        }
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }
}

/// Read-only view handed to presentation each frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub body: &'a Body,
    pub obstacles: &'a [Obstacle],
    pub score: u32,
    pub phase: GamePhase,
    pub tuning: &'a Tuning,
}

impl Snapshot<'_> {
    pub fn running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

/// Complete run state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub body: Body,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Current obstacle speed and spawn interval
    pub pace: Pace,
    /// Simulated seconds since the run started
    pub time: f32,
    /// `time` at the last spawn (or run start)
    pub last_spawn: f32,
    /// Runs started this session
    pub runs: u32,
    pub(crate) spawner: ObstacleGenerator,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle session, validating the tuning first
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let spawner = ObstacleGenerator::new(&tuning)?;
        Ok(Self {
            seed,
            phase: GamePhase::Idle,
            body: Body::new(&tuning),
            obstacles: Vec::new(),
            score: 0,
            pace: Pace::initial(&tuning),
            time: 0.0,
            last_spawn: 0.0,
            runs: 0,
            spawner,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        })
    }

    /// Start (or restart) a run. Ignored while a run is active.
    ///
    /// With `preserve_difficulty` the speed and spawn interval reached in the
    /// previous run carry over; otherwise they return to their initial values.
    pub fn request_start(&mut self, preserve_difficulty: bool) {
        if self.phase == GamePhase::Running {
            return;
        }

        self.body = Body::new(&self.tuning);
        self.obstacles.clear();
        self.score = 0;
        if !preserve_difficulty {
            self.pace = Pace::initial(&self.tuning);
        }
        self.time = 0.0;
        self.last_spawn = 0.0;
        self.spawner.reset();
        self.runs += 1;
        self.phase = GamePhase::Running;

        log::info!(
            "Run {} started (speed {:.1}, spawn every {:.2}s)",
            self.runs,
            self.pace.speed,
            self.pace.spawn_interval
        );
        self.events.push(GameEvent::RunStarted {
            run: self.runs,
            speed: self.pace.speed,
        });
    }

    /// Kick the body upward. Ignored unless a run is active.
    pub fn request_impulse(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.body.impulse(self.tuning.impulse_velocity);
        self.events.push(GameEvent::Impulse);
    }

    /// Append a freshly generated obstacle at the right edge of the field
    pub(crate) fn spawn_obstacle(&mut self) {
        let gap_top = self.spawner.next_gap_top(&mut self.rng);
        log::debug!("Spawn obstacle at t={:.2}s, gap top {:.1}", self.time, gap_top);
        self.obstacles
            .push(Obstacle::new(self.tuning.field_width, gap_top, &self.tuning));
        self.last_spawn = self.time;
    }

    /// Freeze the run
    pub(crate) fn end_run(&mut self, cause: EndCause) {
        self.phase = GamePhase::Ended;
        log::info!(
            "Run {} ended by {:?} with score {}",
            self.runs,
            cause,
            self.score
        );
        self.events.push(GameEvent::RunEnded {
            final_score: self.score,
            cause,
        });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            body: &self.body,
            obstacles: &self.obstacles,
            score: self.score,
            phase: self.phase,
            tuning: &self.tuning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(Tuning::default(), 7).expect("default tuning is valid")
    }

    #[test]
    fn test_new_state_is_idle_and_empty() {
        let state = state();
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.body.pos.y, state.tuning.field_height / 2.0);
    }

    #[test]
    fn test_invalid_tuning_fails_fast() {
        let tuning = Tuning {
            gap_height: 10_000.0,
            ..Default::default()
        };
        assert!(GameState::new(tuning, 1).is_err());
    }

    #[test]
    fn test_single_euler_step() {
        let tuning = Tuning::default();
        let mut body = Body::new(&tuning);
        body.integrate(1.0, tuning.gravity);
        assert_eq!(body.vel, tuning.gravity);
        assert_eq!(body.pos.y, tuning.field_height / 2.0 + tuning.gravity);
    }

    #[test]
    fn test_impulse_overrides_velocity() {
        let mut state = state();
        state.request_start(false);
        state.body.vel = 500.0;
        state.request_impulse();
        assert_eq!(state.body.vel, state.tuning.impulse_velocity);
        state.request_impulse();
        assert_eq!(state.body.vel, state.tuning.impulse_velocity);
    }

    #[test]
    fn test_impulse_ignored_while_idle() {
        let mut state = state();
        state.request_impulse();
        assert_eq!(state.body.vel, 0.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut state = state();
        state.request_start(false);
        state.score = 4;
        state.request_start(false);
        assert_eq!(state.score, 4);
        assert_eq!(state.runs, 1);
    }

    #[test]
    fn test_start_resets_run() {
        let mut state = state();
        state.request_start(false);
        state.spawn_obstacle();
        state.score = 12;
        state.body.pos.y = 20.0;
        state.end_run(EndCause::Ceiling);

        state.request_start(false);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.body, Body::new(&state.tuning));
        assert_eq!(state.runs, 2);
    }

    #[test]
    fn test_events_drain_once() {
        let mut state = state();
        state.request_start(false);
        state.request_impulse();
        let events = state.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], GameEvent::RunStarted { run: 1, .. }));
        assert_eq!(events[1], GameEvent::Impulse);
        assert!(state.drain_events().is_empty());
    }
}
