//! Presentation seam
//!
//! A presenter sees the game only as a [`Snapshot`] plus the events raised
//! since the previous frame. Nothing it does feeds back into the simulation.

use crate::sim::{EndCause, GameEvent, GameState, Pace, Snapshot};

/// Rendering, audio and HUD sink
pub trait Presenter {
    /// Draw the current frame
    fn render(&mut self, snapshot: &Snapshot<'_>);

    /// A run began at obstacle speed `speed`
    fn on_run_start(&mut self, _run: u32, _speed: f32) {}

    fn on_impulse(&mut self) {}

    fn on_score(&mut self, _score: u32) {}

    fn on_difficulty(&mut self, _pace: Pace) {}

    fn on_run_end(&mut self, _final_score: u32, _cause: EndCause) {}
}

/// Deliver pending events, then render the frame
pub fn present<P: Presenter + ?Sized>(state: &mut GameState, presenter: &mut P) {
    for event in state.drain_events() {
        match event {
            GameEvent::RunStarted { run, speed } => presenter.on_run_start(run, speed),
            GameEvent::Impulse => presenter.on_impulse(),
            GameEvent::Scored { score } => presenter.on_score(score),
            GameEvent::DifficultyRaised {
                speed,
                spawn_interval,
            } => presenter.on_difficulty(Pace {
                speed,
                spawn_interval,
            }),
            GameEvent::RunEnded { final_score, cause } => presenter.on_run_end(final_score, cause),
        }
    }
    presenter.render(&state.snapshot());
}

/// Outcome of one finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub run: u32,
    pub score: u32,
    pub cause: EndCause,
    /// Fastest obstacle speed reached during the run
    pub top_speed: f32,
}

/// Headless presenter: logs events and keeps per-run records
#[derive(Debug, Clone, Default)]
pub struct LogPresenter {
    pub frames: u64,
    pub records: Vec<RunRecord>,
    current_run: u32,
    top_speed: f32,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best_score(&self) -> Option<u32> {
        self.records.iter().map(|r| r.score).max()
    }

    pub fn mean_score(&self) -> Option<f32> {
        if self.records.is_empty() {
            return None;
        }
        let total: u32 = self.records.iter().map(|r| r.score).sum();
        Some(total as f32 / self.records.len() as f32)
    }
}

impl Presenter for LogPresenter {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        self.frames += 1;
        if snapshot.running() {
            log::trace!(
                "frame {}: y={:.1} v={:.1} obstacles={} score={}",
                self.frames,
                snapshot.body.pos.y,
                snapshot.body.vel,
                snapshot.obstacles.len(),
                snapshot.score
            );
        }
    }

    fn on_run_start(&mut self, run: u32, speed: f32) {
        self.current_run = run;
        self.top_speed = speed;
    }

    fn on_score(&mut self, score: u32) {
        log::debug!("run {}: score {}", self.current_run, score);
    }

    fn on_difficulty(&mut self, pace: Pace) {
        self.top_speed = self.top_speed.max(pace.speed);
    }

    fn on_run_end(&mut self, final_score: u32, cause: EndCause) {
        log::info!(
            "run {} over: {} points ({:?})",
            self.current_run,
            final_score,
            cause
        );
        self.records.push(RunRecord {
            run: self.current_run,
            score: final_score,
            cause,
            top_speed: self.top_speed,
        });
    }
}
