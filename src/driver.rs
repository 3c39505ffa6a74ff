//! Frame driver
//!
//! Owns the `GameState` and turns display refresh timestamps into fixed
//! simulation steps. Steps only run while the game is `Playing`; input is
//! applied the moment it arrives and resulting events are dispatched to the
//! persistence and audio collaborators right away.

use crate::consts::*;
use crate::persistence::HighScoreStore;
use crate::platform::{AudioSink, SoundEffect, TickSource};
use crate::sim::{GameEvent, GamePhase, GameState, Playfield, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

pub struct FrameDriver<S: HighScoreStore, A: AudioSink> {
    state: GameState,
    store: S,
    audio: A,
    accumulator: f32,
    /// Last high score handed to the store (or loaded from it)
    saved_high_score: u32,
    /// Timestamp of the previous frame (ms), `None` until the first frame
    last_time: Option<f64>,
}

impl<S: HighScoreStore, A: AudioSink> FrameDriver<S, A> {
    /// Build a driver, loading the high score from `store`
    pub fn new(seed: u64, tuning: Tuning, playfield: Playfield, mut store: S, audio: A) -> Self {
        let high_score = store.load();
        Self {
            state: GameState::new(seed, tuning, playfield, high_score),
            store,
            audio,
            accumulator: 0.0,
            saved_high_score: high_score,
            last_time: None,
        }
    }

    /// The PLAYING gate: frames only advance the sim while this holds
    pub fn is_running(&self) -> bool {
        self.state.phase == GamePhase::Playing
    }

    /// Advance to `now_ms`, running as many fixed steps as have elapsed.
    /// Returns the number of steps taken.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(now_ms);

        if !self.is_running() {
            self.accumulator = 0.0;
            return 0;
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS && self.is_running() {
            tick(&mut self.state, &TickInput::default());
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.dispatch_events();
        }

        // Drop time we couldn't catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        substeps
    }

    /// Pull the next timestamp from `source` and advance to it
    pub fn pump(&mut self, source: &mut impl TickSource) -> u32 {
        let now = source.next_frame_ms();
        self.frame(now)
    }

    /// Space/click/tap
    pub fn trigger_impulse_or_start(&mut self) {
        let was_running = self.is_running();
        self.state.trigger_impulse_or_start();
        if !was_running && self.is_running() {
            // Fresh run: don't let time spent on the start screen count
            self.accumulator = 0.0;
            self.last_time = None;
        }
        self.dispatch_events();
    }

    /// Restart button. Only acts after a game over.
    pub fn restart(&mut self) -> bool {
        let restarted = self.state.restart();
        self.dispatch_events();
        restarted
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Started => self.audio.play_music(),
                GameEvent::Flapped => self.audio.play(SoundEffect::Flap),
                GameEvent::Scored { score } => {
                    self.audio.play(SoundEffect::Score);
                    self.persist_high_score(score);
                }
                GameEvent::GameOver {
                    high_score,
                    new_record,
                    ..
                } => {
                    self.audio.pause_music();
                    if new_record {
                        self.audio.play(SoundEffect::HighScore);
                    } else {
                        self.audio.play(SoundEffect::Hit);
                    }
                    self.persist_high_score(high_score);
                }
                GameEvent::Restarted => self.audio.rewind_music(),
            }
        }
    }

    /// Write `high_score` through to the store if it beats what it holds
    fn persist_high_score(&mut self, high_score: u32) {
        if high_score > self.saved_high_score {
            self.store.save(high_score);
            self.saved_high_score = high_score;
        }
    }
}
