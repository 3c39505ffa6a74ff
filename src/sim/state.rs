//! Game state machine and core simulation types
//!
//! `GameState` is the single owner of everything a run mutates. Phase
//! transitions go through its methods only; side effects the host cares about
//! (audio, persistence) are queued as `GameEvent`s and drained by the driver.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::{Avatar, BoundaryHit};
use super::obstacle::ObstacleField;
use super::snapshot::Snapshot;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first input
    Start,
    /// Simulation running
    Playing,
    /// Run ended, frozen until restart
    GameOver,
}

/// Something the host should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Flapped,
    Scored { score: u32 },
    GameOver {
        score: u32,
        high_score: u32,
        /// The high score improved during this run
        new_record: bool,
    },
    Restarted,
}

/// Playable area dimensions (screen units, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT, GROUND_HEIGHT)
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32, ground_height: f32) -> Self {
        let height = height.max(1.0);
        Self {
            width: width.max(1.0),
            height,
            ground_height: ground_height.clamp(0.0, height),
        }
    }

    /// Top of the ground strip; the avatar dies touching it
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.height - self.ground_height
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub playfield: Playfield,
    pub phase: GamePhase,
    pub avatar: Avatar,
    pub obstacles: ObstacleField,
    pub score: u32,
    pub high_score: u32,
    /// High score when the current run began
    run_start_high_score: u32,
    /// Simulation frame counter (drives spawn cadence)
    pub frame: u64,
    /// Ground scroll position, wraps at `GROUND_TILE`
    pub ground_offset: f32,
    /// Ground height asked for at construction, before any clamping to a
    /// short playfield
    ground_height: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning, playfield: Playfield, high_score: u32) -> Self {
        let tuning = tuning.sanitized();
        let avatar = Avatar::new(&tuning, &playfield);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            playfield,
            phase: GamePhase::Start,
            avatar,
            obstacles: ObstacleField::new(),
            score: 0,
            high_score,
            run_start_high_score: high_score,
            frame: 0,
            ground_offset: 0.0,
            ground_height: playfield.ground_height,
            events: Vec::new(),
        }
    }

    /// The single player action: starts a run from `Start`, flaps while
    /// `Playing`, does nothing after game over.
    pub fn trigger_impulse_or_start(&mut self) {
        match self.phase {
            GamePhase::Start => {
                self.phase = GamePhase::Playing;
                self.run_start_high_score = self.high_score;
                self.events.push(GameEvent::Started);
                log::info!("Run started (seed {})", self.seed);
                self.flap();
            }
            GamePhase::Playing => self.flap(),
            GamePhase::GameOver => {}
        }
    }

    fn flap(&mut self) {
        self.avatar.impulse(&self.tuning);
        self.events.push(GameEvent::Flapped);
    }

    /// Advance one fixed step. No-op outside `Playing`.
    pub fn step(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        let report = self.obstacles.update(
            self.frame,
            &self.playfield,
            &self.avatar.hitbox(),
            &self.tuning,
            &mut self.rng,
        );

        if report.passed > 0 {
            self.add_score(report.passed);
        }

        let boundary = self
            .avatar
            .integrate(&self.tuning, self.playfield.floor_y());

        self.ground_offset = (self.ground_offset + self.tuning.scroll_speed) % GROUND_TILE;
        self.frame += 1;

        if let Some(hit) = report.hit {
            log::debug!("Gate hit ({:?}) at frame {}", hit, self.frame);
            self.game_over();
        }
        if boundary == BoundaryHit::Floor {
            log::debug!("Floor hit at frame {}", self.frame);
            self.game_over();
        }
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.high_score = self.high_score.max(self.score);
        self.events.push(GameEvent::Scored { score: self.score });
        log::debug!("Score {}", self.score);
    }

    /// End the run. Only the first call per run has any effect.
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.phase = GamePhase::GameOver;
        self.high_score = self.high_score.max(self.score);
        let new_record = self.high_score > self.run_start_high_score;
        self.events.push(GameEvent::GameOver {
            score: self.score,
            high_score: self.high_score,
            new_record,
        });
        log::info!(
            "Game over: score {} (best {}{})",
            self.score,
            self.high_score,
            if new_record { ", new record" } else { "" }
        );
    }

    /// Back to `Start` after a game over. Returns false (and changes nothing)
    /// in any other phase.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }

        self.avatar.reset(&self.playfield);
        self.obstacles.reset();
        self.score = 0;
        self.frame = 0;
        self.ground_offset = 0.0;
        self.run_start_high_score = self.high_score;
        self.phase = GamePhase::Start;
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted (best {})", self.high_score);
        true
    }

    /// Host surface changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.playfield = Playfield::new(width, height, self.ground_height);
        self.avatar.clamp_to(&self.playfield);
        if self.phase == GamePhase::Start {
            self.avatar.reset(&self.playfield);
        }
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
