//! Platform abstraction layer
//!
//! Seams between the deterministic sim and the host:
//! - Time: where frame timestamps come from
//! - Audio: fire-and-forget sound output
//!
//! Storage lives in `crate::persistence`.

/// Supplies one timestamp (milliseconds) per display refresh
pub trait TickSource {
    fn next_frame_ms(&mut self) -> f64;
}

/// Deterministic tick source advancing a fixed interval per frame
#[derive(Debug, Clone)]
pub struct FixedTickSource {
    now_ms: f64,
    interval_ms: f64,
}

impl FixedTickSource {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            interval_ms,
        }
    }

    /// One tick per simulation step
    pub fn per_step() -> Self {
        Self::new(f64::from(crate::consts::SIM_DT) * 1000.0)
    }
}

impl TickSource for FixedTickSource {
    fn next_frame_ms(&mut self) -> f64 {
        self.now_ms += self.interval_ms;
        self.now_ms
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Avatar flapped
    Flap,
    /// Passed a gate
    Score,
    /// Run ended
    Hit,
    /// Run ended with a new best
    HighScore,
}

/// Audio output. Every call is fire-and-forget.
pub trait AudioSink {
    fn play_music(&mut self);
    fn pause_music(&mut self);
    fn rewind_music(&mut self);
    fn play(&mut self, effect: SoundEffect);
}

/// Audio sink that discards everything (native builds, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn rewind_music(&mut self) {}
    fn play(&mut self, _effect: SoundEffect) {}
}
