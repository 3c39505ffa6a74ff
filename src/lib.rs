//! Gapwing - A side-scrolling gate-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, game state)
//! - `driver`: Fixed-timestep frame driver and collaborator dispatch
//! - `platform`: Tick source and audio seams between the sim and the host
//! - `persistence`: High score storage in a versioned envelope
//! - `tuning`: Data-driven game balance
//! - `renderer` / `audio`: Browser-only collaborators (wasm32)

pub mod driver;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use driver::FrameDriver;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one step per 60 Hz display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta the driver will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Width of one repeat of the ground pattern (ground offset wraps here)
    pub const GROUND_TILE: f32 = 24.0;
}
