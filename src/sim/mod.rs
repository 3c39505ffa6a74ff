//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod collision;
pub mod obstacle;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use avatar::{Avatar, BoundaryHit};
pub use collision::{Aabb, GateHit, gate_collision};
pub use obstacle::{FieldReport, Obstacle, ObstacleField, gap_top_range};
pub use snapshot::{AvatarView, ObstacleView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState, Playfield};
pub use tick::{TickInput, tick};
