//! The player-controlled avatar

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::Playfield;
use crate::tuning::Tuning;

/// How far the avatar noses up/down per unit of velocity (radians)
const TILT_PER_VELOCITY: f32 = 0.08;
/// Maximum nose-up/nose-down angle (radians)
const MAX_TILT: f32 = std::f32::consts::FRAC_PI_4;

/// Result of integrating one step against the playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryHit {
    None,
    /// Bumped the top of the playfield; clamped, velocity zeroed
    Ceiling,
    /// Reached the ground; clamped. Ends the run.
    Floor,
}

/// The falling/flapping entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (units/frame, positive = down)
    pub velocity: f32,
}

impl Avatar {
    pub fn new(tuning: &Tuning, playfield: &Playfield) -> Self {
        let mut avatar = Self {
            pos: Vec2::new(tuning.avatar_x, 0.0),
            size: Vec2::new(tuning.avatar_width, tuning.avatar_height),
            velocity: 0.0,
        };
        avatar.reset(playfield);
        avatar
    }

    /// Apply gravity and move, clamping to the playfield band
    pub fn integrate(&mut self, tuning: &Tuning, floor_y: f32) -> BoundaryHit {
        self.velocity += tuning.gravity;
        self.pos.y += self.velocity;

        if self.pos.y + self.size.y >= floor_y {
            self.pos.y = (floor_y - self.size.y).max(0.0);
            return BoundaryHit::Floor;
        }

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.velocity = 0.0;
            return BoundaryHit::Ceiling;
        }

        BoundaryHit::None
    }

    /// Set the upward impulse velocity, whatever the current velocity is
    pub fn impulse(&mut self, tuning: &Tuning) {
        self.velocity = tuning.impulse_velocity;
    }

    /// Back to the vertical midpoint, at rest
    pub fn reset(&mut self, playfield: &Playfield) {
        self.pos.y = playfield.height / 2.0;
        self.velocity = 0.0;
        self.clamp_to(playfield);
    }

    /// Keep the avatar inside `[0, floor - height]` (after a resize)
    pub fn clamp_to(&mut self, playfield: &Playfield) {
        let max_y = (playfield.floor_y() - self.size.y).max(0.0);
        self.pos.y = self.pos.y.clamp(0.0, max_y);
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Orientation for renderers that want one; derived, never simulated
    pub fn tilt(&self) -> f32 {
        (self.velocity * TILT_PER_VELOCITY).clamp(-MAX_TILT, MAX_TILT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Tuning, Playfield, Avatar) {
        let tuning = Tuning::default();
        let playfield = Playfield::default();
        let avatar = Avatar::new(&tuning, &playfield);
        (tuning, playfield, avatar)
    }

    #[test]
    fn test_impulse_overrides_velocity() {
        let (tuning, _, mut avatar) = setup();
        avatar.velocity = 5.0;
        avatar.impulse(&tuning);
        assert_eq!(avatar.velocity, -4.6);

        // No cooldown: a second impulse right away is identical
        avatar.impulse(&tuning);
        assert_eq!(avatar.velocity, -4.6);
    }

    #[test]
    fn test_integrate_applies_gravity() {
        let (tuning, playfield, mut avatar) = setup();
        let y0 = avatar.pos.y;
        assert_eq!(avatar.integrate(&tuning, playfield.floor_y()), BoundaryHit::None);
        assert_eq!(avatar.velocity, tuning.gravity);
        assert_eq!(avatar.pos.y, y0 + tuning.gravity);
    }

    #[test]
    fn test_floor_clamps_and_reports() {
        let (tuning, playfield, mut avatar) = setup();
        avatar.pos.y = playfield.floor_y() - avatar.size.y - 1.0;
        avatar.velocity = 10.0;
        assert_eq!(avatar.integrate(&tuning, playfield.floor_y()), BoundaryHit::Floor);
        assert_eq!(avatar.pos.y, playfield.floor_y() - avatar.size.y);
    }

    #[test]
    fn test_ceiling_clamps_and_zeroes_velocity() {
        let (tuning, playfield, mut avatar) = setup();
        avatar.pos.y = 2.0;
        avatar.velocity = -6.0;
        assert_eq!(avatar.integrate(&tuning, playfield.floor_y()), BoundaryHit::Ceiling);
        assert_eq!(avatar.pos.y, 0.0);
        assert_eq!(avatar.velocity, 0.0);
    }

    #[test]
    fn test_reset_to_midpoint() {
        let (_, playfield, mut avatar) = setup();
        avatar.pos.y = 12.0;
        avatar.velocity = 3.0;
        avatar.reset(&playfield);
        assert_eq!(avatar.pos.y, playfield.height / 2.0);
        assert_eq!(avatar.velocity, 0.0);
    }

    #[test]
    fn test_tilt_is_bounded() {
        let (_, _, mut avatar) = setup();
        avatar.velocity = 100.0;
        assert_eq!(avatar.tilt(), MAX_TILT);
        avatar.velocity = -100.0;
        assert_eq!(avatar.tilt(), -MAX_TILT);
    }
}
