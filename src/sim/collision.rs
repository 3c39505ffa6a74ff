//! Axis-aligned collision detection
//!
//! Everything in Gapwing collides as a box: the avatar, the two pieces of each
//! gate, the floor. Screen coordinates: y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap on the x axis (touching edges don't count)
    #[inline]
    pub fn overlaps_horizontally(&self, left: f32, right: f32) -> bool {
        self.right() > left && self.left() < right
    }
}

/// Which part of a gate was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateHit {
    /// Above the gap
    Top,
    /// Below the gap
    Bottom,
}

/// Test a box against a gate spanning `[left, right]` with a gap of
/// `gap_size` starting at `gap_top`.
///
/// A gate that doesn't overlap the box horizontally never collides, whatever
/// the vertical positions are.
pub fn gate_collision(
    body: &Aabb,
    left: f32,
    right: f32,
    gap_top: f32,
    gap_size: f32,
) -> Option<GateHit> {
    if !body.overlaps_horizontally(left, right) {
        return None;
    }

    if body.top() < gap_top {
        Some(GateHit::Top)
    } else if body.bottom() > gap_top + gap_size {
        Some(GateHit::Bottom)
    } else {
        None
    }
}
