//! Read-only view of the simulation for renderers and the HUD

use serde::Serialize;

use super::state::{GamePhase, GameState, Playfield};

/// Avatar geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AvatarView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Nose angle in radians (positive = nose down)
    pub tilt: f32,
}

/// One gate: top piece `[0, gap_top)`, bottom piece `[gap_bottom, floor)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    pub floor: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub frame: u64,
    pub ground_offset: f32,
    pub playfield: Playfield,
    pub avatar: AvatarView,
    /// Spawn order, left to right
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let tuning = &state.tuning;
        let floor = state.playfield.floor_y();
        let avatar = &state.avatar;

        Self {
            phase: state.phase,
            score: state.score,
            high_score: state.high_score,
            frame: state.frame,
            ground_offset: state.ground_offset,
            playfield: state.playfield,
            avatar: AvatarView {
                x: avatar.pos.x,
                y: avatar.pos.y,
                width: avatar.size.x,
                height: avatar.size.y,
                tilt: avatar.tilt(),
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    width: tuning.obstacle_width,
                    gap_top: o.gap_top,
                    gap_bottom: o.gap_bottom(tuning),
                    floor,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(3, Tuning::default(), Playfield::default(), 9);
        state.trigger_impulse_or_start();
        state.step();

        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.high_score, 9);
        assert_eq!(snap.frame, 1);
        assert_eq!(snap.obstacles.len(), 1);
        let gate = snap.obstacles[0];
        assert_eq!(gate.gap_bottom - gate.gap_top, state.tuning.gap_size);
        assert_eq!(gate.floor, state.playfield.floor_y());
        assert_eq!(snap.avatar.y, state.avatar.pos.y);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(3, Tuning::default(), Playfield::default(), 0);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Start\""));
        assert!(json.contains("\"obstacles\":[]"));
    }
}
