//! Fixed timestep simulation tick
//!
//! Replays of a run are a seed plus the sequence of `TickInput`s. The frame
//! driver applies live input the moment it arrives, so every step it runs is
//! a `tick` with an empty `TickInput`.

use super::state::GameState;

/// One-shot inputs applied before a step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap, or start the run (space/click/tap)
    pub impulse: bool,
    /// Restart button
    pub restart: bool,
}

/// Apply inputs, then advance the game state by one fixed step
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
    }
    if input.impulse {
        state.trigger_impulse_or_start();
    }
    state.step();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Playfield};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, Tuning::default(), Playfield::default(), 0)
    }

    #[test]
    fn test_tick_start_to_playing() {
        let mut state = new_state(12345);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.frame, 0);

        let input = TickInput {
            impulse: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state(99999);
        let mut state2 = new_state(99999);

        for i in 0..600u32 {
            let input = TickInput {
                impulse: i % 17 == 0,
                restart: i % 250 == 0,
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.avatar.pos, state2.avatar.pos);
        assert_eq!(state1.snapshot(), state2.snapshot());
    }

    proptest! {
        #[test]
        fn prop_session_invariants(seed in any::<u64>(), flaps in proptest::collection::vec(any::<bool>(), 1..900)) {
            let mut state = new_state(seed);
            let mut last_score = 0;
            let mut last_high = 0;
            let mut game_overs = 0;

            for (i, &flap) in flaps.iter().enumerate() {
                let input = TickInput { impulse: flap || i == 0, restart: false };
                tick(&mut state, &input);

                let max_y = state.playfield.floor_y() - state.avatar.size.y;
                prop_assert!(state.avatar.pos.y >= 0.0 && state.avatar.pos.y <= max_y);
                prop_assert!(state.score >= last_score);
                prop_assert!(state.high_score >= last_high);
                prop_assert!(state.high_score >= state.score);

                let xs: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();
                prop_assert!(xs.windows(2).all(|w| w[0] < w[1]));

                game_overs += state
                    .drain_events()
                    .iter()
                    .filter(|e| matches!(e, crate::sim::GameEvent::GameOver { .. }))
                    .count();
                last_score = state.score;
                last_high = state.high_score;
            }

            prop_assert!(game_overs <= 1);
            prop_assert_eq!(game_overs == 1, state.phase == GamePhase::GameOver);
        }
    }
}
