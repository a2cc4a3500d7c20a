//! Safe-random tie-break
//!
//! When every root move evaluates the same, the search gives no reason to
//! prefer one. Instead of taking the first, pick at random among the moves
//! that leave the opponent no S-O-S one placement away.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::error::Result;
use crate::rules::is_safe;
use crate::state::{Action, GameState, Side};

/// Whether a flat root falls back to a safe random move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    #[default]
    SafeRandom,
    /// Keep the first best move
    Off,
}

/// Random legal action whose successor exposes no almost-SOS, or `None` if
/// every action leaves something exposed.
pub fn safe_random_action<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Result<Option<Action>> {
    let mut safe = Vec::new();
    for action in state.legal_actions() {
        let next = state.generate_successor(action, Side::Max)?;
        if is_safe(next.board()) {
            safe.push(action);
        }
    }
    Ok(safe.choose(rng).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Pos};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_safe_action_on_empty_board() {
        let state = GameState::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let action = safe_random_action(&state, &mut rng).unwrap().unwrap();
        let next = state.generate_successor(action, Side::Max).unwrap();
        assert!(is_safe(next.board()));
    }

    #[test]
    fn test_safe_action_is_seeded() {
        let state = GameState::new(4).unwrap();
        let a = safe_random_action(&state, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = safe_random_action(&state, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_free_cell() {
        let board = Board::from_rows(&["S.S", "OOO", "OOO"]).unwrap();
        let state = GameState::from_board(board, 0, 0);
        let mut rng = StdRng::seed_from_u64(1);
        let action = safe_random_action(&state, &mut rng).unwrap().unwrap();
        assert_eq!(action.pos, Pos::new(0, 1));
    }

    #[test]
    fn test_no_safe_action() {
        // Two open S-O- lines; one placement can close only one of them
        let board = Board::from_rows(&["SO.O", "OOOO", "OOOO", "SO.O"]).unwrap();
        let state = GameState::from_board(board, 0, 0);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(safe_random_action(&state, &mut rng).unwrap(), None);
    }
}
