//! Plain minimax with turn extension
//!
//! # Example
//!
//! ```
//! use sos::eval::raw_score;
//! use sos::search::{Depth, MinimaxAgent, SearchAgent};
//! use sos::GameState;
//!
//! let mut agent = MinimaxAgent::new(raw_score, Depth::plies(1)).with_seed(42);
//! let state = GameState::new(3).unwrap();
//! let action = agent.get_action(&state).unwrap();
//! assert!(state.legal_actions().contains(&action));
//! ```

use tracing::debug;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{children, Depth, SearchAgent, SearchCore, SearchStats, TieBreak};
use crate::error::{GameError, Result};
use crate::eval::EvalFn;
use crate::state::{Action, GameState, Side};

/// Full-width minimax search
pub struct MinimaxAgent {
    core: SearchCore,
}

impl MinimaxAgent {
    #[must_use]
    pub fn new(eval: EvalFn, depth: Depth) -> Self {
        Self {
            core: SearchCore::new(eval, depth),
        }
    }

    /// Seed the tie-break RNG
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.core.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.core.tie_break = tie_break;
        self
    }

    pub fn depth(&self) -> Depth {
        self.core.depth
    }

    /// Minimax value of `state` with `side` to act and `steps` left
    fn value(&mut self, state: &GameState, side: Side, steps: u32) -> Result<f64> {
        self.core.stats.nodes += 1;
        if steps == 0 || state.is_done() {
            return Ok(self.core.leaf(state));
        }

        let mut best = match side {
            Side::Max => f64::NEG_INFINITY,
            Side::Min => f64::INFINITY,
        };
        for child in children(state, side)? {
            let value = self.value(&child.state, child.side, steps - 1)?;
            best = match side {
                Side::Max => best.max(value),
                Side::Min => best.min(value),
            };
        }
        Ok(best)
    }
}

impl SearchAgent for MinimaxAgent {
    fn get_action(&mut self, state: &GameState) -> Result<Action> {
        if state.is_done() {
            return Err(GameError::NoLegalActions);
        }
        self.core.stats = SearchStats {
            nodes: 1,
            ..SearchStats::default()
        };

        let steps = self.core.depth.steps().saturating_sub(1);
        let mut scored = Vec::new();
        for child in children(state, Side::Max)? {
            let value = self.value(&child.state, child.side, steps)?;
            scored.push((child.action, value));
        }

        let action = self.core.pick(state, &scored)?;
        debug!(%action, stats = %self.core.stats, "minimax move");
        Ok(action)
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn stats(&self) -> SearchStats {
        self.core.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Pos, Symbol};
    use crate::eval::{raw_score, score_difference};

    #[test]
    fn test_terminal_state_has_no_action() {
        let board = Board::from_rows(&["SSS", "SSS", "SSS"]).unwrap();
        let state = GameState::from_board(board, 0, 0);
        let mut agent = MinimaxAgent::new(raw_score, Depth::plies(1));
        assert_eq!(agent.get_action(&state), Err(GameError::NoLegalActions));
    }

    #[test]
    fn test_takes_the_only_scoring_move() {
        let board = Board::from_rows(&["S.S", "...", "..."]).unwrap();
        let state = GameState::from_board(board, 0, 0);
        let mut agent = MinimaxAgent::new(raw_score, Depth::plies(1)).with_seed(1);
        let action = agent.get_action(&state).unwrap();
        assert_eq!(action, Action::new(Symbol::O, 0, 1));
        assert!(!agent.stats().tie_break_used);
    }

    #[test]
    fn test_empty_board_uses_tie_break() {
        let state = GameState::new(3).unwrap();
        let mut agent = MinimaxAgent::new(raw_score, Depth::plies(1)).with_seed(42);
        let action = agent.get_action(&state).unwrap();
        assert!(state.legal_actions().contains(&action));
        assert!(agent.stats().tie_break_used);
    }

    #[test]
    fn test_tie_break_off_keeps_first_action() {
        let state = GameState::new(3).unwrap();
        let mut agent =
            MinimaxAgent::new(raw_score, Depth::plies(1)).with_tie_break(TieBreak::Off);
        let action = agent.get_action(&state).unwrap();
        assert_eq!(action, Action::new(Symbol::S, 0, 0));
        assert!(!agent.stats().tie_break_used);
    }

    #[test]
    fn test_node_count_one_step() {
        // Half-ply depth: each root child is a leaf
        let state = GameState::new(3).unwrap();
        let mut agent = MinimaxAgent::new(raw_score, Depth::half_plies(1))
            .with_tie_break(TieBreak::Off);
        agent.get_action(&state).unwrap();
        assert_eq!(agent.stats().nodes, 1 + 18);
        assert_eq!(agent.stats().leaves, 18);
    }

    #[test]
    fn test_node_count_two_steps() {
        // 18 root children, each with 16 replies
        let state = GameState::new(3).unwrap();
        let mut agent = MinimaxAgent::new(raw_score, Depth::plies(1))
            .with_tie_break(TieBreak::Off);
        agent.get_action(&state).unwrap();
        assert_eq!(agent.stats().leaves, 18 * 16);
        assert_eq!(agent.stats().nodes, 1 + 18 + 18 * 16);
    }

    #[test]
    fn test_looks_at_the_reply() {
        // S at (0,0) would let Min finish S-O-S on the top row
        let board = Board::from_rows(&["..S", "...", "..."]).unwrap();
        let state = GameState::from_board(board, 0, 0);

        let mut shallow = MinimaxAgent::new(score_difference, Depth::half_plies(1))
            .with_tie_break(TieBreak::Off);
        assert_eq!(shallow.get_action(&state).unwrap(), Action::new(Symbol::S, 0, 0));

        let mut agent = MinimaxAgent::new(score_difference, Depth::plies(1))
            .with_tie_break(TieBreak::Off);
        let action = agent.get_action(&state).unwrap();
        assert_ne!(action.pos, Pos::new(0, 0));

        let next = state.apply(action, Side::Max).unwrap();
        assert_eq!(next.next_side, Side::Min);
        for reply in next.state.legal_actions() {
            let after = next.state.generate_successor(reply, Side::Min).unwrap();
            assert_eq!(after.opponent_score(), 0, "reply {reply} scores");
        }
    }
}
