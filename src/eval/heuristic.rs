//! Evaluation functions for SOS positions
//!
//! Every function scores a state from the Max side's point of view; higher
//! is better for Max. Search agents take any `fn(&GameState) -> f64`, and
//! [`Heuristic`] names the built-in ones so they can be picked from the CLI
//! or the GUI.

use crate::rules::count_exposed;
use crate::state::GameState;

/// Scalar evaluation of a state
pub type EvalFn = fn(&GameState) -> f64;

/// Own score
pub fn raw_score(state: &GameState) -> f64 {
    f64::from(state.score())
}

/// Own score minus opponent score
pub fn score_difference(state: &GameState) -> f64 {
    f64::from(state.score()) - f64::from(state.opponent_score())
}

/// 2 while the opponent has not scored, else 1 / opponent score
pub fn inverse_opponent_score(state: &GameState) -> f64 {
    match state.opponent_score() {
        0 => 2.0,
        n => 1.0 / f64::from(n),
    }
}

/// 1 / (1 + number of S cells the opponent could complete next move).
///
/// Equals 1.0 exactly when nothing on the board is exposed.
pub fn blocking_pressure(state: &GameState) -> f64 {
    1.0 / (1.0 + count_exposed(state.board()) as f64)
}

/// Triple weight on own score; falls back to blocking pressure while the
/// score is still zero.
pub fn combined(state: &GameState) -> f64 {
    let value = 3.0 * raw_score(state);
    if value == 0.0 {
        blocking_pressure(state)
    } else {
        value
    }
}

/// Built-in evaluation functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Heuristic {
    RawScore,
    ScoreDifference,
    InverseOpponentScore,
    BlockingPressure,
    #[default]
    Combined,
}

impl Heuristic {
    pub const ALL: [Heuristic; 5] = [
        Heuristic::RawScore,
        Heuristic::ScoreDifference,
        Heuristic::InverseOpponentScore,
        Heuristic::BlockingPressure,
        Heuristic::Combined,
    ];

    #[must_use]
    pub fn as_fn(self) -> EvalFn {
        match self {
            Heuristic::RawScore => raw_score,
            Heuristic::ScoreDifference => score_difference,
            Heuristic::InverseOpponentScore => inverse_opponent_score,
            Heuristic::BlockingPressure => blocking_pressure,
            Heuristic::Combined => combined,
        }
    }

    #[inline]
    pub fn evaluate(self, state: &GameState) -> f64 {
        (self.as_fn())(state)
    }

    pub fn label(self) -> &'static str {
        match self {
            Heuristic::RawScore => "Raw score",
            Heuristic::ScoreDifference => "Score difference",
            Heuristic::InverseOpponentScore => "Inverse opponent score",
            Heuristic::BlockingPressure => "Blocking pressure",
            Heuristic::Combined => "Combined",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Pos, Symbol};

    fn state_with(score: u32, opponent: u32) -> GameState {
        GameState::from_board(Board::new(3).unwrap(), score, opponent)
    }

    #[test]
    fn test_raw_and_difference() {
        let state = state_with(3, 5);
        assert_eq!(raw_score(&state), 3.0);
        assert_eq!(score_difference(&state), -2.0);
    }

    #[test]
    fn test_inverse_opponent_score() {
        assert_eq!(inverse_opponent_score(&state_with(0, 0)), 2.0);
        assert_eq!(inverse_opponent_score(&state_with(0, 1)), 1.0);
        assert_eq!(inverse_opponent_score(&state_with(4, 4)), 0.25);
    }

    #[test]
    fn test_blocking_pressure_counts_exposed() {
        let mut board = Board::new(3).unwrap();
        assert_eq!(blocking_pressure(&GameState::from_board(board.clone(), 0, 0)), 1.0);

        board.set(Pos::new(0, 0), Symbol::S).unwrap();
        board.set(Pos::new(0, 1), Symbol::O).unwrap();
        assert_eq!(blocking_pressure(&GameState::from_board(board.clone(), 0, 0)), 0.5);

        board.set(Pos::new(2, 0), Symbol::S).unwrap();
        // (2, 0) looks up at (1, 0) empty and (0, 0) S
        assert!((blocking_pressure(&GameState::from_board(board, 0, 0)) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_combined() {
        assert_eq!(combined(&state_with(2, 0)), 6.0);
        assert_eq!(combined(&state_with(0, 7)), 1.0);
    }

    #[test]
    fn test_heuristic_dispatch() {
        let state = state_with(1, 2);
        for heuristic in Heuristic::ALL {
            assert_eq!(heuristic.evaluate(&state), (heuristic.as_fn())(&state));
        }
        assert_eq!(Heuristic::default(), Heuristic::Combined);
    }
}
