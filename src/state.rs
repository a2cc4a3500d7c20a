//! Immutable game state and successor generation
//!
//! A [`GameState`] is a value: every move produces a fresh successor built
//! on a private copy of the board, so a search tree can hold any number of
//! states without sharing mutable data.
//!
//! # Example
//!
//! ```
//! use sos::{Action, GameState, Side, Symbol};
//!
//! let state = GameState::new(3).unwrap();
//! let state = state.generate_successor(Action::new(Symbol::S, 0, 0), Side::Max).unwrap();
//! let state = state.generate_successor(Action::new(Symbol::S, 0, 2), Side::Min).unwrap();
//! let state = state.generate_successor(Action::new(Symbol::O, 0, 1), Side::Max).unwrap();
//! assert_eq!(state.score(), 1);
//! assert_eq!(state.opponent_score(), 0);
//! ```

use std::fmt;

use crate::board::{Board, Cell, Pos, Symbol};
use crate::error::Result;
use crate::rules::{find_matches, LineMatch};

/// The two sides of a game.
///
/// `Max` owns `GameState::score`, `Min` owns `GameState::opponent_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Max,
    Min,
}

impl Side {
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Max => Side::Min,
            Side::Min => Side::Max,
        }
    }

    /// Side to act after `self` played a move that scored `delta`.
    /// Scoring keeps the move; a scoreless move hands it over.
    #[inline]
    pub fn next(self, delta: u32) -> Side {
        if delta > 0 {
            self
        } else {
            self.opponent()
        }
    }
}

/// Place `symbol` at (`row`, `col`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub symbol: Symbol,
    pub pos: Pos,
}

impl Action {
    #[inline]
    pub fn new(symbol: Symbol, row: usize, col: usize) -> Self {
        Self {
            symbol,
            pos: Pos::new(row, col),
        }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.pos.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.pos.col
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@({}, {})", self.symbol.as_char(), self.pos.row, self.pos.col)
    }
}

/// Outcome of applying one action
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: GameState,
    /// Triples completed by the action
    pub matches: Vec<LineMatch>,
    /// Side to act next
    pub next_side: Side,
}

impl Transition {
    #[inline]
    pub fn delta(&self) -> u32 {
        self.matches.len() as u32
    }
}

/// Snapshot of a game: board, both scores and the terminal flag.
/// The default is a fresh game on a [`DEFAULT_BOARD_SIZE`](crate::DEFAULT_BOARD_SIZE) board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    board: Board,
    score: u32,
    opponent_score: u32,
    done: bool,
}

impl GameState {
    /// Fresh game on an empty `size`x`size` board
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self::from_board(Board::new(size)?, 0, 0))
    }

    /// State over an existing board (positions set up by hand, replays)
    pub fn from_board(board: Board, score: u32, opponent_score: u32) -> Self {
        let done = board.is_full();
        Self {
            board,
            score,
            opponent_score,
            done,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Max side's score
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Min side's score
    #[inline]
    pub fn opponent_score(&self) -> u32 {
        self.opponent_score
    }

    #[inline]
    pub fn score_of(&self, side: Side) -> u32 {
        match side {
            Side::Max => self.score,
            Side::Min => self.opponent_score,
        }
    }

    /// True iff every cell is occupied. Set whenever the board changes.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Cell lookup; fails on off-board coordinates
    pub fn get_cell(&self, row: usize, col: usize) -> Result<Cell> {
        self.board.get(Pos::new(row, col))
    }

    /// Every legal action: empty cells in row-major order, all S placements
    /// before all O placements.
    pub fn legal_actions(&self) -> Vec<Action> {
        let empty = self.board.empty_cells();
        Symbol::ALL
            .iter()
            .flat_map(|&symbol| empty.iter().map(move |&pos| Action { symbol, pos }))
            .collect()
    }

    /// Successor after `side` plays `action`. The receiver is never modified;
    /// an invalid action leaves nothing behind.
    pub fn generate_successor(&self, action: Action, side: Side) -> Result<GameState> {
        self.apply(action, side).map(|t| t.state)
    }

    /// Like [`generate_successor`](Self::generate_successor) but also reports
    /// the completed triples and who moves next.
    pub fn apply(&self, action: Action, side: Side) -> Result<Transition> {
        let mut board = self.board.clone();
        board.set(action.pos, action.symbol)?;

        let matches = find_matches(&board, action.pos);
        let delta = matches.len() as u32;
        let (score, opponent_score) = match side {
            Side::Max => (self.score + delta, self.opponent_score),
            Side::Min => (self.score, self.opponent_score + delta),
        };

        Ok(Transition {
            state: GameState::from_board(board, score, opponent_score),
            matches,
            next_side: side.next(delta),
        })
    }

    /// Same position seen from the other side: scores swapped.
    ///
    /// Agents always maximize `score`, so a driver hands the Min player the
    /// mirrored state.
    pub fn mirrored(&self) -> GameState {
        Self {
            board: self.board.clone(),
            score: self.opponent_score,
            opponent_score: self.score,
            done: self.done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    #[test]
    fn test_new_state_is_empty() {
        let state = GameState::new(4).unwrap();
        assert_eq!(state.size(), 4);
        assert_eq!(state.score(), 0);
        assert_eq!(state.opponent_score(), 0);
        assert!(!state.is_done());
    }

    #[test]
    fn test_legal_actions_order() {
        let state = GameState::new(3).unwrap();
        let actions = state.legal_actions();
        assert_eq!(actions.len(), 18);
        assert_eq!(actions[0], Action::new(Symbol::S, 0, 0));
        assert_eq!(actions[1], Action::new(Symbol::S, 0, 1));
        assert_eq!(actions[8], Action::new(Symbol::S, 2, 2));
        assert_eq!(actions[9], Action::new(Symbol::O, 0, 0));
        assert_eq!(actions[17], Action::new(Symbol::O, 2, 2));
    }

    #[test]
    fn test_legal_actions_skip_occupied() {
        let state = GameState::new(3)
            .unwrap()
            .generate_successor(Action::new(Symbol::O, 1, 1), Side::Max)
            .unwrap();
        let actions = state.legal_actions();
        assert_eq!(actions.len(), 16);
        assert!(actions.iter().all(|a| a.pos != Pos::new(1, 1)));
    }

    #[test]
    fn test_sos_scenario() {
        let state = GameState::new(3).unwrap();
        let state = state
            .generate_successor(Action::new(Symbol::S, 0, 0), Side::Max)
            .unwrap();
        let state = state
            .generate_successor(Action::new(Symbol::S, 0, 2), Side::Min)
            .unwrap();
        let transition = state.apply(Action::new(Symbol::O, 0, 1), Side::Max).unwrap();

        assert_eq!(transition.matches.len(), 1);
        assert_eq!(transition.matches[0].anchor, Pos::new(0, 0));
        assert_eq!(transition.state.score(), state.score() + 1);
        assert_eq!(transition.state.opponent_score(), 0);
        assert_eq!(transition.next_side, Side::Max);
    }

    #[test]
    fn test_score_goes_to_acting_side() {
        let state = GameState::new(3).unwrap();
        let state = state
            .generate_successor(Action::new(Symbol::S, 0, 0), Side::Max)
            .unwrap();
        let state = state
            .generate_successor(Action::new(Symbol::S, 0, 2), Side::Max)
            .unwrap();
        let transition = state.apply(Action::new(Symbol::O, 0, 1), Side::Min).unwrap();
        assert_eq!(transition.state.score(), 0);
        assert_eq!(transition.state.opponent_score(), 1);
        assert_eq!(transition.next_side, Side::Min);
    }

    #[test]
    fn test_scoreless_move_hands_over() {
        let state = GameState::new(3).unwrap();
        let transition = state.apply(Action::new(Symbol::S, 1, 1), Side::Max).unwrap();
        assert_eq!(transition.delta(), 0);
        assert_eq!(transition.next_side, Side::Min);
    }

    #[test]
    fn test_successor_does_not_mutate() {
        let state = GameState::new(3).unwrap();
        let before = state.clone();
        let next = state
            .generate_successor(Action::new(Symbol::S, 2, 1), Side::Max)
            .unwrap();
        assert_eq!(state, before);
        assert_eq!(state.get_cell(2, 1), Ok(Cell::Empty));
        assert_eq!(next.get_cell(2, 1), Ok(Cell::S));
    }

    #[test]
    fn test_invalid_actions_leave_state_untouched() {
        let state = GameState::new(3)
            .unwrap()
            .generate_successor(Action::new(Symbol::S, 0, 0), Side::Max)
            .unwrap();
        let before = state.clone();

        assert_eq!(
            state.generate_successor(Action::new(Symbol::O, 0, 0), Side::Min),
            Err(GameError::OccupiedCell { row: 0, col: 0 })
        );
        assert_eq!(
            state.generate_successor(Action::new(Symbol::O, 0, 5), Side::Min),
            Err(GameError::InvalidCoordinate {
                row: 0,
                col: 5,
                size: 3
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_done_iff_full() {
        let mut state = GameState::new(3).unwrap();
        for (i, action) in GameState::new(3).unwrap().legal_actions().into_iter().take(9).enumerate() {
            assert!(!state.is_done());
            assert_eq!(state.board().filled_count(), i);
            state = state.generate_successor(action, Side::Max).unwrap();
        }
        assert!(state.is_done());
        assert!(state.legal_actions().is_empty());
    }

    #[test]
    fn test_done_tracks_board() {
        let full = Board::from_rows(&["SOS", "OSO", "SOS"]).unwrap();
        let state = GameState::from_board(full, 0, 0);
        assert!(state.is_done());
        assert_eq!(state.is_done(), state.board().is_full());
        assert!(state.mirrored().is_done());

        let open = Board::from_rows(&["SOS", "OSO", "SO."]).unwrap();
        let state = GameState::from_board(open, 2, 1);
        assert!(!state.is_done());
        assert!(!state.mirrored().is_done());
        let last = state.generate_successor(Action::new(Symbol::O, 2, 2), Side::Min).unwrap();
        assert_eq!(last.is_done(), last.board().is_full());
        assert!(last.is_done());
    }

    #[test]
    fn test_mirrored_swaps_scores() {
        let board = Board::new(3).unwrap();
        let state = GameState::from_board(board, 3, 1);
        let mirrored = state.mirrored();
        assert_eq!(mirrored.score(), 1);
        assert_eq!(mirrored.opponent_score(), 3);
        assert_eq!(mirrored.board(), state.board());
        assert_eq!(mirrored.mirrored(), state);
    }
}
