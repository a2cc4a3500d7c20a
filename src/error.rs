//! Error types for the SOS engine

use thiserror::Error;

/// Errors raised by the board model, game state and search agents.
///
/// All of these guard against caller misuse: a search only ever plays
/// actions produced by `GameState::legal_actions`, so none of them surface
/// during a correct search run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("invalid coordinate ({row}, {col}) on a {size}x{size} board")]
    InvalidCoordinate { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: usize, col: usize },

    #[error("no legal actions: the board is full")]
    NoLegalActions,

    #[error("invalid board size {size} (minimum is {min})")]
    InvalidSize { size: usize, min: usize },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GameError>;
