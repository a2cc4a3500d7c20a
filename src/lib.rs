//! SOS game engine with adversarial search
//!
//! Two sides take turns placing an `S` or an `O` on an N×N board. Completing
//! an S-O-S line horizontally, vertically or diagonally scores a point per
//! line and grants another move. The game ends when the board is full.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Bounds-checked N×N board of write-once cells
//! - [`rules`]: Triple detection and "almost-SOS" exposure
//! - [`state`]: Immutable game state, actions and successor generation
//! - [`eval`]: Pluggable leaf heuristics
//! - [`search`]: Minimax, alpha-beta, expectimax and random agents
//! - [`engine`]: Agent configuration and a side-aware engine wrapper
//! - [`arena`]: Game driver and series statistics
//!
//! # Quick Start
//!
//! ```
//! use sos::engine::{AgentConfig, AgentKind, Engine};
//! use sos::{GameState, Side};
//!
//! let mut engine = Engine::with_config(AgentConfig::new(AgentKind::Minimax).with_seed(1));
//! let mut state = GameState::new(3).unwrap();
//! let mut side = Side::Max;
//!
//! while !state.is_done() {
//!     let action = engine.get_move(&state, side).unwrap();
//!     let transition = state.apply(action, side).unwrap();
//!     side = transition.next_side;
//!     state = transition.state;
//! }
//! println!("{} - {}", state.score(), state.opponent_score());
//! ```

pub mod arena;
pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Pos, Symbol, DEFAULT_BOARD_SIZE};
pub use engine::{AgentConfig, AgentKind, Engine, MoveResult};
pub use error::{GameError, Result};
pub use state::{Action, GameState, Side, Transition};
