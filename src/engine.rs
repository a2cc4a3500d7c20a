//! Configurable AI engine
//!
//! Ties the pieces together: an [`AgentConfig`] names a strategy, a depth,
//! an evaluation function and the tie-break policy; [`Engine`] builds the
//! matching [`SearchAgent`] and plays for either side, timing each search.
//!
//! # Example
//!
//! ```
//! use sos::engine::{AgentConfig, AgentKind, Engine};
//! use sos::search::Depth;
//! use sos::{GameState, Side};
//!
//! let config = AgentConfig::new(AgentKind::AlphaBeta)
//!     .with_depth(Depth::plies(1))
//!     .with_seed(3);
//! let mut engine = Engine::with_config(config);
//!
//! let state = GameState::new(4).unwrap();
//! let result = engine.get_move_with_stats(&state, Side::Max).unwrap();
//! println!("{} in {}ms ({})", result.action, result.time_ms, result.stats);
//! ```

use std::fmt;
use std::time::Instant;

use tracing::debug;

use crate::error::Result;
use crate::eval::Heuristic;
use crate::search::{
    AlphaBetaAgent, Depth, ExpectimaxAgent, MinimaxAgent, RandomAgent, SearchAgent, SearchStats,
    TieBreak,
};
use crate::state::{Action, GameState, Side};

/// Search strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum AgentKind {
    Minimax,
    #[default]
    AlphaBeta,
    Expectimax,
    Random,
}

impl AgentKind {
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Minimax,
        AgentKind::AlphaBeta,
        AgentKind::Expectimax,
        AgentKind::Random,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Minimax => "Minimax",
            AgentKind::AlphaBeta => "Alpha-Beta",
            AgentKind::Expectimax => "Expectimax",
            AgentKind::Random => "Random",
        }
    }

    /// Whether depth and heuristic apply
    pub fn searches(self) -> bool {
        self != AgentKind::Random
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything needed to build an agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentConfig {
    pub kind: AgentKind,
    pub depth: Depth,
    pub heuristic: Heuristic,
    pub tie_break: TieBreak,
    /// Alpha-beta only: try children in heuristic order
    pub ordered: bool,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(AgentKind::default())
    }
}

impl AgentConfig {
    #[must_use]
    pub fn new(kind: AgentKind) -> Self {
        Self {
            kind,
            depth: Depth::default(),
            heuristic: Heuristic::default(),
            tie_break: TieBreak::default(),
            ordered: false,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    #[must_use]
    pub fn with_ordering(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the configured agent
    pub fn build(&self) -> Box<dyn SearchAgent> {
        let eval = self.heuristic.as_fn();
        match self.kind {
            AgentKind::Minimax => {
                let agent = MinimaxAgent::new(eval, self.depth).with_tie_break(self.tie_break);
                match self.seed {
                    Some(seed) => Box::new(agent.with_seed(seed)),
                    None => Box::new(agent),
                }
            }
            AgentKind::AlphaBeta => {
                let mut agent =
                    AlphaBetaAgent::new(eval, self.depth).with_tie_break(self.tie_break);
                if self.ordered {
                    agent = agent.with_ordering(eval);
                }
                match self.seed {
                    Some(seed) => Box::new(agent.with_seed(seed)),
                    None => Box::new(agent),
                }
            }
            AgentKind::Expectimax => {
                let agent = ExpectimaxAgent::new(eval, self.depth).with_tie_break(self.tie_break);
                match self.seed {
                    Some(seed) => Box::new(agent.with_seed(seed)),
                    None => Box::new(agent),
                }
            }
            AgentKind::Random => match self.seed {
                Some(seed) => Box::new(RandomAgent::with_seed(seed)),
                None => Box::new(RandomAgent::new()),
            },
        }
    }
}

impl fmt::Display for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.searches() {
            write!(f, "{} ({}, {})", self.kind, self.depth, self.heuristic.label())
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// Result of a move search with statistics
#[derive(Debug, Clone, Copy)]
pub struct MoveResult {
    pub action: Action,
    /// Wall-clock search time in milliseconds
    pub time_ms: u64,
    pub stats: SearchStats,
}

/// An agent that can play either side.
///
/// Agents only ever maximize, so a move for [`Side::Min`] is searched on the
/// mirrored state.
pub struct Engine {
    config: AgentConfig,
    agent: Box<dyn SearchAgent>,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AgentConfig::default())
    }

    #[must_use]
    pub fn with_config(config: AgentConfig) -> Self {
        Self {
            agent: config.build(),
            config,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Replace the configuration, rebuilding the agent
    pub fn set_config(&mut self, config: AgentConfig) {
        self.agent = config.build();
        self.config = config;
    }

    pub fn name(&self) -> &str {
        self.agent.name()
    }

    /// Best action for `side`
    pub fn get_move(&mut self, state: &GameState, side: Side) -> Result<Action> {
        self.get_move_with_stats(state, side).map(|r| r.action)
    }

    /// Best action for `side`, with timing and search statistics
    pub fn get_move_with_stats(&mut self, state: &GameState, side: Side) -> Result<MoveResult> {
        let start = Instant::now();
        let action = match side {
            Side::Max => self.agent.get_action(state)?,
            Side::Min => self.agent.get_action(&state.mirrored())?,
        };
        let time_ms = start.elapsed().as_millis() as u64;
        let stats = self.agent.stats();
        debug!(agent = self.agent.name(), ?side, %action, time_ms, "engine move");
        Ok(MoveResult {
            action,
            time_ms,
            stats,
        })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Symbol};
    use crate::error::GameError;

    #[test]
    fn test_engine_default() {
        let engine = Engine::default();
        assert_eq!(engine.config().kind, AgentKind::AlphaBeta);
        assert_eq!(engine.name(), "AlphaBeta");
    }

    #[test]
    fn test_build_every_kind() {
        for kind in AgentKind::ALL {
            let agent = AgentConfig::new(kind).with_seed(1).build();
            let expected = match kind {
                AgentKind::Minimax => "Minimax",
                AgentKind::AlphaBeta => "AlphaBeta",
                AgentKind::Expectimax => "Expectimax",
                AgentKind::Random => "Random",
            };
            assert_eq!(agent.name(), expected);
        }
    }

    #[test]
    fn test_engine_plays_min_on_mirrored_state() {
        // Min searches the mirrored state; the point still lands on Min
        let board = Board::from_rows(&["S.S", "...", "..."]).unwrap();
        let state = GameState::from_board(board, 2, 0);
        let config = AgentConfig::new(AgentKind::Minimax)
            .with_heuristic(Heuristic::RawScore)
            .with_seed(4);
        let mut engine = Engine::with_config(config);

        let action = engine.get_move(&state, Side::Min).unwrap();
        assert_eq!(action, Action::new(Symbol::O, 0, 1));
        let next = state.apply(action, Side::Min).unwrap();
        assert_eq!(next.state.opponent_score(), 1);
        assert_eq!(next.state.score(), 2);
    }

    #[test]
    fn test_engine_terminal_state() {
        let board = Board::from_rows(&["SSS", "OOO", "SSS"]).unwrap();
        let state = GameState::from_board(board, 0, 0);
        let mut engine = Engine::new();
        assert_eq!(
            engine.get_move(&state, Side::Max),
            Err(GameError::NoLegalActions)
        );
    }

    #[test]
    fn test_move_result_stats() {
        let state = GameState::new(3).unwrap();
        let config = AgentConfig::new(AgentKind::Minimax)
            .with_depth(Depth::half_plies(1))
            .with_tie_break(TieBreak::Off);
        let mut engine = Engine::with_config(config);
        let result = engine.get_move_with_stats(&state, Side::Max).unwrap();
        assert_eq!(result.action, Action::new(Symbol::S, 0, 0));
        assert_eq!(result.stats.nodes, 19);
    }

    #[test]
    fn test_set_config_rebuilds() {
        let mut engine = Engine::new();
        engine.set_config(AgentConfig::new(AgentKind::Random).with_seed(2));
        assert_eq!(engine.name(), "Random");
        assert_eq!(engine.config().kind, AgentKind::Random);
    }

    #[test]
    fn test_config_display() {
        let config = AgentConfig::new(AgentKind::Expectimax)
            .with_depth(Depth::plies(2))
            .with_heuristic(Heuristic::ScoreDifference);
        assert!(config.to_string().starts_with("Expectimax (2 plies"));
        assert_eq!(AgentConfig::new(AgentKind::Random).to_string(), "Random");
    }
}
