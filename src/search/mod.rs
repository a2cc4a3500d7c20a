//! Search module for the SOS AI
//!
//! Contains:
//! - The [`SearchAgent`] capability shared by every strategy
//! - Minimax, alpha-beta and expectimax search
//! - A uniform random agent
//! - The safe-random tie-break used when a search cannot tell moves apart
//!
//! # Depth accounting
//!
//! A scoring move grants its side another move, so one recursive step is a
//! single placed symbol rather than a full turn. Depth is therefore counted
//! in single-action steps: [`Depth::plies`] converts a nominal ply count to
//! two steps per ply. Each recursive call consumes one step and the side to
//! act flips only after a scoreless move.

pub mod alphabeta;
pub mod expectimax;
pub mod minimax;
pub mod random;
pub mod tiebreak;

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::Result;
use crate::state::{Action, GameState, Side};

pub use alphabeta::{AlphaBetaAgent, OrderFn};
pub use expectimax::ExpectimaxAgent;
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use tiebreak::{safe_random_action, TieBreak};

/// Anything that can pick a move.
///
/// Agents always play the Max side of the state they are given; a driver
/// hands the Min player [`GameState::mirrored`].
pub trait SearchAgent: Send {
    /// Choose an action for the Max side. Fails with
    /// [`GameError::NoLegalActions`](crate::GameError::NoLegalActions) on a
    /// terminal state.
    fn get_action(&mut self, state: &GameState) -> Result<Action>;

    /// Short display name
    fn name(&self) -> &str;

    /// Statistics of the most recent `get_action` call
    fn stats(&self) -> SearchStats {
        SearchStats::default()
    }
}

/// Search budget in single-action steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Depth(u32);

impl Depth {
    /// `plies` nominal plies, two steps each. Saturates at `u32::MAX` steps.
    #[must_use]
    pub const fn plies(plies: u32) -> Self {
        Self(plies.saturating_mul(2))
    }

    /// `steps` single-action steps (half plies)
    #[must_use]
    pub const fn half_plies(steps: u32) -> Self {
        Self(steps)
    }

    #[inline]
    pub const fn steps(self) -> u32 {
        self.0
    }

    /// Nominal ply count (0.5 per step)
    pub fn as_plies(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth::plies(1)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} plies", self.as_plies())
    }
}

/// Search statistics for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States visited, root included
    pub nodes: u64,
    /// Evaluation function calls
    pub leaves: u64,
    /// Siblings skipped by alpha-beta cutoffs
    pub cutoffs: u64,
    /// Whether the safe-random tie-break replaced the search choice
    pub tie_break_used: bool,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} leaves, {} cutoffs{}",
            self.nodes,
            self.leaves,
            self.cutoffs,
            if self.tie_break_used { ", tie-break" } else { "" }
        )
    }
}

/// A child of a search node
pub(crate) struct Child {
    pub action: Action,
    pub state: GameState,
    /// Side to act in `state`
    pub side: Side,
}

/// Successors of `state` for every legal action of `side`, in legal order.
pub(crate) fn children(state: &GameState, side: Side) -> Result<Vec<Child>> {
    state
        .legal_actions()
        .into_iter()
        .map(|action| {
            let transition = state.apply(action, side)?;
            Ok(Child {
                action,
                side: transition.next_side,
                state: transition.state,
            })
        })
        .collect()
}

/// Settings and per-search bookkeeping shared by the tree searchers.
/// Each agent owns its own copy.
pub(crate) struct SearchCore {
    pub eval: crate::eval::EvalFn,
    pub depth: Depth,
    pub tie_break: TieBreak,
    pub rng: StdRng,
    pub stats: SearchStats,
}

impl SearchCore {
    pub fn new(eval: crate::eval::EvalFn, depth: Depth) -> Self {
        Self {
            eval,
            depth,
            tie_break: TieBreak::default(),
            rng: StdRng::seed_from_u64(rand::random()),
            stats: SearchStats::default(),
        }
    }

    /// Evaluate a leaf
    #[inline]
    pub fn leaf(&mut self, state: &GameState) -> f64 {
        self.stats.leaves += 1;
        (self.eval)(state)
    }

    /// Pick the root action from `(action, value)` pairs.
    ///
    /// The first action with the strictly greatest value wins. When that
    /// value equals the smallest value seen, the search found nothing to
    /// separate the moves and the tie-break (if enabled) takes over.
    pub fn pick(&mut self, state: &GameState, scored: &[(Action, f64)]) -> Result<Action> {
        let mut best: Option<(Action, f64)> = None;
        let mut min_value = f64::INFINITY;
        for &(action, value) in scored {
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((action, value));
            }
            min_value = min_value.min(value);
        }
        let (best_action, best_value) =
            best.ok_or(crate::error::GameError::NoLegalActions)?;

        if self.tie_break == TieBreak::SafeRandom && best_value == min_value {
            if let Some(action) = safe_random_action(state, &mut self.rng)? {
                tracing::trace!(%action, value = best_value, "flat root, safe-random tie-break");
                self.stats.tie_break_used = true;
                return Ok(action);
            }
        }
        Ok(best_action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_steps() {
        assert_eq!(Depth::plies(1).steps(), 2);
        assert_eq!(Depth::plies(3), Depth::half_plies(6));
        assert_eq!(Depth::half_plies(3).as_plies(), 1.5);
        assert_eq!(Depth::default(), Depth::plies(1));
    }

    #[test]
    fn test_huge_ply_count_saturates() {
        assert_eq!(Depth::plies(1 << 31).steps(), u32::MAX);
        assert_eq!(Depth::plies(u32::MAX).steps(), u32::MAX);
        assert!(Depth::plies(1 << 31) > Depth::plies(1));
    }
}
