//! Alpha-Beta search with turn extension
//!
//! Same tree as [`MinimaxAgent`](super::MinimaxAgent), with an (alpha, beta)
//! window. Because a scoring move keeps the turn, a Max node can have a Max
//! parent, so bounds are carried as a window rather than as a single
//! inherited value.
//!
//! Cutoffs are strict: a Max node stops once a child exceeds beta, a Min
//! node once a child drops below alpha. A child whose value equals the
//! current best is therefore searched exactly, which keeps the root choice
//! and the flat-root check identical to minimax.
//!
//! # Example
//!
//! ```
//! use sos::eval::score_difference;
//! use sos::search::{AlphaBetaAgent, Depth, SearchAgent};
//! use sos::GameState;
//!
//! let mut agent = AlphaBetaAgent::new(score_difference, Depth::plies(2)).with_seed(7);
//! let state = GameState::new(3).unwrap();
//! let action = agent.get_action(&state).unwrap();
//! println!("{action} after {}", agent.stats());
//! ```

use tracing::debug;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{children, Child, Depth, SearchAgent, SearchCore, SearchStats, TieBreak};
use crate::error::{GameError, Result};
use crate::eval::EvalFn;
use crate::state::{Action, GameState, Side};

/// Move-ordering key. Max nodes try children with the highest key first,
/// Min nodes the lowest.
pub type OrderFn = fn(&GameState) -> f64;

/// Minimax with alpha-beta pruning
pub struct AlphaBetaAgent {
    core: SearchCore,
    order: Option<OrderFn>,
}

impl AlphaBetaAgent {
    #[must_use]
    pub fn new(eval: EvalFn, depth: Depth) -> Self {
        Self {
            core: SearchCore::new(eval, depth),
            order: None,
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

    /// Explore children in key order instead of legal-action order
    #[must_use]
    pub fn with_ordering(mut self, order: OrderFn) -> Self {
        self.order = Some(order);
        self
    }

    pub fn depth(&self) -> Depth {
        self.core.depth
    }

    /// Children of `state` for `side`, in search order.
    /// Sorting is stable, so equal keys keep legal order.
    fn ordered_children(&self, state: &GameState, side: Side) -> Result<Vec<Child>> {
        let mut kids = children(state, side)?;
        if let Some(order) = self.order {
            let mut keyed: Vec<(f64, Child)> =
                kids.into_iter().map(|c| (order(&c.state), c)).collect();
            match side {
                Side::Max => keyed.sort_by(|a, b| b.0.total_cmp(&a.0)),
                Side::Min => keyed.sort_by(|a, b| a.0.total_cmp(&b.0)),
            }
            kids = keyed.into_iter().map(|(_, c)| c).collect();
        }
        Ok(kids)
    }

    /// Fail-soft alpha-beta over the closed window [alpha, beta].
    fn alpha_beta(
        &mut self,
        state: &GameState,
        side: Side,
        steps: u32,
        alpha: f64,
        beta: f64,
    ) -> Result<f64> {
        self.core.stats.nodes += 1;
        if steps == 0 || state.is_done() {
            return Ok(self.core.leaf(state));
        }

        let kids = self.ordered_children(state, side)?;
        let total = kids.len();
        match side {
            Side::Max => {
                let mut best = f64::NEG_INFINITY;
                for (i, child) in kids.into_iter().enumerate() {
                    let value =
                        self.alpha_beta(&child.state, child.side, steps - 1, alpha.max(best), beta)?;
                    if value > best {
                        best = value;
                    }
                    if value > beta {
                        self.core.stats.cutoffs += (total - i - 1) as u64;
                        break;
                    }
                }
                Ok(best)
            }
            Side::Min => {
                let mut best = f64::INFINITY;
                for (i, child) in kids.into_iter().enumerate() {
                    let value =
                        self.alpha_beta(&child.state, child.side, steps - 1, alpha, beta.min(best))?;
                    if value < best {
                        best = value;
                    }
                    if value < alpha {
                        self.core.stats.cutoffs += (total - i - 1) as u64;
                        break;
                    }
                }
                Ok(best)
            }
        }
    }
}

impl SearchAgent for AlphaBetaAgent {
    fn get_action(&mut self, state: &GameState) -> Result<Action> {
        if state.is_done() {
            return Err(GameError::NoLegalActions);
        }
        self.core.stats = SearchStats {
            nodes: 1,
            ..SearchStats::default()
        };

        let steps = self.core.depth.steps().saturating_sub(1);
        let mut best = f64::NEG_INFINITY;
        let mut scored = Vec::new();
        for child in self.ordered_children(state, Side::Max)? {
            // Children below the current best come back as upper bounds
            // still below it, so they can neither win nor flatten the root
            let value = self.alpha_beta(&child.state, child.side, steps, best, f64::INFINITY)?;
            best = best.max(value);
            scored.push((child.action, value));
        }

        let action = self.core.pick(state, &scored)?;
        debug!(%action, stats = %self.core.stats, "alpha-beta move");
        Ok(action)
    }

    fn name(&self) -> &str {
        "AlphaBeta"
    }

    fn stats(&self) -> SearchStats {
        self.core.stats
    }
}
