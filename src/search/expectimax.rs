//! Expectimax: the opponent is modelled as a uniform random player
//!
//! Max nodes maximize as in minimax; Min nodes average their children.

use tracing::debug;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{children, Depth, SearchAgent, SearchCore, SearchStats, TieBreak};
use crate::error::{GameError, Result};
use crate::eval::EvalFn;
use crate::state::{Action, GameState, Side};

/// Expectimax search
pub struct ExpectimaxAgent {
    core: SearchCore,
}

impl ExpectimaxAgent {
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

    fn value(&mut self, state: &GameState, side: Side, steps: u32) -> Result<f64> {
        self.core.stats.nodes += 1;
        if steps == 0 || state.is_done() {
            return Ok(self.core.leaf(state));
        }

        let kids = children(state, side)?;
        match side {
            Side::Max => {
                let mut best = f64::NEG_INFINITY;
                for child in kids {
                    best = best.max(self.value(&child.state, child.side, steps - 1)?);
                }
                Ok(best)
            }
            Side::Min => {
                if kids.is_empty() {
                    return Ok(0.0);
                }
                let count = kids.len() as f64;
                let mut total = 0.0;
                for child in kids {
                    total += self.value(&child.state, child.side, steps - 1)?;
                }
                Ok(total / count)
            }
        }
    }
}

impl SearchAgent for ExpectimaxAgent {
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
        debug!(%action, stats = %self.core.stats, "expectimax move");
        Ok(action)
    }

    fn name(&self) -> &str {
        "Expectimax"
    }

    fn stats(&self) -> SearchStats {
        self.core.stats
    }
}
