//! Uniform random agent, used as a baseline opponent

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::SearchAgent;
use crate::error::{GameError, Result};
use crate::state::{Action, GameState};

/// Plays a uniformly random legal action
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(rand::random()),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchAgent for RandomAgent {
    fn get_action(&mut self, state: &GameState) -> Result<Action> {
        if state.is_done() {
            return Err(GameError::NoLegalActions);
        }
        state
            .legal_actions()
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::NoLegalActions)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
