//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

use crate::rules::{CombatRules, MAX_ROUNDS};

/// MCTS configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// UCB exploration constant (default: 1.4).
    /// Higher values favor exploration over exploitation.
    pub exploration_weight: f64,

    /// Round cap used by the terminal rule.
    pub max_rounds: u32,

    /// Iteration budget used when the caller does not supply one.
    pub iterations: u32,

    /// Random seed for expansion and rollouts.
    /// `None` seeds from entropy; the same seed reproduces a search exactly.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_weight: 1.4,
            max_rounds: MAX_ROUNDS,
            iterations: 25_000,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Create a new config with custom exploration weight.
    pub fn with_exploration(mut self, w: f64) -> Self {
        self.exploration_weight = w;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with custom round cap.
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Create a new config with custom default iteration budget.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Combat rules implied by this config.
    #[must_use]
    pub fn rules(&self) -> CombatRules {
        CombatRules::new(self.max_rounds)
    }
}
