//! # dungeon-mcts
//!
//! Move selection for a three-way (rock / paper / scissor) dungeon combat
//! game in which every move carries damage, shield and a limited charge.
//!
//! ## Design Principles
//!
//! 1. **Owned states**: every rules transition returns a fresh
//!    `CombatState`; search nodes never share or mutate state.
//!
//! 2. **Injectable randomness**: all random draws go through a seeded
//!    `GameRng`, so a seeded search is exactly reproducible.
//!
//! 3. **Policies as traits**: selection, simulation and opponent modeling
//!    are swappable, which keeps tests deterministic.
//!
//! ## Modules
//!
//! - `core`: moves, charges, move stats, combat state, RNG
//! - `rules`: round resolution, availability and terminal checks
//! - `mcts`: Monte Carlo Tree Search and the decision overlay
//! - `loot`: post-encounter reward scoring and selection
//! - `python`: PyO3 bindings (feature `python`)

pub mod core;
pub mod loot;
pub mod mcts;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    ChargeSet, CombatSnapshot, CombatState, Combatant, CombatantStats, GameRng, Move, MoveMap,
    MoveStats, Side, StateError,
};

pub use crate::rules::{CombatRules, Outcome};

pub use crate::mcts::{
    Decision, DecisionReason, MCTSSearch, SearchConfig, SearchError, SearchStats,
};

pub use crate::loot::{score_reward, LootEvaluator, LootOption, RewardCategory};

/// Best player move for `state` using the default configuration.
///
/// Unseeded, so repeated calls may differ. Use `MCTSSearch` with a seeded
/// `SearchConfig` for reproducible results.
pub fn search(state: &CombatState, iterations: u32) -> Result<Move, SearchError> {
    MCTSSearch::new(SearchConfig::default()).search(state, iterations)
}
