//! Monte Carlo Tree Search over combat rounds.
//!
//! ## Overview
//!
//! - **Player-move tree**: each node's children are the player's playable
//!   moves; the opponent's response is sampled once per expansion
//! - **Binary rollouts**: a playout scores 1 for a player win, 0 otherwise
//! - **Configurable Policies**: selection, simulation, opponent
//! - **Decision overlay**: root win rates adjusted by combat heuristics
//!
//! ## Usage
//!
//! ```rust
//! use dungeon_mcts::core::{CombatState, Combatant, MoveMap, MoveStats};
//! use dungeon_mcts::mcts::{MCTSSearch, SearchConfig};
//!
//! let stats = MoveMap::with_value(MoveStats::new(4, 2));
//! let state = CombatState::new(Combatant::new(20, 5, stats), Combatant::new(20, 5, stats));
//!
//! let mut search = MCTSSearch::new(SearchConfig::default().with_seed(7));
//! let decision = search.decide(&state, 1000).unwrap();
//! println!("play {} ({:?})", decision.mv, decision.reason);
//!
//! for (mv, visits) in search.action_visits() {
//!     println!("{mv}: {visits} visits");
//! }
//! ```
//!
//! ## Custom Policies
//!
//! ```rust,ignore
//! use dungeon_mcts::mcts::{GuidedRollout, MCTSSearch, SearchConfig, UCB1};
//!
//! let search = MCTSSearch::new(SearchConfig::default())
//!     .with_selection(UCB1)
//!     .with_simulation(GuidedRollout::default());
//! ```

pub mod config;
pub mod node;
pub mod overlay;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::SearchConfig;
pub use node::{NodeId, SearchNode};
pub use overlay::{Decision, DecisionOverlay, DecisionReason, MoveScore};
pub use policy::{
    CounterAwareUcb, GuidedRollout, OpponentPolicy, RandomRollout, SelectionPolicy,
    SimulationPolicy, UniformOpponent, UCB1,
};
pub use search::{MCTSSearch, SearchError};
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
