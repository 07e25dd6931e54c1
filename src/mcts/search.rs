//! Core MCTS search algorithm.
//!
//! Nodes expand on player moves only. Each expansion samples one opponent
//! response from the opponent policy and stores the resolved state, so a
//! child reflects a single sampled round rather than every response.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, trace};

use crate::core::{CombatState, GameRng, Move, StateError};
use crate::rules::CombatRules;

use super::config::SearchConfig;
use super::node::NodeId;
use super::overlay::{Decision, DecisionOverlay};
use super::policy::{
    CounterAwareUcb, OpponentPolicy, RandomRollout, SelectionPolicy, SimulationPolicy,
    UniformOpponent,
};
use super::stats::SearchStats;
use super::tree::SearchTree;

/// Iterations between progress traces.
const TRACE_INTERVAL: u32 = 1000;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid state: {0}")]
    InvalidState(#[from] StateError),
}

/// Main MCTS search context.
///
/// Owns the configuration, the policies and the tree from the most recent
/// search. Each search builds a fresh tree from a copy of the caller's state.
pub struct MCTSSearch {
    /// Search configuration.
    config: SearchConfig,

    /// Combat rules derived from the config.
    rules: CombatRules,

    /// Tree from the last completed search.
    tree: Option<SearchTree>,

    /// RNG for expansion and rollouts, reseeded per search.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy>,

    /// Opponent modeling policy.
    opponent: Box<dyn OpponentPolicy>,

    /// Final move choice.
    overlay: DecisionOverlay,

    /// Search statistics.
    stats: SearchStats,
}

impl MCTSSearch {
    /// Create a new MCTS search context.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            rules: config.rules(),
            rng: GameRng::from_seed(config.seed),
            config,
            tree: None,
            selection: Box::new(CounterAwareUcb),
            simulation: Box::new(RandomRollout),
            opponent: Box::new(UniformOpponent),
            overlay: DecisionOverlay,
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Set a custom opponent policy.
    pub fn with_opponent<O: OpponentPolicy + 'static>(mut self, opponent: O) -> Self {
        self.opponent = Box::new(opponent);
        self
    }

    /// Run MCTS for `iterations` and return the move to play.
    ///
    /// Zero iterations returns `Move::Rock`.
    pub fn search(&mut self, state: &CombatState, iterations: u32) -> Result<Move, SearchError> {
        Ok(self.decide(state, iterations)?.mv)
    }

    /// Run MCTS for `iterations` and return the full decision.
    pub fn decide(
        &mut self,
        state: &CombatState,
        iterations: u32,
    ) -> Result<Decision, SearchError> {
        state.validate()?;

        let start = Instant::now();
        self.stats = SearchStats::default();
        self.rng = GameRng::from_seed(self.config.seed);

        let mut tree = SearchTree::new(state.clone());
        for i in 1..=iterations {
            self.iteration(&mut tree);
            self.stats.iterations += 1;

            if i % TRACE_INTERVAL == 0 {
                trace!(
                    iteration = i,
                    nodes = tree.len(),
                    root_visits = tree.root_node().visits,
                    "search progress"
                );
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;

        let decision = self.overlay.decide(&tree, state);
        debug!(
            mv = %decision.mv,
            reason = ?decision.reason,
            iterations = self.stats.iterations,
            nodes = tree.len(),
            expansion_rate = self.stats.expansion_rate(),
            time_us = self.stats.time_us,
            "search complete"
        );

        self.tree = Some(tree);
        Ok(decision)
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, tree: &mut SearchTree) {
        // === SELECTION ===
        let mut current = tree.root();
        loop {
            let node = tree.get(current);
            if self.rules.is_terminal(&node.state) || !node.is_fully_expanded() {
                break;
            }
            match self.selection.select(tree, current, &self.config) {
                Some(child) => current = child,
                None => break,
            }
        }

        // === EXPANSION ===
        let from_terminal = self.rules.is_terminal(&tree.get(current).state);
        let leaf = if from_terminal {
            current
        } else {
            self.expand(tree, current)
        };

        // === SIMULATION ===
        let mut rollout_rng = self.rng.fork();
        let result = self.simulation.simulate(
            &self.rules,
            &tree.get(leaf).state,
            self.opponent.as_ref(),
            &mut rollout_rng,
        );
        self.stats.record_playout(from_terminal);

        // === BACKPROPAGATION ===
        tree.backpropagate(leaf, result);
    }

    /// Add one child for the first playable move without one.
    ///
    /// Falls back to the first existing child (or the node itself) when
    /// nothing is left to expand.
    fn expand(&mut self, tree: &mut SearchTree, id: NodeId) -> NodeId {
        let node = tree.get(id);
        let untried = node
            .state
            .player
            .charges
            .available()
            .into_iter()
            .find(|&mv| tree.child_for(id, mv).is_none());

        let Some(mv) = untried else {
            return node.children.first().copied().unwrap_or(id);
        };
        let Some(response) = self.opponent.choose(&node.state, &mut self.rng) else {
            return id;
        };
        let next = self.rules.resolve(&node.state, mv, response);

        let child = tree.add_child(id, mv, next);
        self.stats.record_expansion(tree.get(child).depth);
        child
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Tree from the last search, if any.
    #[must_use]
    pub fn tree(&self) -> Option<&SearchTree> {
        self.tree.as_ref()
    }

    /// Visit counts of the root's children in expansion order.
    pub fn action_visits(&self) -> Vec<(Move, u32)> {
        self.root_children()
            .map(|(mv, visits, _)| (mv, visits))
            .collect()
    }

    /// Win rates of the visited root children in expansion order.
    pub fn win_rates(&self) -> Vec<(Move, f64)> {
        self.root_children()
            .filter_map(|(mv, _, rate)| rate.map(|r| (mv, r)))
            .collect()
    }

    fn root_children(&self) -> impl Iterator<Item = (Move, u32, Option<f64>)> + '_ {
        self.tree.iter().flat_map(|tree| {
            tree.children(tree.root())
                .filter_map(|(_, n)| n.mv.map(|mv| (mv, n.visits, n.win_rate())))
        })
    }
}

impl Default for MCTSSearch {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
