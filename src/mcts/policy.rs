//! MCTS policies for selection, simulation, and opponent modeling.
//!
//! Policies are trait-based so a search can be steered (or made fully
//! deterministic in tests):
//! - `SelectionPolicy`: which child to descend into (CounterAwareUcb, UCB1)
//! - `SimulationPolicy`: how to play out a state (RandomRollout, GuidedRollout)
//! - `OpponentPolicy`: how the opponent responds (UniformOpponent)

use crate::core::{CombatState, GameRng, Move, MoveList};
use crate::rules::CombatRules;

use super::config::SearchConfig;
use super::node::NodeId;
use super::tree::SearchTree;

/// Player health ratio below which defensive weights apply.
pub const LOW_HEALTH_RATIO: f64 = 0.3;

// =============================================================================
// Shared heuristics
// =============================================================================

/// The opponent's highest-damage playable move and its damage.
///
/// Falls back to every move when none is playable. The first move in
/// `Move::ALL` order wins ties.
#[must_use]
pub fn strongest_opponent_move(state: &CombatState) -> (Move, i32) {
    let stats = &state.opponent.stats;
    stats
        .strongest_of(&state.opponent.charges.available())
        .or_else(|| stats.strongest_of(&Move::ALL))
        .unwrap_or((Move::DEFAULT, 0))
}

/// Strongest opponent damage relative to the player's health plus shield.
#[must_use]
pub fn threat_level(state: &CombatState) -> f64 {
    let (_, damage) = strongest_opponent_move(state);
    let effective = state.player.effective_health();
    if effective > 0 {
        f64::from(damage) / f64::from(effective)
    } else {
        1.0
    }
}

/// Bonus for answering the opponent's strongest playable move.
///
/// Zero unless `mv` is the counter to that move.
#[must_use]
pub fn counter_bonus(state: &CombatState, mv: Move) -> f64 {
    let (strongest, _) = strongest_opponent_move(state);
    if mv != strongest.counter() {
        return 0.0;
    }
    let weight = if state.player.health_ratio() < LOW_HEALTH_RATIO {
        0.08
    } else {
        0.04
    };
    weight * threat_level(state).min(1.0)
}

/// Selection-time penalty for spending a scarce charge.
#[must_use]
pub fn selection_charge_penalty(charge: u8) -> f64 {
    match charge {
        1 => 0.3,
        2 => 0.1,
        _ => 0.0,
    }
}

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select a child of `node`.
    ///
    /// Returns `None` only when `node` has no children.
    fn select(&self, tree: &SearchTree, node: NodeId, config: &SearchConfig) -> Option<NodeId>;
}

/// Scores visited children with `score`, returning the first unvisited child
/// if there is one and otherwise the first child with the highest score.
fn select_by(
    tree: &SearchTree,
    node: NodeId,
    mut score: impl FnMut(Move, f64, f64) -> f64,
) -> Option<NodeId> {
    let ln_parent = f64::from(tree.get(node).visits.max(1)).ln();
    let mut best: Option<(NodeId, f64)> = None;

    for (id, child) in tree.children(node) {
        let (Some(win_rate), Some(mv)) = (child.win_rate(), child.mv) else {
            return Some(id);
        };
        let exploration = (ln_parent / f64::from(child.visits)).sqrt();
        let value = score(mv, win_rate, exploration);
        if best.map_or(true, |(_, b)| value > b) {
            best = Some((id, value));
        }
    }

    best.map(|(id, _)| id)
}

/// UCB1 with counter-move and charge-conservation terms.
///
/// Formula: W/N + c * sqrt(ln(N_parent) / N) + counter_bonus - charge_penalty,
/// with both extra terms read from the parent node's state.
#[derive(Clone, Debug, Default)]
pub struct CounterAwareUcb;

impl SelectionPolicy for CounterAwareUcb {
    fn select(&self, tree: &SearchTree, node: NodeId, config: &SearchConfig) -> Option<NodeId> {
        let state = &tree.get(node).state;
        select_by(tree, node, |mv, win_rate, exploration| {
            let bonus = counter_bonus(state, mv)
                - selection_charge_penalty(state.player.charges.get(mv));
            win_rate + config.exploration_weight * exploration + bonus
        })
    }
}

/// Plain UCB1 (Upper Confidence Bound) selection policy.
///
/// Formula: W/N + c * sqrt(ln(N_parent) / N)
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn select(&self, tree: &SearchTree, node: NodeId, config: &SearchConfig) -> Option<NodeId> {
        select_by(tree, node, |_, win_rate, exploration| {
            win_rate + config.exploration_weight * exploration
        })
    }
}

// =============================================================================
// Opponent Policy
// =============================================================================

/// Policy for choosing the opponent's move in expansion and rollouts.
pub trait OpponentPolicy: Send + Sync {
    /// Choose an opponent move. Returns `None` if none is playable.
    fn choose(&self, state: &CombatState, rng: &mut GameRng) -> Option<Move>;
}

/// Uniform random opponent over playable moves.
#[derive(Clone, Debug, Default)]
pub struct UniformOpponent;

impl OpponentPolicy for UniformOpponent {
    fn choose(&self, state: &CombatState, rng: &mut GameRng) -> Option<Move> {
        rng.choose(&state.opponent.charges.available()).copied()
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for playing a state out to a result.
pub trait SimulationPolicy: Send + Sync {
    /// Play out a private copy of `state`, returning 1 for a player win
    /// and 0 otherwise.
    fn simulate(
        &self,
        rules: &CombatRules,
        state: &CombatState,
        opponent: &dyn OpponentPolicy,
        rng: &mut GameRng,
    ) -> u32;
}

/// Plays out a state with a per-round player move chooser.
fn play_out(
    rules: &CombatRules,
    state: &CombatState,
    opponent: &dyn OpponentPolicy,
    rng: &mut GameRng,
    mut player_move: impl FnMut(&CombatState, &MoveList, &mut GameRng) -> Option<Move>,
) -> u32 {
    let mut state = state.clone();

    while !rules.is_terminal(&state) {
        let moves = state.player.charges.available();
        let Some(p) = player_move(&state, &moves, rng) else {
            break;
        };
        let Some(o) = opponent.choose(&state, rng) else {
            break;
        };
        state = rules.resolve(&state, p, o);
    }

    rules.rollout_reward(&state)
}

/// Uniform random playout for the player.
#[derive(Clone, Debug, Default)]
pub struct RandomRollout;

impl SimulationPolicy for RandomRollout {
    fn simulate(
        &self,
        rules: &CombatRules,
        state: &CombatState,
        opponent: &dyn OpponentPolicy,
        rng: &mut GameRng,
    ) -> u32 {
        play_out(rules, state, opponent, rng, |_, moves, rng| rng.choose(moves).copied())
    }
}

/// Heuristic playout for the player.
///
/// Most rounds follow a scripted policy that keeps charges above one, takes
/// lethal hits, presses damage against a weak opponent and counters or
/// shields when the player is weak. The remaining rounds are random among
/// moves with charges to spare.
#[derive(Clone, Debug)]
pub struct GuidedRollout {
    /// Probability of following the scripted policy in a round.
    pub script_probability: f64,
}

impl Default for GuidedRollout {
    fn default() -> Self {
        Self {
            script_probability: 0.8,
        }
    }
}

/// First move in `moves` with the highest `key`.
fn first_max_by(moves: &[Move], key: impl Fn(Move) -> i32) -> Option<Move> {
    let mut best: Option<(Move, i32)> = None;
    for &mv in moves {
        let k = key(mv);
        if best.map_or(true, |(_, b)| k > b) {
            best = Some((mv, k));
        }
    }
    best.map(|(mv, _)| mv)
}

impl GuidedRollout {
    fn scripted_move(state: &CombatState, safe: &[Move], rng: &mut GameRng) -> Option<Move> {
        let player = &state.player;
        let opponent_pool = state.opponent.effective_health();
        let lethal: MoveList = safe
            .iter()
            .copied()
            .filter(|&m| player.stats[m].damage > opponent_pool)
            .collect();
        if !lethal.is_empty() {
            return rng.choose(&lethal).copied();
        }

        let (strongest, strongest_damage) = strongest_opponent_move(state);
        let counter = strongest.counter();
        let by_damage = |m: Move| player.stats[m].damage;

        if state.opponent.health_ratio() < LOW_HEALTH_RATIO {
            first_max_by(safe, by_damage)
        } else if player.health_ratio() < LOW_HEALTH_RATIO {
            if safe.contains(&counter) && strongest_damage > 3 {
                Some(counter)
            } else {
                first_max_by(safe, |m| player.stats[m].shield)
            }
        } else if strongest_damage < 5 {
            first_max_by(safe, by_damage)
        } else if safe.contains(&counter) {
            Some(counter)
        } else {
            rng.choose(safe).copied()
        }
    }
}

impl SimulationPolicy for GuidedRollout {
    fn simulate(
        &self,
        rules: &CombatRules,
        state: &CombatState,
        opponent: &dyn OpponentPolicy,
        rng: &mut GameRng,
    ) -> u32 {
        play_out(rules, state, opponent, rng, |state, moves, rng| {
            let spare: MoveList = moves
                .iter()
                .copied()
                .filter(|&m| state.player.charges.get(m) > 1)
                .collect();
            let safe: &[Move] = if spare.is_empty() { moves } else { &spare };
            if safe.is_empty() {
                return None;
            }

            if rng.gen_bool(self.script_probability) {
                Self::scripted_move(state, safe, rng)
            } else {
                rng.choose(safe).copied()
            }
        })
    }
}
