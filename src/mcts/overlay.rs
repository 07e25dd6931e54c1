//! Final move choice from root statistics.
//!
//! Raw win rates are adjusted with a few combat heuristics before the move
//! is picked: take a winning lethal hit, press damage on a weak opponent,
//! answer the strongest threat and keep charges off the floor.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CombatState, Move};

use super::policy::{counter_bonus, LOW_HEALTH_RATIO};
use super::tree::SearchTree;

/// Decision-time penalty for spending a scarce charge.
#[must_use]
pub fn decision_charge_penalty(charge: u8) -> f64 {
    match charge {
        1 => 0.5,
        2 => 0.15,
        _ => 0.0,
    }
}

/// Why a move was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionReason {
    /// A winning move that also kills this round.
    Lethal,
    /// Highest adjusted score.
    Scored,
    /// No root child was visited.
    Fallback,
}

/// Score breakdown for one root move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveScore {
    pub mv: Move,
    pub visits: u32,
    pub win_rate: f64,
    pub strategy_bonus: f64,
    pub charge_penalty: f64,
    pub score: f64,
}

/// The chosen move with the candidates it was chosen from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub mv: Move,
    pub reason: DecisionReason,
    /// Visited root moves in expansion order.
    pub candidates: Vec<MoveScore>,
}

/// Heuristic overlay applied to the root children of a finished search.
#[derive(Clone, Debug, Default)]
pub struct DecisionOverlay;

impl DecisionOverlay {
    /// Offensive, counter and defensive terms for `mv` in `state`.
    #[must_use]
    pub fn strategy_bonus(state: &CombatState, mv: Move) -> f64 {
        let stats = &state.player.stats;
        let mut bonus = 0.0;

        let max_damage = stats.max_damage();
        if max_damage > 0 {
            let weight = if state.opponent.health_ratio() < LOW_HEALTH_RATIO {
                0.1
            } else {
                0.05
            };
            bonus += weight * f64::from(stats[mv].damage) / f64::from(max_damage);
        }

        bonus += counter_bonus(state, mv);

        let max_shield = stats.max_shield();
        if state.player.health_ratio() < LOW_HEALTH_RATIO && max_shield > 0 {
            bonus += 0.06 * f64::from(stats[mv].shield) / f64::from(max_shield);
        }

        bonus
    }

    /// Choose the move to play from the root of `tree`.
    ///
    /// `root_state` is the state the search started from.
    #[must_use]
    pub fn decide(&self, tree: &SearchTree, root_state: &CombatState) -> Decision {
        let player = &root_state.player;
        let opponent_pool = root_state.opponent.effective_health();

        let mut candidates = Vec::with_capacity(Move::ALL.len());
        let mut lethal: Option<(Move, f64)> = None;

        for (_, child) in tree.children(tree.root()) {
            let (Some(mv), Some(win_rate)) = (child.mv, child.win_rate()) else {
                continue;
            };
            let charge = player.charges.get(mv);

            if player.stats[mv].damage > opponent_pool
                && charge > 1
                && win_rate > 0.5
                && lethal.map_or(true, |(_, best)| win_rate > best)
            {
                lethal = Some((mv, win_rate));
            }

            let strategy_bonus = Self::strategy_bonus(root_state, mv);
            let charge_penalty = decision_charge_penalty(charge);
            let score = win_rate + strategy_bonus - charge_penalty;
            debug!(
                %mv,
                visits = child.visits,
                win_rate,
                strategy_bonus,
                charge_penalty,
                score,
                "move analysis"
            );

            candidates.push(MoveScore {
                mv,
                visits: child.visits,
                win_rate,
                strategy_bonus,
                charge_penalty,
                score,
            });
        }

        let (mv, reason) = if let Some((mv, win_rate)) = lethal {
            debug!(%mv, win_rate, "lethal move");
            (mv, DecisionReason::Lethal)
        } else {
            candidates
                .iter()
                .fold(None::<&MoveScore>, |best, c| match best {
                    Some(b) if b.score >= c.score => Some(b),
                    _ => Some(c),
                })
                .map_or((Move::DEFAULT, DecisionReason::Fallback), |best| {
                    (best.mv, DecisionReason::Scored)
                })
        };

        debug!(%mv, ?reason, "decision");
        Decision {
            mv,
            reason,
            candidates,
        }
    }
}
