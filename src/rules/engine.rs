//! Round resolution and terminal rules.
//!
//! `CombatRules` is a pure function of its inputs: `resolve` never touches
//! the state it is given and always returns a fresh one.

use serde::{Deserialize, Serialize};

use crate::core::{ChargeSet, CombatState, Move, MoveList};

/// Default round cap.
pub const MAX_ROUNDS: u32 = 50;

/// Winner of a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Player,
    Opponent,
    Tie,
}

impl Outcome {
    /// Outcome of `player_move` against `opponent_move`.
    #[must_use]
    pub fn of(player_move: Move, opponent_move: Move) -> Self {
        if player_move == opponent_move {
            Outcome::Tie
        } else if player_move.beats() == opponent_move {
            Outcome::Player
        } else {
            Outcome::Opponent
        }
    }
}

/// Moves playable with the given charges, in `Move::ALL` order.
#[must_use]
pub fn available_moves(charges: &ChargeSet) -> MoveList {
    charges.available()
}

/// Combat rules with a configurable round cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRules {
    /// Rounds at which the encounter ends regardless of health.
    pub max_rounds: u32,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self { max_rounds: MAX_ROUNDS }
    }
}

impl CombatRules {
    /// Rules with a custom round cap.
    #[must_use]
    pub fn new(max_rounds: u32) -> Self {
        Self { max_rounds }
    }

    /// Whether the encounter is over.
    #[must_use]
    pub fn is_terminal(&self, state: &CombatState) -> bool {
        state.player.is_defeated()
            || state.opponent.is_defeated()
            || state.round >= self.max_rounds
    }

    /// Play one round and return the next state.
    ///
    /// Both moves must have charges left; callers pick them from
    /// `available_moves`.
    #[must_use]
    pub fn resolve(&self, state: &CombatState, player_move: Move, opponent_move: Move) -> CombatState {
        let mut next = state.clone();
        next.player.charges.spend(player_move);
        next.opponent.charges.spend(opponent_move);

        let player_stats = next.player.stats[player_move];
        let opponent_stats = next.opponent.stats[opponent_move];

        match Outcome::of(player_move, opponent_move) {
            Outcome::Player => {
                next.player.gain_shield(player_stats.shield);
                next.opponent.absorb(player_stats.damage);
            }
            Outcome::Opponent => {
                next.opponent.gain_shield(opponent_stats.shield);
                next.player.absorb(opponent_stats.damage);
            }
            Outcome::Tie => {
                // Shields first, then both hits land on the raised shields.
                next.player.gain_shield(player_stats.shield);
                next.opponent.gain_shield(opponent_stats.shield);
                next.opponent.absorb(player_stats.damage);
                next.player.absorb(opponent_stats.damage);
            }
        }

        if !self.is_terminal(&next) {
            next.round += 1;
        }
        next
    }

    /// Binary playout reward for the player.
    ///
    /// A kill decides outright. Otherwise the side with the higher health
    /// ratio wins; shield is not counted.
    #[must_use]
    pub fn rollout_reward(&self, state: &CombatState) -> u32 {
        if state.opponent.is_defeated() && !state.player.is_defeated() {
            1
        } else if state.player.is_defeated() {
            0
        } else {
            u32::from(state.player.health_ratio() > state.opponent.health_ratio())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Combatant, MoveMap, MoveStats};

    fn state() -> CombatState {
        let player = MoveMap {
            rock: MoveStats::new(10, 2),
            paper: MoveStats::new(3, 4),
            scissor: MoveStats::new(5, 1),
        };
        let opponent = MoveMap {
            rock: MoveStats::new(6, 3),
            paper: MoveStats::new(2, 5),
            scissor: MoveStats::new(4, 2),
        };
        CombatState::new(
            Combatant::new(30, 10, player).with_shield(0),
            Combatant::new(20, 5, opponent),
        )
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(Outcome::of(Move::Rock, Move::Scissor), Outcome::Player);
        assert_eq!(Outcome::of(Move::Scissor, Move::Rock), Outcome::Opponent);
        assert_eq!(Outcome::of(Move::Paper, Move::Paper), Outcome::Tie);
        assert_eq!(Outcome::of(Move::Paper, Move::Rock), Outcome::Player);
    }

    #[test]
    fn test_player_win() {
        let rules = CombatRules::default();
        let next = rules.resolve(&state(), Move::Rock, Move::Scissor);

        assert_eq!(next.opponent.shield, 0);
        assert_eq!(next.opponent.health, 15);
        assert_eq!(next.player.shield, 2);
        assert_eq!(next.player.health, 30);
        assert_eq!(next.round, 2);
        assert_eq!(next.player.charges, ChargeSet::new(2, 3, 3));
        assert_eq!(next.opponent.charges, ChargeSet::new(3, 3, 2));
    }

    #[test]
    fn test_opponent_win() {
        let rules = CombatRules::default();
        let next = rules.resolve(&state(), Move::Scissor, Move::Rock);

        // Opponent shield already at max.
        assert_eq!(next.opponent.shield, 5);
        assert_eq!(next.player.health, 24);
        assert_eq!(next.opponent.health, 20);
    }

    #[test]
    fn test_tie_hits_both() {
        let rules = CombatRules::default();
        let next = rules.resolve(&state(), Move::Paper, Move::Paper);

        // Player: shield 0 + 4 = 4, takes 2 -> shield 2.
        assert_eq!((next.player.health, next.player.shield), (30, 2));
        // Opponent: shield capped at 5, takes 3 -> shield 2.
        assert_eq!((next.opponent.health, next.opponent.shield), (20, 2));
    }

    #[test]
    fn test_extreme_stats_saturate() {
        let rules = CombatRules::default();
        let huge = Combatant::new(
            i32::MAX,
            i32::MAX,
            MoveMap::with_value(MoveStats::new(i32::MAX, i32::MAX)),
        );
        let s = CombatState::new(huge.clone(), huge);
        assert_eq!(s.validate(), Ok(()));

        let next = rules.resolve(&s, Move::Rock, Move::Rock);

        assert_eq!((next.player.health, next.player.shield), (i32::MAX, 0));
        assert_eq!((next.opponent.health, next.opponent.shield), (i32::MAX, 0));
        assert!(!rules.is_terminal(&next));
    }

    #[test]
    fn test_input_untouched() {
        let rules = CombatRules::default();
        let before = state();
        let _ = rules.resolve(&before, Move::Rock, Move::Scissor);
        assert_eq!(before, state());
    }

    #[test]
    fn test_round_not_incremented_on_kill() {
        let rules = CombatRules::default();
        let mut s = state();
        s.opponent.health = 3;
        s.opponent.shield = 0;

        let next = rules.resolve(&s, Move::Rock, Move::Scissor);
        assert!(rules.is_terminal(&next));
        assert_eq!(next.round, 1);
    }

    #[test]
    fn test_round_cap() {
        let rules = CombatRules::new(3);
        let s = state().with_round(2);
        let next = rules.resolve(&s, Move::Paper, Move::Rock);

        assert_eq!(next.round, 3);
        assert!(rules.is_terminal(&next));
    }

    #[test]
    fn test_rollout_reward() {
        let rules = CombatRules::default();
        let mut s = state();
        s.opponent.health = 0;
        assert_eq!(rules.rollout_reward(&s), 1);

        s.player.health = 0;
        assert_eq!(rules.rollout_reward(&s), 0);

        let mut s = state();
        s.player.health = 15; // 0.5
        s.opponent.health = 12; // 0.6
        assert_eq!(rules.rollout_reward(&s), 0);

        s.opponent.health = 8; // 0.4
        assert_eq!(rules.rollout_reward(&s), 1);
    }

    #[test]
    fn test_available_moves() {
        let moves = available_moves(&ChargeSet::new(2, 0, 1));
        assert_eq!(moves.as_slice(), &[Move::Rock, Move::Scissor]);
    }
}
