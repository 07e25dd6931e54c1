//! Combat state: both combatants plus the round counter.
//!
//! ## CombatState
//!
//! The unit of search. Every rules transition returns a new, independently
//! owned value; nothing in the state is shared between search nodes.
//!
//! ## CombatSnapshot
//!
//! The flat payload supplied by the surrounding system (field names follow
//! the game service). Convert with `CombatState::try_from`, which validates
//! it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::charges::{ChargeSet, MAX_CHARGE};
use super::moves::Move;
use super::stats::CombatantStats;

/// Which combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => f.write_str("player"),
            Side::Opponent => f.write_str("opponent"),
        }
    }
}

/// Reasons a snapshot cannot be searched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("{side} has no available moves")]
    NoAvailableMoves { side: Side },

    #[error("{side} charge for {mv} is {charge}, expected 0..=3")]
    ChargeOutOfRange { side: Side, mv: Move, charge: u8 },

    #[error("{side} {mv} has negative stats (damage {damage}, shield {shield})")]
    NegativeStats { side: Side, mv: Move, damage: i32, shield: i32 },

    #[error("{side} max health must be positive, got {max_health}")]
    NonPositiveMaxHealth { side: Side, max_health: i32 },

    #[error("{side} {field} is {value}, outside 0..={max}")]
    PoolOutOfRange { side: Side, field: &'static str, value: i32, max: i32 },
}

/// One participant's health, shield, charges and move stats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub health: i32,
    pub shield: i32,
    pub max_health: i32,
    pub max_shield: i32,
    pub charges: ChargeSet,
    pub stats: CombatantStats,
}

impl Combatant {
    /// Create a combatant at full health and shield with full charges.
    #[must_use]
    pub fn new(max_health: i32, max_shield: i32, stats: CombatantStats) -> Self {
        Self {
            health: max_health,
            shield: max_shield,
            max_health,
            max_shield,
            charges: ChargeSet::full(),
            stats,
        }
    }

    /// Set current health.
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    /// Set current shield.
    #[must_use]
    pub fn with_shield(mut self, shield: i32) -> Self {
        self.shield = shield;
        self
    }

    /// Set charges.
    #[must_use]
    pub fn with_charges(mut self, charges: ChargeSet) -> Self {
        self.charges = charges;
        self
    }

    /// Current health as a fraction of max health.
    #[must_use]
    pub fn health_ratio(&self) -> f64 {
        if self.max_health <= 0 {
            0.0
        } else {
            f64::from(self.health) / f64::from(self.max_health)
        }
    }

    /// Health plus shield.
    #[must_use]
    pub fn effective_health(&self) -> i32 {
        self.health.saturating_add(self.shield)
    }

    /// Whether health has reached zero.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Add shield, capped at max shield.
    pub fn gain_shield(&mut self, amount: i32) {
        self.shield = self.shield.saturating_add(amount).min(self.max_shield);
    }

    /// Take damage: shield absorbs point for point, the rest hits health.
    pub fn absorb(&mut self, damage: i32) {
        if self.shield >= damage {
            self.shield -= damage;
        } else {
            let remaining = damage.saturating_sub(self.shield);
            self.shield = 0;
            self.health = self.health.saturating_sub(remaining).max(0);
        }
    }

    fn validate(&self, side: Side) -> Result<(), StateError> {
        for (mv, &charge) in self.charges.0.iter() {
            if charge > MAX_CHARGE {
                return Err(StateError::ChargeOutOfRange { side, mv, charge });
            }
        }
        if self.charges.available_count() == 0 {
            return Err(StateError::NoAvailableMoves { side });
        }
        for (mv, stats) in self.stats.iter() {
            if stats.damage < 0 || stats.shield < 0 {
                return Err(StateError::NegativeStats {
                    side,
                    mv,
                    damage: stats.damage,
                    shield: stats.shield,
                });
            }
        }
        if self.max_health <= 0 {
            return Err(StateError::NonPositiveMaxHealth { side, max_health: self.max_health });
        }
        let pools = [
            ("health", self.health, self.max_health),
            ("shield", self.shield, self.max_shield),
        ];
        for (field, value, max) in pools {
            if value < 0 || value > max {
                return Err(StateError::PoolOutOfRange { side, field, value, max });
            }
        }
        Ok(())
    }
}

/// Complete state of one encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    pub player: Combatant,
    pub opponent: Combatant,
    /// Current round (starts at 1).
    pub round: u32,
}

impl CombatState {
    /// Create a state at round 1.
    #[must_use]
    pub fn new(player: Combatant, opponent: Combatant) -> Self {
        Self { player, opponent, round: 1 }
    }

    /// Set the round number.
    #[must_use]
    pub fn with_round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    /// Access a combatant by side.
    #[must_use]
    pub fn side(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Check the preconditions search relies on.
    pub fn validate(&self) -> Result<(), StateError> {
        self.player.validate(Side::Player)?;
        self.opponent.validate(Side::Opponent)
    }
}

fn first_round() -> u32 {
    1
}

/// Flat combat payload as sent by the game service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub player_health: i32,
    pub player_shield: i32,
    pub enemy_health: i32,
    pub enemy_shield: i32,
    pub player_max_health: i32,
    pub player_max_shield: i32,
    pub enemy_max_health: i32,
    pub enemy_max_shield: i32,
    #[serde(default = "first_round")]
    pub round_number: u32,
    #[serde(default)]
    pub player_charges: ChargeSet,
    #[serde(default)]
    pub enemy_charges: ChargeSet,
    pub player_move_stats: CombatantStats,
    pub enemy_move_stats: CombatantStats,
}

impl TryFrom<CombatSnapshot> for CombatState {
    type Error = StateError;

    fn try_from(s: CombatSnapshot) -> Result<Self, Self::Error> {
        let state = CombatState {
            player: Combatant {
                health: s.player_health,
                shield: s.player_shield,
                max_health: s.player_max_health,
                max_shield: s.player_max_shield,
                charges: s.player_charges,
                stats: s.player_move_stats,
            },
            opponent: Combatant {
                health: s.enemy_health,
                shield: s.enemy_shield,
                max_health: s.enemy_max_health,
                max_shield: s.enemy_max_shield,
                charges: s.enemy_charges,
                stats: s.enemy_move_stats,
            },
            round: s.round_number,
        };
        state.validate()?;
        Ok(state)
    }
}

impl From<&CombatState> for CombatSnapshot {
    fn from(state: &CombatState) -> Self {
        Self {
            player_health: state.player.health,
            player_shield: state.player.shield,
            enemy_health: state.opponent.health,
            enemy_shield: state.opponent.shield,
            player_max_health: state.player.max_health,
            player_max_shield: state.player.max_shield,
            enemy_max_health: state.opponent.max_health,
            enemy_max_shield: state.opponent.max_shield,
            round_number: state.round,
            player_charges: state.player.charges,
            enemy_charges: state.opponent.charges,
            player_move_stats: state.player.stats,
            enemy_move_stats: state.opponent.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MoveMap, MoveStats};

    fn stats() -> CombatantStats {
        MoveMap {
            rock: MoveStats::new(15, 6),
            paper: MoveStats::new(0, 4),
            scissor: MoveStats::new(2, 2),
        }
    }

    fn state() -> CombatState {
        CombatState::new(Combatant::new(12, 6, stats()), Combatant::new(4, 2, stats()))
    }

    #[test]
    fn test_absorb_shield_first() {
        let mut c = Combatant::new(20, 5, stats());
        c.absorb(3);
        assert_eq!((c.health, c.shield), (20, 2));

        c.absorb(10);
        assert_eq!((c.health, c.shield), (12, 0));

        c.absorb(50);
        assert_eq!(c.health, 0);
        assert!(c.is_defeated());
    }

    #[test]
    fn test_pools_saturate_at_extremes() {
        let mut c = Combatant::new(i32::MAX, i32::MAX, stats());
        assert_eq!(c.effective_health(), i32::MAX);

        c.gain_shield(i32::MAX);
        assert_eq!(c.shield, i32::MAX);

        let mut c = Combatant::new(20, 5, stats()).with_shield(0);
        c.absorb(i32::MAX);
        assert_eq!((c.health, c.shield), (0, 0));
    }

    #[test]
    fn test_gain_shield_capped() {
        let mut c = Combatant::new(20, 5, stats()).with_shield(4);
        c.gain_shield(6);
        assert_eq!(c.shield, 5);
    }

    #[test]
    fn test_valid_state() {
        assert_eq!(state().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_depleted_side() {
        let mut s = state();
        s.opponent.charges = ChargeSet::new(0, 0, 0);
        assert_eq!(s.validate(), Err(StateError::NoAvailableMoves { side: Side::Opponent }));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut s = state();
        s.player.charges = ChargeSet::new(5, 1, 1);
        assert!(matches!(s.validate(), Err(StateError::ChargeOutOfRange { mv: Move::Rock, .. })));

        let mut s = state();
        s.player.health = 13;
        assert!(matches!(s.validate(), Err(StateError::PoolOutOfRange { field: "health", .. })));

        let mut s = state();
        s.opponent.stats.paper.damage = -1;
        assert!(matches!(s.validate(), Err(StateError::NegativeStats { side: Side::Opponent, .. })));
    }

    #[test]
    fn test_snapshot_conversion() {
        let json = r#"{
            "player_health": 12, "player_shield": 6,
            "enemy_health": 4, "enemy_shield": 2,
            "player_max_health": 12, "player_max_shield": 6,
            "enemy_max_health": 4, "enemy_max_shield": 2,
            "player_charges": {"rock": 3, "paper": 2, "scissor": 1},
            "player_move_stats": {
                "rock": {"damage": 15, "shield": 6},
                "paper": {"damage": 0, "shield": 4},
                "scissor": {"damage": 2, "shield": 2}
            },
            "enemy_move_stats": {
                "rock": {"damage": 4, "shield": 0},
                "paper": {"damage": 0, "shield": 4},
                "scissor": {"damage": 2, "shield": 2}
            }
        }"#;
        let snapshot: CombatSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.round_number, 1);
        assert_eq!(snapshot.enemy_charges, ChargeSet::full());

        let state = CombatState::try_from(snapshot.clone()).unwrap();
        assert_eq!(state.player.charges, ChargeSet::new(3, 2, 1));
        assert_eq!(state.opponent.stats.rock.damage, 4);
        assert_eq!(CombatSnapshot::from(&state), snapshot);
    }
}
