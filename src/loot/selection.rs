//! Simulation-backed loot selection.
//!
//! Each reward option is applied to a copy of the player and played out
//! against the encounters still ahead on the map. Closer encounters weigh
//! more. Health rewards get special handling at both ends of the health
//! bar: forced when the player is low, skipped when they would be wasted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::{CombatState, Combatant, CombatantStats, GameRng, StateError};
use crate::mcts::{RandomRollout, SearchConfig, SimulationPolicy, UniformOpponent};
use crate::rules::CombatRules;

use super::reward::RewardCategory;

/// Errors from loot evaluation.
#[derive(Debug, Error)]
pub enum LootError {
    #[error("Invalid roster key {0:?}, expected floor_N or room_N")]
    InvalidRosterKey(String),

    #[error("Invalid encounter state: {0}")]
    InvalidState(#[from] StateError),
}

/// One reward on offer, in the game's wire format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootOption {
    #[serde(rename = "boonTypeString")]
    pub category: RewardCategory,
    #[serde(rename = "selectedVal1", default)]
    pub value1: i32,
    #[serde(rename = "selectedVal2", default)]
    pub value2: i32,
}

impl LootOption {
    pub fn new(category: impl Into<RewardCategory>, value1: i32, value2: i32) -> Self {
        Self {
            category: category.into(),
            value1,
            value2,
        }
    }

    /// Static weighted score.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.category
            .score(f64::from(self.value1), f64::from(self.value2))
    }

    /// Copy of `state` with this reward applied to the player.
    #[must_use]
    pub fn apply(&self, state: &CombatState) -> CombatState {
        let mut next = state.clone();
        let player = &mut next.player;

        match &self.category {
            RewardCategory::Upgrade(mv) => {
                let stats = &mut player.stats[*mv];
                stats.damage = stats.damage.saturating_add(self.value1);
                stats.shield = stats.shield.saturating_add(self.value2);
            }
            RewardCategory::AddMaxHealth => {
                player.max_health = player.max_health.saturating_add(self.value1);
                player.health = player.health.saturating_add(self.value1).min(player.max_health);
            }
            RewardCategory::AddMaxArmor => {
                player.max_shield = player.max_shield.saturating_add(self.value1);
                player.shield = player.shield.saturating_add(self.value1).min(player.max_shield);
            }
            RewardCategory::Heal => {
                player.health = player.health.saturating_add(self.value1).min(player.max_health);
            }
            RewardCategory::Other(_) => {}
        }

        next
    }

    /// Fraction of a heal that would overflow max health.
    ///
    /// Zero for anything that is not a positive heal.
    #[must_use]
    pub fn heal_waste(&self, player: &Combatant) -> f64 {
        if self.category != RewardCategory::Heal || self.value1 <= 0 {
            return 0.0;
        }
        let usable = player.max_health.saturating_sub(player.health);
        (1.0 - f64::from(usable) / f64::from(self.value1)).max(0.0)
    }
}

impl std::fmt::Display for LootOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.category.describe(self.value1, self.value2))
    }
}

/// An enemy waiting at a map position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub floor: u32,
    pub room: u32,
    pub health: i32,
    pub shield: i32,
    pub moves: CombatantStats,
}

impl Encounter {
    /// The enemy at full health and shield with full charges.
    #[must_use]
    pub fn combatant(&self) -> Combatant {
        Combatant::new(self.health, self.shield, self.moves)
    }

    /// Whether this encounter lies after `(floor, room)`.
    #[must_use]
    pub fn is_after(&self, floor: u32, room: u32) -> bool {
        self.floor > floor || (self.floor == floor && self.room > room)
    }

    /// Rooms between `(floor, room)` and this encounter, four per floor.
    #[must_use]
    pub fn distance_from(&self, floor: u32, room: u32) -> i64 {
        (i64::from(self.floor) - i64::from(floor)) * 4 + (i64::from(self.room) - i64::from(room))
    }
}

#[derive(Deserialize)]
struct RosterEnemy {
    health: i32,
    shield: i32,
    moves: CombatantStats,
}

#[derive(Deserialize)]
struct RosterFile {
    enemies: BTreeMap<String, BTreeMap<String, RosterEnemy>>,
}

fn key_number(key: &str, prefix: &str) -> Result<u32, LootError> {
    key.strip_prefix(prefix)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| LootError::InvalidRosterKey(key.to_string()))
}

/// Every known enemy, ordered by map position.
///
/// Deserializes from the game's enemy table:
/// `{"enemies": {"floor_1": {"room_1": {"health", "shield", "moves"}}}}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RosterFile")]
pub struct EnemyRoster {
    encounters: Vec<Encounter>,
}

impl TryFrom<RosterFile> for EnemyRoster {
    type Error = LootError;

    fn try_from(file: RosterFile) -> Result<Self, Self::Error> {
        let mut encounters = Vec::new();
        for (floor_key, rooms) in file.enemies {
            let floor = key_number(&floor_key, "floor_")?;
            for (room_key, enemy) in rooms {
                encounters.push(Encounter {
                    floor,
                    room: key_number(&room_key, "room_")?,
                    health: enemy.health,
                    shield: enemy.shield,
                    moves: enemy.moves,
                });
            }
        }
        Ok(Self::new(encounters))
    }
}

impl EnemyRoster {
    pub fn new(mut encounters: Vec<Encounter>) -> Self {
        encounters.sort_by_key(|e| (e.floor, e.room));
        Self { encounters }
    }

    /// Encounters strictly after `(floor, room)`.
    pub fn after(&self, floor: u32, room: u32) -> impl Iterator<Item = &Encounter> {
        self.encounters.iter().filter(move |e| e.is_after(floor, room))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }
}

/// Ranks loot options by simulated win rate.
pub struct LootEvaluator {
    rules: CombatRules,
    rollouts: u32,
    rng: GameRng,
}

impl LootEvaluator {
    /// Rollouts per encounter used by the game bot.
    pub const DEFAULT_ROLLOUTS: u32 = 25;

    /// Evaluator using the config's round cap and seed.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            rules: config.rules(),
            rollouts: Self::DEFAULT_ROLLOUTS,
            rng: GameRng::from_seed(config.seed),
        }
    }

    /// Set the rollouts per encounter.
    pub fn with_rollouts(mut self, rollouts: u32) -> Self {
        self.rollouts = rollouts;
        self
    }

    /// Win rate with `option` applied against a fresh `encounter`.
    ///
    /// The trial keeps the current round, so late snapshots leave fewer
    /// rounds before the cap decides by health ratio.
    pub fn win_rate(
        &mut self,
        option: &LootOption,
        state: &CombatState,
        encounter: &Encounter,
    ) -> Result<f64, LootError> {
        let mut trial = option.apply(state);
        trial.opponent = encounter.combatant();
        trial.validate()?;

        if self.rollouts == 0 {
            return Ok(0.0);
        }

        let mut wins = 0;
        for _ in 0..self.rollouts {
            let mut rng = self.rng.fork();
            wins += RandomRollout.simulate(&self.rules, &trial, &UniformOpponent, &mut rng);
        }
        Ok(f64::from(wins) / f64::from(self.rollouts))
    }

    /// Distance-weighted win rate over the encounters after `(floor, room)`.
    ///
    /// Returns 0.5 when nothing is left on the map.
    pub fn future_win_rate(
        &mut self,
        option: &LootOption,
        state: &CombatState,
        roster: &EnemyRoster,
        floor: u32,
        room: u32,
    ) -> Result<f64, LootError> {
        let mut weighted = 0.0;
        let mut total_weight = 0.0;

        for encounter in roster.after(floor, room) {
            let distance = encounter.distance_from(floor, room) as f64;
            let weight = (4.0 - 0.5 * distance).max(0.5);
            let rate = self.win_rate(option, state, encounter)?;
            debug!(
                floor = encounter.floor,
                room = encounter.room,
                rate,
                weight,
                "future encounter"
            );
            weighted += rate * weight;
            total_weight += weight;
        }

        if total_weight == 0.0 {
            return Ok(0.5);
        }

        let mut rate = weighted / total_weight;
        let waste = option.heal_waste(&state.player);
        if waste > 0.5 {
            rate *= 1.0 - 0.5 * waste;
        }
        Ok(rate)
    }

    /// Index of the option to take, `None` only when `options` is empty.
    pub fn select(
        &mut self,
        options: &[LootOption],
        state: &CombatState,
        roster: &EnemyRoster,
        floor: u32,
        room: u32,
    ) -> Result<Option<usize>, LootError> {
        let ratio = state.player.health_ratio();

        let mut considered: Vec<usize> = (0..options.len()).collect();
        if ratio < 0.4 {
            let health: Vec<usize> = considered
                .iter()
                .copied()
                .filter(|&i| options[i].category.restores_health())
                .collect();
            if !health.is_empty() {
                considered = health;
            }
        }

        let mut best: Option<(usize, f64)> = None;
        for &i in &considered {
            let option = &options[i];
            let is_heal = option.category == RewardCategory::Heal;

            if is_heal && ratio > 0.9 && option.heal_waste(&state.player) > 0.7 {
                debug!(%option, "skipping wasted heal");
                continue;
            }

            let mut rate = self.future_win_rate(option, state, roster, floor, room)?;
            if is_heal && ratio < 0.6 {
                rate += (1.0 - ratio) * 0.3;
            }
            debug!(%option, rate, "loot option");

            let better = match best {
                None => true,
                Some((j, b)) => rate > b || (rate == b && option.score() > options[j].score()),
            };
            if better {
                best = Some((i, rate));
            }
        }

        Ok(best.map(|(i, _)| i).or_else(|| considered.first().copied()))
    }
}
