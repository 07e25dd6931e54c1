//! Reward categories and their static scores.
//!
//! After a won encounter the game offers a few rewards ("boons"), each a
//! category plus one or two magnitudes. `score_reward` ranks them with a
//! fixed weighted sum and no search.

use serde::{Deserialize, Serialize};

use crate::core::Move;

/// Kind of post-encounter reward, parsed from the game's boon label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RewardCategory {
    /// Restore health (`value1`).
    Heal,
    /// Raise max health (`value1`).
    AddMaxHealth,
    /// Raise max shield (`value1`).
    AddMaxArmor,
    /// Add `value1` damage and `value2` shield to a move.
    Upgrade(Move),
    /// A label this crate does not interpret.
    Other(String),
}

impl RewardCategory {
    /// The game's label for this category.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            RewardCategory::Heal => "Heal",
            RewardCategory::AddMaxHealth => "AddMaxHealth",
            RewardCategory::AddMaxArmor => "AddMaxArmor",
            RewardCategory::Upgrade(Move::Rock) => "UpgradeRock",
            RewardCategory::Upgrade(Move::Paper) => "UpgradePaper",
            RewardCategory::Upgrade(Move::Scissor) => "UpgradeScissor",
            RewardCategory::Other(label) => label,
        }
    }

    /// Heal or max-health rewards.
    #[must_use]
    pub fn restores_health(&self) -> bool {
        matches!(self, RewardCategory::Heal | RewardCategory::AddMaxHealth)
    }

    /// Weighted score of this category at the given magnitudes.
    #[must_use]
    pub fn score(&self, value1: f64, value2: f64) -> f64 {
        match self {
            RewardCategory::Upgrade(Move::Rock) => 3.0 * value1 + 2.0 * value2,
            RewardCategory::Upgrade(Move::Paper) => 2.0 * value1 + 3.0 * value2,
            RewardCategory::Upgrade(Move::Scissor) => 2.5 * value1 + 2.5 * value2,
            RewardCategory::AddMaxArmor => 4.0 * value1,
            RewardCategory::AddMaxHealth => 3.0 * value1,
            RewardCategory::Heal => 2.0 * value1,
            RewardCategory::Other(_) => value1 + value2,
        }
    }

    /// Human-readable description at the given magnitudes.
    #[must_use]
    pub fn describe(&self, value1: i32, value2: i32) -> String {
        match self {
            RewardCategory::Heal => format!("Heal +{value1} HP"),
            RewardCategory::AddMaxHealth => format!("Max Health +{value1}"),
            RewardCategory::AddMaxArmor => format!("Max Shield +{value1}"),
            RewardCategory::Upgrade(mv) => {
                let name = match mv {
                    Move::Rock => "Rock",
                    Move::Paper => "Paper",
                    Move::Scissor => "Scissor",
                };
                format!("{name}: +{value1} DMG, +{value2} Shield")
            }
            RewardCategory::Other(label) => format!("{label}: {value1}, {value2}"),
        }
    }
}

impl From<&str> for RewardCategory {
    fn from(label: &str) -> Self {
        match label {
            "Heal" => RewardCategory::Heal,
            "AddMaxHealth" => RewardCategory::AddMaxHealth,
            "AddMaxArmor" | "AddMaxShield" => RewardCategory::AddMaxArmor,
            "UpgradeRock" => RewardCategory::Upgrade(Move::Rock),
            "UpgradePaper" => RewardCategory::Upgrade(Move::Paper),
            "UpgradeScissor" => RewardCategory::Upgrade(Move::Scissor),
            other => RewardCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for RewardCategory {
    fn from(label: String) -> Self {
        RewardCategory::from(label.as_str())
    }
}

impl From<RewardCategory> for String {
    fn from(category: RewardCategory) -> Self {
        category.label().to_string()
    }
}

impl std::fmt::Display for RewardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Score a reward by category label and magnitudes.
///
/// Unknown labels score `value1 + value2`.
#[must_use]
pub fn score_reward(category: &str, value1: f64, value2: f64) -> f64 {
    RewardCategory::from(category).score(value1, value2)
}
