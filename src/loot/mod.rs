//! Post-encounter reward handling.
//!
//! `reward` holds the static score table; `selection` ranks offered rewards
//! by playing them out against the enemies still ahead.

pub mod reward;
pub mod selection;

pub use reward::{score_reward, RewardCategory};
pub use selection::{EnemyRoster, Encounter, LootError, LootEvaluator, LootOption};
