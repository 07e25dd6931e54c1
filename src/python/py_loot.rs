//! Loot bindings for Python.

use pyo3::prelude::*;

use crate::loot::{EnemyRoster, LootEvaluator, LootOption, RewardCategory};
use crate::mcts::SearchConfig;

use super::py_search::parse_state;

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e))
}

/// Static score of a reward category at the given magnitudes.
#[pyfunction]
#[pyo3(signature = (category, value1, value2 = 0.0))]
pub fn score_reward(category: &str, value1: f64, value2: f64) -> f64 {
    crate::loot::score_reward(category, value1, value2)
}

/// Human-readable description of a reward.
#[pyfunction]
#[pyo3(signature = (category, value1, value2 = 0))]
pub fn describe_reward(category: &str, value1: i32, value2: i32) -> String {
    RewardCategory::from(category).describe(value1, value2)
}

/// Index of the loot option to take.
///
/// `options_json` is a list of `{"boonTypeString", "selectedVal1",
/// "selectedVal2"}` objects; `roster_json` is the enemy table.
#[pyfunction]
#[pyo3(signature = (options_json, snapshot_json, roster_json, floor, room, rollouts = 25, seed = None))]
pub fn select_loot(
    options_json: &str,
    snapshot_json: &str,
    roster_json: &str,
    floor: u32,
    room: u32,
    rollouts: u32,
    seed: Option<u64>,
) -> PyResult<Option<usize>> {
    let options: Vec<LootOption> = serde_json::from_str(options_json).map_err(value_error)?;
    let roster: EnemyRoster = serde_json::from_str(roster_json).map_err(value_error)?;
    let state = parse_state(snapshot_json)?;

    let mut config = SearchConfig::default();
    config.seed = seed;
    LootEvaluator::new(&config)
        .with_rollouts(rollouts)
        .select(&options, &state, &roster, floor, room)
        .map_err(value_error)
}
