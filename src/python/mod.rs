//! Python bindings for the dungeon combat engine.
//!
//! # Quick Start
//!
//! ```python
//! import json
//! import dungeon_mcts as dm
//!
//! snapshot = json.dumps(state)  # flat combat payload from the game API
//! move = dm.best_move(snapshot, iterations=10000, seed=42)
//!
//! config = dm.SearchConfig(exploration_weight=1.4, seed=7)
//! decision = config.decide(snapshot)
//! print(decision.mv, decision.reason, decision.candidates())
//!
//! dm.score_reward("UpgradeRock", 2, 1)  # 8.0
//! ```

use pyo3::prelude::*;

mod py_loot;
mod py_search;

pub use py_loot::*;
pub use py_search::*;

/// dungeon_mcts: combat move search and loot scoring.
#[pymodule]
fn dungeon_mcts(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Search
    m.add_class::<PySearchConfig>()?;
    m.add_class::<PyDecision>()?;
    m.add_function(wrap_pyfunction!(best_move, m)?)?;

    // Loot
    m.add_function(wrap_pyfunction!(score_reward, m)?)?;
    m.add_function(wrap_pyfunction!(describe_reward, m)?)?;
    m.add_function(wrap_pyfunction!(select_loot, m)?)?;

    Ok(())
}
