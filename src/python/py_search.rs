//! Search bindings for Python.

use pyo3::prelude::*;

use crate::core::{CombatSnapshot, CombatState};
use crate::mcts::{Decision, MCTSSearch, SearchConfig};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e))
}

/// Parse a flat combat snapshot from JSON and validate it.
pub(crate) fn parse_state(snapshot_json: &str) -> PyResult<CombatState> {
    let snapshot: CombatSnapshot = serde_json::from_str(snapshot_json).map_err(value_error)?;
    CombatState::try_from(snapshot).map_err(value_error)
}

/// Python wrapper for SearchConfig.
#[pyclass(name = "SearchConfig")]
#[derive(Clone)]
pub struct PySearchConfig(pub SearchConfig);

#[pymethods]
impl PySearchConfig {
    /// Create a new search configuration.
    ///
    /// # Arguments
    /// - exploration_weight: UCB exploration constant (default: 1.4)
    /// - max_rounds: Round cap before the health-ratio tiebreak (default: 50)
    /// - iterations: Default iteration budget (default: 25000)
    /// - seed: Seed for reproducible searches (default: None, from entropy)
    #[new]
    #[pyo3(signature = (
        exploration_weight = 1.4,
        max_rounds = 50,
        iterations = 25000,
        seed = None
    ))]
    fn new(exploration_weight: f64, max_rounds: u32, iterations: u32, seed: Option<u64>) -> Self {
        let mut config = SearchConfig::default()
            .with_exploration(exploration_weight)
            .with_max_rounds(max_rounds)
            .with_iterations(iterations);
        config.seed = seed;
        Self(config)
    }

    #[getter]
    fn exploration_weight(&self) -> f64 {
        self.0.exploration_weight
    }

    #[getter]
    fn max_rounds(&self) -> u32 {
        self.0.max_rounds
    }

    #[getter]
    fn iterations(&self) -> u32 {
        self.0.iterations
    }

    #[getter]
    fn seed(&self) -> Option<u64> {
        self.0.seed
    }

    /// Run a search on a JSON snapshot and return the full decision.
    #[pyo3(signature = (snapshot_json, iterations = None))]
    fn decide(&self, snapshot_json: &str, iterations: Option<u32>) -> PyResult<PyDecision> {
        let state = parse_state(snapshot_json)?;
        let iterations = iterations.unwrap_or(self.0.iterations);
        MCTSSearch::new(self.0.clone())
            .decide(&state, iterations)
            .map(PyDecision)
            .map_err(value_error)
    }

    fn __repr__(&self) -> String {
        format!(
            "SearchConfig(c={}, max_rounds={}, iterations={}, seed={:?})",
            self.0.exploration_weight, self.0.max_rounds, self.0.iterations, self.0.seed
        )
    }
}

/// Python wrapper for a search decision.
#[pyclass(name = "Decision")]
#[derive(Clone)]
pub struct PyDecision(pub Decision);

#[pymethods]
impl PyDecision {
    /// Chosen move (`"rock"`, `"paper"` or `"scissor"`).
    #[getter]
    fn mv(&self) -> &'static str {
        self.0.mv.label()
    }

    /// `"Lethal"`, `"Scored"` or `"Fallback"`.
    #[getter]
    fn reason(&self) -> String {
        format!("{:?}", self.0.reason)
    }

    /// Candidate breakdown as `(move, visits, win_rate, score)` tuples.
    fn candidates(&self) -> Vec<(&'static str, u32, f64, f64)> {
        self.0
            .candidates
            .iter()
            .map(|c| (c.mv.label(), c.visits, c.win_rate, c.score))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!("Decision(mv={}, reason={:?})", self.0.mv, self.0.reason)
    }
}

/// Best move for a JSON combat snapshot.
///
/// Raises ValueError if the snapshot is malformed or invalid.
#[pyfunction]
#[pyo3(signature = (snapshot_json, iterations = 25000, seed = None))]
pub fn best_move(snapshot_json: &str, iterations: u32, seed: Option<u64>) -> PyResult<&'static str> {
    let state = parse_state(snapshot_json)?;
    let mut config = SearchConfig::default();
    config.seed = seed;
    let mv = MCTSSearch::new(config)
        .search(&state, iterations)
        .map_err(value_error)?;
    Ok(mv.label())
}
