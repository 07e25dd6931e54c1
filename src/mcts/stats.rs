//! Counters gathered while a search runs.

use serde::{Deserialize, Serialize};

/// Per-search counters, reset at the start of every `decide`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub iterations: u32,
    /// Children added to the tree.
    pub nodes_expanded: u32,
    /// Playouts run, one per iteration.
    pub simulations: u32,
    /// Playouts that started from an already finished combat.
    pub terminal_hits: u32,
    /// Deepest node created, in player moves from the root.
    pub max_depth: u16,
    pub time_us: u64,
}

impl SearchStats {
    pub(crate) fn record_expansion(&mut self, depth: u16) {
        self.nodes_expanded += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    pub(crate) fn record_playout(&mut self, from_terminal: bool) {
        self.simulations += 1;
        if from_terminal {
            self.terminal_hits += 1;
        }
    }

    /// Share of iterations that grew the tree.
    ///
    /// Drops towards zero once the reachable rounds are exhausted.
    #[must_use]
    pub fn expansion_rate(&self) -> f64 {
        ratio(self.nodes_expanded, self.iterations)
    }

    /// Share of playouts that had nothing left to simulate.
    #[must_use]
    pub fn terminal_rate(&self) -> f64 {
        ratio(self.terminal_hits, self.simulations)
    }
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole)
    }
}
