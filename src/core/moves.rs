//! The three combat moves and per-move tables.
//!
//! ## Move
//!
//! Moves form a closed beats-cycle: Rock beats Scissor, Scissor beats Paper,
//! Paper beats Rock. `Move::ALL` fixes the enumeration order used everywhere
//! (availability, expansion order, tie-breaking).
//!
//! ## MoveMap
//!
//! Fixed-size per-move storage indexable by `Move`. Serializes as
//! `{"rock": .., "paper": .., "scissor": ..}`, the shape game payloads use.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use thiserror::Error;

/// One of the three combat moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissor,
}

impl Move {
    /// All moves in stable enumeration order.
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissor];

    /// Move returned when no search statistics are available.
    pub const DEFAULT: Move = Move::Rock;

    /// Position in `Move::ALL`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Move::Rock => 0,
            Move::Paper => 1,
            Move::Scissor => 2,
        }
    }

    /// The move this one defeats.
    #[must_use]
    pub const fn beats(self) -> Move {
        match self {
            Move::Rock => Move::Scissor,
            Move::Scissor => Move::Paper,
            Move::Paper => Move::Rock,
        }
    }

    /// The unique move that defeats this one.
    #[must_use]
    pub const fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissor,
            Move::Scissor => Move::Rock,
        }
    }

    /// Wire label (`"rock"`, `"paper"`, `"scissor"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissor => "scissor",
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown move label.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown move label: {0:?}")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissor" | "scissors" => Ok(Move::Scissor),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

/// Per-move storage with O(1) access by `Move`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveMap<T> {
    pub rock: T,
    pub paper: T,
    pub scissor: T,
}

impl<T> MoveMap<T> {
    /// Build a map by calling `f` for every move.
    pub fn new(mut f: impl FnMut(Move) -> T) -> Self {
        Self {
            rock: f(Move::Rock),
            paper: f(Move::Paper),
            scissor: f(Move::Scissor),
        }
    }

    /// Iterate `(move, value)` pairs in `Move::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Move, &T)> {
        Move::ALL.into_iter().map(move |m| (m, &self[m]))
    }

    /// Transform every value.
    pub fn map<U>(&self, mut f: impl FnMut(Move, &T) -> U) -> MoveMap<U> {
        MoveMap::new(|m| f(m, &self[m]))
    }
}

impl<T: Clone> MoveMap<T> {
    /// Create a map with every entry set to `value`.
    pub fn with_value(value: T) -> Self {
        Self {
            rock: value.clone(),
            paper: value.clone(),
            scissor: value,
        }
    }
}

impl<T> Index<Move> for MoveMap<T> {
    type Output = T;

    #[inline]
    fn index(&self, mv: Move) -> &T {
        match mv {
            Move::Rock => &self.rock,
            Move::Paper => &self.paper,
            Move::Scissor => &self.scissor,
        }
    }
}

impl<T> IndexMut<Move> for MoveMap<T> {
    #[inline]
    fn index_mut(&mut self, mv: Move) -> &mut T {
        match mv {
            Move::Rock => &mut self.rock,
            Move::Paper => &mut self.paper,
            Move::Scissor => &mut self.scissor,
        }
    }
}
