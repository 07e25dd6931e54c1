//! Combat rules: round resolution, availability and terminal checks.
//!
//! The search never interprets combat directly; it asks `CombatRules` for
//! the next state and whether an encounter has ended.

pub mod engine;

pub use engine::{available_moves, CombatRules, Outcome, MAX_ROUNDS};
