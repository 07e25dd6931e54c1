//! Core combat types: moves, charges, stats, state, RNG.
//!
//! Everything here is plain data with value semantics. Rules that move a
//! state forward live in `rules`.

pub mod charges;
pub mod moves;
pub mod rng;
pub mod state;
pub mod stats;

pub use charges::{ChargeSet, MoveList, MAX_CHARGE};
pub use moves::{Move, MoveMap, ParseMoveError};
pub use rng::GameRng;
pub use state::{CombatSnapshot, CombatState, Combatant, Side, StateError};
pub use stats::{CombatantStats, MoveStats};
