//! Per-move charge counts.
//!
//! Playing a move consumes one of its charges and refills every other move
//! by one, capped at `MAX_CHARGE`. A move with zero charges cannot be played.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::moves::{Move, MoveMap};

/// Maximum charges a single move can hold.
pub const MAX_CHARGE: u8 = 3;

/// Moves currently playable, in `Move::ALL` order.
pub type MoveList = SmallVec<[Move; 3]>;

/// Charge counts for one combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargeSet(pub MoveMap<u8>);

impl Default for ChargeSet {
    fn default() -> Self {
        Self::full()
    }
}

impl ChargeSet {
    /// Every move at `MAX_CHARGE`.
    #[must_use]
    pub fn full() -> Self {
        Self(MoveMap::with_value(MAX_CHARGE))
    }

    /// Build from explicit counts in rock, paper, scissor order.
    #[must_use]
    pub fn new(rock: u8, paper: u8, scissor: u8) -> Self {
        Self(MoveMap { rock, paper, scissor })
    }

    /// Charges remaining for a move.
    #[inline]
    #[must_use]
    pub fn get(&self, mv: Move) -> u8 {
        self.0[mv]
    }

    /// Whether the move can be played.
    #[inline]
    #[must_use]
    pub fn is_available(&self, mv: Move) -> bool {
        self.0[mv] > 0
    }

    /// Playable moves in stable order.
    #[must_use]
    pub fn available(&self) -> MoveList {
        Move::ALL.into_iter().filter(|&m| self.is_available(m)).collect()
    }

    /// Number of playable moves.
    #[must_use]
    pub fn available_count(&self) -> usize {
        Move::ALL.iter().filter(|&&m| self.is_available(m)).count()
    }

    /// Whether every count lies in `[0, MAX_CHARGE]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|(_, &c)| c <= MAX_CHARGE)
    }

    /// Rotate charges after playing `mv`.
    pub fn spend(&mut self, mv: Move) {
        debug_assert!(self.is_available(mv), "spent {mv} with no charges");

        for m in Move::ALL {
            let charge = &mut self.0[m];
            if m == mv {
                *charge = charge.saturating_sub(1);
            } else {
                *charge = (*charge + 1).min(MAX_CHARGE);
            }
        }
    }

    /// Copy of this set after playing `mv`.
    #[must_use]
    pub fn after(mut self, mv: Move) -> Self {
        self.spend(mv);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_from_ones() {
        let charges = ChargeSet::new(1, 1, 1).after(Move::Rock);
        assert_eq!(charges, ChargeSet::new(0, 2, 2));
    }

    #[test]
    fn test_spend_caps_at_max() {
        let charges = ChargeSet::full().after(Move::Rock);
        assert_eq!(charges, ChargeSet::new(2, 3, 3));
    }

    #[test]
    fn test_available_order() {
        let charges = ChargeSet::new(0, 2, 1);
        assert_eq!(charges.available().as_slice(), &[Move::Paper, Move::Scissor]);
        assert_eq!(charges.available_count(), 2);
        assert!(!charges.is_available(Move::Rock));
    }

    #[test]
    fn test_depleted_set_has_no_moves() {
        let charges = ChargeSet::new(0, 0, 0);
        assert!(charges.available().is_empty());
    }

    #[test]
    fn test_validity() {
        assert!(ChargeSet::full().is_valid());
        assert!(!ChargeSet::new(4, 0, 0).is_valid());
    }

    #[test]
    fn test_serialization() {
        let json = r#"{"rock":3,"paper":1,"scissor":0}"#;
        let charges: ChargeSet = serde_json::from_str(json).unwrap();
        assert_eq!(charges, ChargeSet::new(3, 1, 0));
    }
}
