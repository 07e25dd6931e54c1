//! Per-move damage and shield stats.

use serde::{Deserialize, Serialize};

use super::moves::{Move, MoveMap};

/// What a move does when it wins or ties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveStats {
    /// Damage dealt to the other combatant.
    pub damage: i32,
    /// Shield gained by the user.
    pub shield: i32,
}

impl MoveStats {
    #[must_use]
    pub const fn new(damage: i32, shield: i32) -> Self {
        Self { damage, shield }
    }
}

/// A combatant's stats for every move.
pub type CombatantStats = MoveMap<MoveStats>;

impl MoveMap<MoveStats> {
    /// Highest damage among all moves.
    #[must_use]
    pub fn max_damage(&self) -> i32 {
        self.iter().map(|(_, s)| s.damage).max().unwrap_or(0)
    }

    /// Highest shield grant among all moves.
    #[must_use]
    pub fn max_shield(&self) -> i32 {
        self.iter().map(|(_, s)| s.shield).max().unwrap_or(0)
    }

    /// Highest-damage move among `moves`; the first one wins ties.
    #[must_use]
    pub fn strongest_of(&self, moves: &[Move]) -> Option<(Move, i32)> {
        let mut best: Option<(Move, i32)> = None;
        for &mv in moves {
            let damage = self[mv].damage;
            if best.map_or(true, |(_, d)| damage > d) {
                best = Some((mv, damage));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> CombatantStats {
        MoveMap {
            rock: MoveStats::new(4, 0),
            paper: MoveStats::new(0, 4),
            scissor: MoveStats::new(4, 2),
        }
    }

    #[test]
    fn test_maxima() {
        assert_eq!(stats().max_damage(), 4);
        assert_eq!(stats().max_shield(), 4);
    }

    #[test]
    fn test_strongest_prefers_first_on_tie() {
        let s = stats();
        assert_eq!(s.strongest_of(&Move::ALL), Some((Move::Rock, 4)));
        assert_eq!(s.strongest_of(&[Move::Paper, Move::Scissor]), Some((Move::Scissor, 4)));
        assert_eq!(s.strongest_of(&[]), None);
    }
}
