//! MCTS node structures.
//!
//! Uses arena-based allocation with index references (NodeId). A node's
//! parent link is only followed during backpropagation; children are owned
//! by the arena, not by the parent.

use smallvec::SmallVec;

use crate::core::{CombatState, Move};

/// Index into the SearchTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in the search tree.
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// Combat state reached at this node. Never mutated after creation.
    pub state: CombatState,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Player move that led here from the parent (None for root).
    pub mv: Option<Move>,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Child nodes, one per explored player move, in expansion order.
    pub children: SmallVec<[NodeId; 3]>,

    /// Playouts that passed through this node.
    pub visits: u32,

    /// Playouts through this node that the player won.
    pub wins: u32,
}

impl SearchNode {
    /// Create a child node.
    pub fn new(state: CombatState, parent: NodeId, mv: Move, depth: u16) -> Self {
        Self {
            state,
            parent,
            mv: Some(mv),
            depth,
            children: SmallVec::new(),
            visits: 0,
            wins: 0,
        }
    }

    /// Create a root node.
    pub fn root(state: CombatState) -> Self {
        Self {
            state,
            parent: NodeId::NONE,
            mv: None,
            depth: 0,
            children: SmallVec::new(),
            visits: 0,
            wins: 0,
        }
    }

    /// Whether every currently playable move has a child.
    ///
    /// The bound comes from this node's own charges, so it differs between
    /// nodes.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() == self.state.player.charges.available_count()
    }

    /// Wins divided by visits, `None` when unvisited.
    #[must_use]
    pub fn win_rate(&self) -> Option<f64> {
        if self.visits == 0 {
            None
        } else {
            Some(f64::from(self.wins) / f64::from(self.visits))
        }
    }

    /// Record one playout result.
    pub fn record(&mut self, result: u32) {
        debug_assert!(result <= 1, "rollout results are binary");
        self.visits += 1;
        self.wins += result;
    }
}
