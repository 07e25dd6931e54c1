//! Arena-based search tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references. Parent links
//! are plain indices, so walking up for backpropagation never borrows the
//! parent mutably while a child is held.

use super::node::{NodeId, SearchNode};
use crate::core::{CombatState, Move};

/// Arena-based search tree.
#[derive(Clone, Debug)]
pub struct SearchTree {
    /// All nodes in the tree.
    nodes: Vec<SearchNode>,

    /// The root node ID (always 0).
    root: NodeId,
}

impl SearchTree {
    /// Create a new tree rooted at a copy of `state`.
    pub fn new(state: CombatState) -> Self {
        Self::with_capacity(state, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(state: CombatState, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SearchNode::root(state));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Attach a new child under `parent`, returning its ID.
    pub fn add_child(&mut self, parent: NodeId, mv: Move, state: CombatState) -> NodeId {
        let depth = self.get(parent).depth + 1;
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new(state, parent, mv, depth));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Child of `parent` reached by `mv`, if expanded.
    #[must_use]
    pub fn child_for(&self, parent: NodeId, mv: Move) -> Option<NodeId> {
        self.get(parent)
            .children
            .iter()
            .copied()
            .find(|&c| self.get(c).mv == Some(mv))
    }

    /// Children of a node as `(id, node)` pairs in expansion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.get(id).children.iter().map(move |&c| (c, self.get(c)))
    }

    /// Record `result` on `leaf` and every ancestor up to the root.
    pub fn backpropagate(&mut self, leaf: NodeId, result: u32) {
        let mut current = leaf;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.record(result);
            current = node.parent;
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &SearchNode {
        self.get(self.root)
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let leaf_count = self.nodes.iter().filter(|n| n.children.is_empty()).count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            leaf_count,
        }
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Nodes without children.
    pub leaf_count: usize,
}

impl TreeStats {
    /// Average children per interior node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        let interior = self.node_count - self.leaf_count;
        if interior == 0 {
            0.0
        } else {
            (self.node_count - 1) as f64 / interior as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Combatant, MoveMap, MoveStats};

    fn state() -> CombatState {
        let stats = MoveMap::with_value(MoveStats::new(2, 1));
        CombatState::new(Combatant::new(10, 5, stats), Combatant::new(10, 5, stats))
    }

    #[test]
    fn test_tree_new() {
        let tree = SearchTree::new(state());

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId::new(0));
        assert!(tree.root_node().parent.is_none());
    }

    #[test]
    fn test_add_child() {
        let mut tree = SearchTree::new(state());
        let root = tree.root();

        let child = tree.add_child(root, Move::Paper, state());

        assert_eq!(child, NodeId::new(1));
        assert_eq!(tree.get(child).parent, root);
        assert_eq!(tree.get(child).depth, 1);
        assert_eq!(tree.get(child).mv, Some(Move::Paper));
        assert_eq!(tree.child_for(root, Move::Paper), Some(child));
        assert_eq!(tree.child_for(root, Move::Rock), None);
    }

    #[test]
    fn test_backpropagate_reaches_root() {
        let mut tree = SearchTree::new(state());
        let root = tree.root();
        let a = tree.add_child(root, Move::Rock, state());
        let b = tree.add_child(a, Move::Scissor, state());
        let other = tree.add_child(root, Move::Paper, state());

        tree.backpropagate(b, 1);
        tree.backpropagate(a, 0);

        assert_eq!((tree.get(b).visits, tree.get(b).wins), (1, 1));
        assert_eq!((tree.get(a).visits, tree.get(a).wins), (2, 1));
        assert_eq!((tree.get(root).visits, tree.get(root).wins), (2, 1));
        assert_eq!(tree.get(other).visits, 0);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = SearchTree::new(state());
        let root = tree.root();
        let a = tree.add_child(root, Move::Rock, state());
        tree.add_child(root, Move::Paper, state());
        tree.add_child(a, Move::Rock, state());

        let stats = tree.stats();

        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.leaf_count, 2);
        assert_eq!(stats.branching_factor(), 1.5);
    }

    #[test]
    fn test_tree_iter() {
        let mut tree = SearchTree::new(state());
        tree.add_child(tree.root(), Move::Scissor, state());

        let nodes: Vec<_> = tree.iter().collect();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].0, NodeId::new(0));
        assert_eq!(nodes[1].0, NodeId::new(1));
    }
}
