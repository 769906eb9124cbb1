use std::{collections::BTreeSet, fmt::Debug, hash::Hash};

pub type NodeId = i64;

/// Id of the synthetic super-root some traversals use to reach every
/// component from one entry point. Never stored in a [`crate::Graph`].
pub const SENTINEL_ID: NodeId = -1;

/// Bound for node labels: compared for equality, ordered for sibling sorting,
/// hashed for the postorder memo table.
pub trait Label: Clone + Eq + Ord + Hash + Debug {}

impl<T> Label for T where T: Clone + Eq + Ord + Hash + Debug {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<V> {
    pub id: NodeId,
    pub value: V,
    pub neighbors: BTreeSet<NodeId>,
    /// Cleared when the node is superseded by a merge; dead nodes are removed
    /// at the end of the pass.
    pub live: bool,
}

impl<V> Node<V> {
    pub fn new(id: NodeId, value: V) -> Self {
        Self {
            id,
            value,
            neighbors: BTreeSet::new(),
            live: true,
        }
    }

    pub fn add_neighbor(&mut self, id: NodeId) -> bool {
        self.neighbors.insert(id)
    }

    /// Replaces the edge `self -> from` with `self -> to`.
    pub fn redirect(&mut self, from: NodeId, to: NodeId) {
        self.neighbors.remove(&from);
        self.neighbors.insert(to);
    }
}
