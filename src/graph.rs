use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashSet;

use crate::{
    builder::GraphBuilder,
    errors::GraphError,
    node::{Label, Node, NodeId, SENTINEL_ID},
    record::{NodeDescriptor, NodeRecord},
};

/// Arena of labeled nodes. The graph owns every [`Node`]; edges are id sets
/// pointing back into the same arena, so shared children and cycles need no
/// special ownership handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph<V> {
    nodes: BTreeMap<NodeId, Node<V>>,
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }
}

impl<V: Label> Graph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from id-referenced records. See [`GraphBuilder`].
    pub fn from_records(records: &[NodeRecord<V>]) -> Result<Self, GraphError> {
        GraphBuilder::from_records(records.iter().cloned()).build()
    }

    pub(crate) fn from_nodes(nodes: BTreeMap<NodeId, Node<V>>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.neighbors.len()).sum()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<V>> {
        self.nodes.get(&id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node<V>, GraphError> {
        self.nodes
            .get(&id)
            .ok_or_else(|| GraphError::not_found(format!("node {id}")))
    }

    pub fn value(&self, id: NodeId) -> Result<&V, GraphError> {
        self.node(id).map(|node| &node.value)
    }

    pub fn neighbors(&self, id: NodeId) -> Result<&BTreeSet<NodeId>, GraphError> {
        self.node(id).map(|node| &node.neighbors)
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node<V>> {
        self.nodes.values()
    }

    /// Ids never referenced as a child by any node.
    pub fn roots(&self) -> BTreeSet<NodeId> {
        let children: AHashSet<NodeId> = self
            .nodes
            .values()
            .flat_map(|node| node.neighbors.iter().copied())
            .collect();
        self.nodes
            .keys()
            .copied()
            .filter(|id| !children.contains(id))
            .collect()
    }

    /// Live nodes as output rows, sorted by id.
    pub fn descriptors(&self) -> Vec<NodeDescriptor<V>> {
        self.nodes
            .values()
            .filter(|node| node.live)
            .map(NodeDescriptor::from)
            .collect()
    }

    /// Every id reachable from `starts`, the starts included.
    pub fn reachable_from<I>(&self, starts: I) -> Result<BTreeSet<NodeId>, GraphError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut visited = BTreeSet::new();
        let mut stack: Vec<NodeId> = starts.into_iter().collect();
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            for &next in &self.linked(id)?.neighbors {
                if !visited.contains(&next) {
                    stack.push(next);
                }
            }
        }
        Ok(visited)
    }

    /// Removes every node whose `live` flag is cleared. Returns the number of
    /// nodes removed.
    pub fn clean(&mut self) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| node.live);
        before - self.nodes.len()
    }

    /// Lookup for ids reached through an edge: a miss means the graph lost a
    /// node it still points at.
    pub(crate) fn linked(&self, id: NodeId) -> Result<&Node<V>, GraphError> {
        self.nodes
            .get(&id)
            .ok_or_else(|| GraphError::invariant(format!("dangling edge to node {id}")))
    }

    pub(crate) fn linked_mut(&mut self, id: NodeId) -> Result<&mut Node<V>, GraphError> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| GraphError::invariant(format!("dangling edge to node {id}")))
    }

    /// Clears `live` on `id` and everything reachable from it. Returns how many
    /// nodes flipped from live to dead.
    pub(crate) fn mark_merged(&mut self, id: NodeId) -> Result<usize, GraphError> {
        let mut marked = 0;
        let mut visited = AHashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let node = self.linked_mut(current)?;
            if node.live {
                node.live = false;
                marked += 1;
            }
            stack.extend(node.neighbors.iter().copied());
        }
        Ok(marked)
    }

    /// Recomputes liveness: a node is live exactly when it is reachable from
    /// one of `anchors`.
    pub(crate) fn sweep<I>(&mut self, anchors: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let reachable = self.reachable_from(anchors)?;
        for (id, node) in self.nodes.iter_mut() {
            node.live = reachable.contains(id);
        }
        Ok(())
    }

    pub(crate) fn ensure_no_sentinel(&self) -> Result<(), GraphError> {
        if self.nodes.contains_key(&SENTINEL_ID) {
            return Err(GraphError::invariant(format!(
                "sentinel id {SENTINEL_ID} present in graph"
            )));
        }
        Ok(())
    }
}
