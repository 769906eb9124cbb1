//! Structural equality between subtrees.
//!
//! Two nodes are the same tree when their values match and their children can
//! be paired one-to-one with structurally equal partners, regardless of child
//! order. A node is always the same tree as itself.

use ahash::AHashSet;

use crate::{
    errors::GraphError,
    graph::Graph,
    node::{Label, NodeId},
};

impl<V: Label> Graph<V> {
    pub fn is_same_tree(&self, a: NodeId, b: NodeId) -> Result<bool, GraphError> {
        self.node(a)?;
        self.node(b)?;
        TreeComparator::new(self).same(a, b)
    }
}

/// Recursive comparison state. `assumed` holds the pairs currently being
/// compared further up the recursion; meeting one again means the walk went
/// round a cycle, and the pair is taken as equal.
pub(crate) struct TreeComparator<'g, V> {
    graph: &'g Graph<V>,
    assumed: AHashSet<(NodeId, NodeId)>,
}

impl<'g, V: Label> TreeComparator<'g, V> {
    pub(crate) fn new(graph: &'g Graph<V>) -> Self {
        Self {
            graph,
            assumed: AHashSet::new(),
        }
    }

    pub(crate) fn same(&mut self, a: NodeId, b: NodeId) -> Result<bool, GraphError> {
        if a == b {
            return Ok(true);
        }
        let key = (a.min(b), a.max(b));
        if self.assumed.contains(&key) {
            return Ok(true);
        }

        let left = self.graph.linked(a)?;
        let right = self.graph.linked(b)?;
        if left.value != right.value || left.neighbors.len() != right.neighbors.len() {
            return Ok(false);
        }

        let left_children = self.sorted_children(a)?;
        let right_children = self.sorted_children(b)?;
        let values_match = left_children
            .iter()
            .zip(&right_children)
            .all(|((lv, _), (rv, _))| lv == rv);
        if !values_match {
            return Ok(false);
        }

        self.assumed.insert(key);
        let result = self.match_children(&left_children, &right_children);
        self.assumed.remove(&key);
        result
    }

    /// Children of `id` sorted by value. Neighbors iterate in id order and the
    /// sort is stable, so equal values keep a deterministic order.
    fn sorted_children(&self, id: NodeId) -> Result<Vec<(&'g V, NodeId)>, GraphError> {
        let graph = self.graph;
        let mut children = Vec::new();
        for &child in &graph.linked(id)?.neighbors {
            children.push((&graph.linked(child)?.value, child));
        }
        children.sort_by(|a, b| a.0.cmp(b.0));
        Ok(children)
    }

    /// Walks both sorted lists run by run, where a run is a stretch of
    /// siblings sharing one value.
    fn match_children(
        &mut self,
        left: &[(&'g V, NodeId)],
        right: &[(&'g V, NodeId)],
    ) -> Result<bool, GraphError> {
        let mut start = 0;
        while start < left.len() {
            let value = left[start].0;
            let end = left[start..]
                .iter()
                .position(|(v, _)| *v != value)
                .map_or(left.len(), |offset| start + offset);
            let left_run: Vec<NodeId> = left[start..end].iter().map(|(_, id)| *id).collect();
            let right_run: Vec<NodeId> = right[start..end].iter().map(|(_, id)| *id).collect();
            if !self.match_run(&left_run, &right_run)? {
                return Ok(false);
            }
            start = end;
        }
        Ok(true)
    }

    /// Pairs every node of `left` with a distinct equal node of `right`.
    /// Structural equality partitions a run into classes, so taking the first
    /// free partner never blocks a later match.
    fn match_run(&mut self, left: &[NodeId], right: &[NodeId]) -> Result<bool, GraphError> {
        if let ([l], [r]) = (left, right) {
            return self.same(*l, *r);
        }
        let mut used = vec![false; right.len()];
        for &l in left {
            let mut matched = false;
            for (idx, &r) in right.iter().enumerate() {
                if used[idx] {
                    continue;
                }
                if self.same(l, r)? {
                    used[idx] = true;
                    matched = true;
                    break;
                }
            }
            if !matched {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
