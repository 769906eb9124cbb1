//! Bottom-up canonicalization.
//!
//! A round walks every root depth-first. Children are canonicalized before their
//! parent, so by the time a parent is examined its neighbor set already names
//! canonical children; the parent is then redundant exactly when the memo
//! holds a node with the same value and the same neighbor set.
//!
//! The memo keeps a single slot per value and the latest result always
//! overwrites it. A subtree equal to an earlier node whose slot has since been
//! taken by an unequal node is therefore not merged. Rounds repeat until one
//! rewrites nothing; a round that finds nothing to merge ends the pass.

use ahash::{AHashMap, AHashSet};
use tracing::{debug, trace, warn};

use crate::{
    config::{MergeStrategy, RootOrder},
    errors::GraphError,
    graph::Graph,
    merge::MergeReport,
    node::{Label, NodeId},
};

/// State of one round: a walk from every root with a fresh memo.
struct PostorderPass<V> {
    /// Latest canonical node per value.
    seen: AHashMap<V, NodeId>,
    /// Result of every node already resolved in this round.
    resolved: AHashMap<NodeId, NodeId>,
    on_stack: AHashSet<NodeId>,
    edges_rewritten: usize,
    nodes_marked: usize,
}

impl<V: Label> PostorderPass<V> {
    fn new() -> Self {
        Self {
            seen: AHashMap::new(),
            resolved: AHashMap::new(),
            on_stack: AHashSet::new(),
            edges_rewritten: 0,
            nodes_marked: 0,
        }
    }
}

impl<V: Label> Graph<V> {
    /// Postorder merge visiting roots in ascending id order.
    pub fn postorder_merge(&mut self) -> Result<MergeReport, GraphError> {
        self.postorder_merge_with(RootOrder::Ascending)
    }

    /// Runs postorder rounds until one rewrites no edge.
    ///
    /// A redirect can turn a root into a shared child or reorder a neighbor
    /// set, which changes what the next walk meets first. Repeating until a
    /// round is a no-op leaves a graph that another call does not touch.
    /// Acyclic input needs at most one round per removed node plus one.
    pub fn postorder_merge_with(&mut self, order: RootOrder) -> Result<MergeReport, GraphError> {
        let mut report = MergeReport::start(MergeStrategy::Postorder, self.len());
        let limit = self.len() + 1;
        loop {
            report.rounds += 1;
            let pass = self.postorder_round(order)?;
            report.edges_rewritten += pass.edges_rewritten;
            report.nodes_marked += pass.nodes_marked;
            debug!(
                round = report.rounds,
                edges_rewritten = pass.edges_rewritten,
                nodes = self.len(),
                "graph.postorder.round"
            );
            if pass.edges_rewritten == 0 {
                break;
            }
            if report.rounds >= limit {
                warn!(rounds = report.rounds, "graph.postorder.round_limit");
                break;
            }
        }

        report.nodes_after = self.len();
        report.log();
        Ok(report)
    }

    fn postorder_round(&mut self, order: RootOrder) -> Result<PostorderPass<V>, GraphError> {
        let mut pass = PostorderPass::new();
        let mut roots: Vec<NodeId> = self.roots().into_iter().collect();
        if order == RootOrder::Descending {
            roots.reverse();
        }

        for &root in &roots {
            self.resolve(root, &mut pass)?;
        }

        // Components with no root (pure cycles) are never walked; they anchor
        // the sweep so they survive untouched.
        let unvisited: Vec<NodeId> = self
            .ids()
            .into_iter()
            .filter(|id| !pass.resolved.contains_key(id))
            .collect();
        self.sweep(roots.iter().copied().chain(unvisited))?;
        self.clean();
        Ok(pass)
    }

    fn resolve(&mut self, id: NodeId, pass: &mut PostorderPass<V>) -> Result<NodeId, GraphError> {
        if let Some(&result) = pass.resolved.get(&id) {
            return Ok(result);
        }
        if !pass.on_stack.insert(id) {
            // back edge
            return Ok(id);
        }

        let snapshot: Vec<NodeId> = self.linked(id)?.neighbors.iter().copied().collect();
        for child in snapshot {
            let resolved = self.resolve(child, pass)?;
            if resolved == child {
                continue;
            }
            self.linked_mut(id)?.redirect(child, resolved);
            pass.edges_rewritten += 1;
            pass.nodes_marked += self.mark_merged(child)?;
            trace!(parent = id, from = child, to = resolved, "graph.postorder.redirect");
        }
        pass.on_stack.remove(&id);

        let node = self.linked(id)?;
        let result = match pass.seen.get(&node.value) {
            Some(&candidate)
                if candidate != id && self.linked(candidate)?.neighbors == node.neighbors =>
            {
                candidate
            }
            _ => id,
        };
        pass.seen.insert(node.value.clone(), result);
        pass.resolved.insert(id, result);
        Ok(result)
    }
}
