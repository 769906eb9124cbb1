//! Exhaustive canonicalization: compare every pair of nodes, then rewrite.
//!
//! Quadratic in the number of nodes (times the cost of each subtree
//! comparison). Useful as a reference for the postorder pass, which it
//! dominates in coverage: it also merges subtrees the single-slot memo misses.

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashSet;
use tracing::{debug, trace};

use crate::{
    config::MergeStrategy,
    equality::TreeComparator,
    errors::GraphError,
    graph::Graph,
    merge::MergeReport,
    node::{Label, NodeId, SENTINEL_ID},
};

impl<V: Label> Graph<V> {
    /// Maps each node to the node that replaces it.
    ///
    /// Pairs are enumerated in ascending id order and a later match overwrites
    /// an earlier one, so within a class of equal subtrees every member points
    /// at the member with the highest id.
    pub fn find_same_subtrees(&self) -> Result<BTreeMap<NodeId, NodeId>, GraphError> {
        let ids = self.ids();
        let mut comparator = TreeComparator::new(self);
        let mut substitutions = BTreeMap::new();
        for (pos, &left) in ids.iter().enumerate() {
            for &right in &ids[pos + 1..] {
                if comparator.same(left, right)? {
                    substitutions.insert(left, right);
                }
            }
        }
        Ok(substitutions)
    }

    pub fn pairwise_merge(&mut self) -> Result<MergeReport, GraphError> {
        self.ensure_no_sentinel()?;
        let substitutions = self.find_same_subtrees()?;
        let mut report = MergeReport::start(MergeStrategy::Pairwise, self.len());
        report.substitutions = substitutions.len();
        report.rounds = 1;
        debug!(
            nodes = self.len(),
            substitutions = substitutions.len(),
            "graph.pairwise.start"
        );

        // The sentinel links to every node so each component is reachable
        // from one entry point. Only its edge set is materialized.
        let sentinel_edges: BTreeSet<NodeId> = self.ids().into_iter().collect();
        let mut stack = Vec::new();
        let sentinel_edges = self.substitute_edges(
            SENTINEL_ID,
            &sentinel_edges,
            &substitutions,
            &mut stack,
            &mut report,
        )?;

        let mut expanded = AHashSet::new();
        while let Some(id) = stack.pop() {
            if !expanded.insert(id) {
                continue;
            }
            let snapshot = self.linked(id)?.neighbors.clone();
            let rewritten =
                self.substitute_edges(id, &snapshot, &substitutions, &mut stack, &mut report)?;
            self.linked_mut(id)?.neighbors = rewritten;
        }

        self.sweep(sentinel_edges)?;
        self.clean();
        self.ensure_no_sentinel()?;

        report.nodes_after = self.len();
        report.log();
        Ok(report)
    }

    /// Rewrites one neighbor set. A substituted neighbor has its subtree
    /// marked dead before the edge moves to the replacement; any other
    /// neighbor is queued for expansion.
    fn substitute_edges(
        &mut self,
        owner: NodeId,
        neighbors: &BTreeSet<NodeId>,
        substitutions: &BTreeMap<NodeId, NodeId>,
        stack: &mut Vec<NodeId>,
        report: &mut MergeReport,
    ) -> Result<BTreeSet<NodeId>, GraphError> {
        let mut rewritten = BTreeSet::new();
        for &child in neighbors {
            match substitutions.get(&child) {
                Some(&target) => {
                    report.nodes_marked += self.mark_merged(child)?;
                    if owner != SENTINEL_ID {
                        report.edges_rewritten += 1;
                        trace!(parent = owner, from = child, to = target, "graph.pairwise.redirect");
                    }
                    rewritten.insert(target);
                }
                None => {
                    rewritten.insert(child);
                    stack.push(child);
                }
            }
        }
        Ok(rewritten)
    }
}
