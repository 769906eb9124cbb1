use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashSet;

use crate::{
    errors::GraphError,
    graph::Graph,
    node::{Label, NodeId},
};

/// Child id -> ids of its parents.
pub type ReversedEdges = BTreeMap<NodeId, BTreeSet<NodeId>>;

/// One value sequence per root-to-leaf path, in neighbor order.
///
/// An edge back onto the current path is not followed; a node whose only
/// edges lead back onto the path ends that path.
pub fn leaf_paths<V: Label>(graph: &Graph<V>, root: NodeId) -> Result<Vec<Vec<V>>, GraphError> {
    graph.node(root)?;
    let mut paths = Vec::new();
    let mut path = Vec::new();
    collect_leaf_paths(graph, root, &mut path, &mut paths)?;
    Ok(paths)
}

fn collect_leaf_paths<V: Label>(
    graph: &Graph<V>,
    id: NodeId,
    path: &mut Vec<NodeId>,
    paths: &mut Vec<Vec<V>>,
) -> Result<(), GraphError> {
    path.push(id);
    let forward: Vec<NodeId> = graph
        .linked(id)?
        .neighbors
        .iter()
        .copied()
        .filter(|next| !path.contains(next))
        .collect();
    if forward.is_empty() {
        let values = path
            .iter()
            .map(|&step| graph.linked(step).map(|node| node.value.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        paths.push(values);
    } else {
        for next in forward {
            collect_leaf_paths(graph, next, path, paths)?;
        }
    }
    path.pop();
    Ok(())
}

/// Inverted adjacency over the nodes reachable from `root`.
pub fn reversed_edges_from<V: Label>(
    graph: &Graph<V>,
    root: NodeId,
) -> Result<ReversedEdges, GraphError> {
    graph.node(root)?;
    reverse_from(graph, [root])
}

/// Inverted adjacency over the whole graph. The walk enters through a
/// sentinel linked to every node, so components without a root are covered
/// too; the sentinel itself never shows up as a parent.
pub fn reversed_edges<V: Label>(graph: &Graph<V>) -> Result<ReversedEdges, GraphError> {
    reverse_from(graph, graph.ids())
}

fn reverse_from<V, I>(graph: &Graph<V>, entries: I) -> Result<ReversedEdges, GraphError>
where
    V: Label,
    I: IntoIterator<Item = NodeId>,
{
    let mut reversed = ReversedEdges::new();
    let mut covered = AHashSet::new();
    let mut stack: Vec<NodeId> = entries.into_iter().collect();
    while let Some(id) = stack.pop() {
        if !covered.insert(id) {
            continue;
        }
        reversed.entry(id).or_default();
        for &next in &graph.linked(id)?.neighbors {
            reversed.entry(next).or_default().insert(id);
            if !covered.contains(&next) {
                stack.push(next);
            }
        }
    }
    Ok(reversed)
}
