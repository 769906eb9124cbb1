use std::{collections::BTreeSet, fmt, result};

use serde::Serialize;

use crate::{
    errors::GraphError,
    graph::Graph,
    node::{Label, NodeId},
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SafetyReport {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub dangling_edges: usize,
    pub dead_nodes: usize,
    pub unreachable_nodes: usize,
}

impl SafetyReport {
    pub fn merge(&mut self, other: &SafetyReport) {
        self.total_nodes = self.total_nodes.max(other.total_nodes);
        self.total_edges = self.total_edges.max(other.total_edges);
        self.dangling_edges += other.dangling_edges;
        self.dead_nodes += other.dead_nodes;
        self.unreachable_nodes += other.unreachable_nodes;
    }

    pub fn has_issues(&self) -> bool {
        self.dangling_edges > 0 || self.dead_nodes > 0 || self.unreachable_nodes > 0
    }
}

#[derive(Debug)]
pub struct SafetyError {
    pub report: SafetyReport,
    pub source: Option<GraphError>,
}

impl fmt::Display for SafetyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(err) => write!(f, "safety checks failed: {err}"),
            None => write!(
                f,
                "safety violations detected: dangling_edges={} dead_nodes={} unreachable_nodes={}",
                self.report.dangling_edges, self.report.dead_nodes, self.report.unreachable_nodes
            ),
        }
    }
}

impl std::error::Error for SafetyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err as &dyn std::error::Error)
    }
}

/// Counts edges whose target is not in the graph.
pub fn validate_references<V: Label>(graph: &Graph<V>) -> SafetyReport {
    let mut report = base_report(graph);
    report.dangling_edges = graph
        .nodes()
        .flat_map(|node| node.neighbors.iter())
        .filter(|&&id| !graph.contains(id))
        .count();
    report
}

/// Counts nodes still present with `live` cleared.
pub fn validate_liveness<V: Label>(graph: &Graph<V>) -> SafetyReport {
    let mut report = base_report(graph);
    report.dead_nodes = graph.nodes().filter(|node| !node.live).count();
    report
}

/// Counts nodes not reachable from `roots`.
///
/// Pass the roots the graph had before a merge: a node left behind by the
/// merge with no parent would show up as a new root and be counted here.
/// Components the graph's own roots cannot reach (pure cycles and what hangs
/// off them) are never counted. Roots no longer present are ignored.
pub fn validate_reachability<V: Label>(
    graph: &Graph<V>,
    roots: &BTreeSet<NodeId>,
) -> Result<SafetyReport, GraphError> {
    let mut report = base_report(graph);
    let from_roots = graph.reachable_from(graph.roots())?;
    let rootless = graph.ids().into_iter().filter(|id| !from_roots.contains(id));
    let anchors = roots.iter().copied().filter(|&id| graph.contains(id));
    let covered = graph.reachable_from(anchors.chain(rootless))?;
    report.unreachable_nodes = graph.len() - covered.len();
    Ok(report)
}

pub fn run_safety_checks<V: Label>(
    graph: &Graph<V>,
    roots: &BTreeSet<NodeId>,
) -> Result<SafetyReport, GraphError> {
    let mut report = SafetyReport::default();
    let references = validate_references(graph);
    report.merge(&references);
    report.merge(&validate_liveness(graph));
    // Reachability walks edges, which requires every target to exist.
    if references.dangling_edges == 0 {
        report.merge(&validate_reachability(graph, roots)?);
    }
    Ok(report)
}

pub fn run_strict_safety_checks<V: Label>(
    graph: &Graph<V>,
    roots: &BTreeSet<NodeId>,
) -> result::Result<(), SafetyError> {
    let report = run_safety_checks(graph, roots).map_err(|err| SafetyError {
        report: SafetyReport::default(),
        source: Some(err),
    })?;
    if report.has_issues() {
        Err(SafetyError {
            report,
            source: None,
        })
    } else {
        Ok(())
    }
}

fn base_report<V: Label>(graph: &Graph<V>) -> SafetyReport {
    SafetyReport {
        total_nodes: graph.len(),
        total_edges: graph.edge_count(),
        ..SafetyReport::default()
    }
}
