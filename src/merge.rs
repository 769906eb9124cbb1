use serde::Serialize;
use tracing::info;

use crate::{
    config::{MergeConfig, MergeStrategy},
    errors::GraphError,
    graph::Graph,
    node::Label,
};

/// Counters describing one merge pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub strategy: MergeStrategy,
    pub nodes_before: usize,
    pub nodes_after: usize,
    /// Parent edges redirected to a canonical node.
    pub edges_rewritten: usize,
    /// Nodes flagged dead by the subtree marking, before the liveness sweep.
    pub nodes_marked: usize,
    /// Pairwise only: size of the substitution map.
    pub substitutions: usize,
    /// Walks over the graph. Postorder repeats until a walk is a no-op.
    pub rounds: usize,
}

impl MergeReport {
    pub(crate) fn start(strategy: MergeStrategy, nodes_before: usize) -> Self {
        Self {
            strategy,
            nodes_before,
            ..Self::default()
        }
    }

    pub fn removed(&self) -> usize {
        self.nodes_before.saturating_sub(self.nodes_after)
    }

    pub fn changed(&self) -> bool {
        self.edges_rewritten > 0 || self.removed() > 0
    }

    pub(crate) fn log(&self) {
        info!(
            strategy = ?self.strategy,
            nodes_before = self.nodes_before,
            nodes_after = self.nodes_after,
            edges_rewritten = self.edges_rewritten,
            nodes_marked = self.nodes_marked,
            substitutions = self.substitutions,
            rounds = self.rounds,
            "graph.merge.completed"
        );
    }
}

impl<V: Label> Graph<V> {
    /// Runs the merge strategy selected by `config`.
    pub fn canonicalize(&mut self, config: &MergeConfig) -> Result<MergeReport, GraphError> {
        match config.strategy {
            MergeStrategy::Postorder => self.postorder_merge_with(config.root_order),
            MergeStrategy::Pairwise => self.pairwise_merge(),
        }
    }
}
