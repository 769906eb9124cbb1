use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    errors::GraphError,
    graph::Graph,
    node::{Label, Node, NodeId},
    record::{NodeRecord, validate_record},
};

/// Collects records and links them into a [`Graph`].
///
/// Construction runs in two passes: every node is created first with no
/// edges, then the children lists are resolved. Child ids may therefore point
/// at records that appear later in the input, or back at an ancestor.
#[derive(Clone, Debug)]
pub struct GraphBuilder<V> {
    records: Vec<NodeRecord<V>>,
}

impl<V> Default for GraphBuilder<V> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<V: Label> GraphBuilder<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = NodeRecord<V>>,
    {
        Self {
            records: records.into_iter().collect(),
        }
    }

    pub fn record(mut self, id: NodeId, value: V, children: Vec<NodeId>) -> Self {
        self.records.push(NodeRecord::new(id, value, children));
        self
    }

    pub fn push(&mut self, record: NodeRecord<V>) {
        self.records.push(record);
    }

    pub fn build(self) -> Result<Graph<V>, GraphError> {
        let mut nodes = BTreeMap::new();
        for record in &self.records {
            validate_record(record)?;
            if nodes
                .insert(record.id, Node::new(record.id, record.value.clone()))
                .is_some()
            {
                return Err(GraphError::DuplicateId(record.id));
            }
        }

        let mut edges = 0usize;
        for record in &self.records {
            for &child in &record.children {
                if !nodes.contains_key(&child) {
                    return Err(GraphError::reference(record.id, child));
                }
                if let Some(node) = nodes.get_mut(&record.id) {
                    if node.add_neighbor(child) {
                        edges += 1;
                    }
                }
            }
        }

        let graph = Graph::from_nodes(nodes);
        debug!(
            nodes = graph.len(),
            edges,
            roots = graph.roots().len(),
            "graph.build.completed"
        );
        Ok(graph)
    }
}
