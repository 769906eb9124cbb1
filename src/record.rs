use serde::{Deserialize, Serialize};

use crate::{
    errors::GraphError,
    node::{Node, NodeId, SENTINEL_ID},
};

/// One input record: a labeled node and the ids of its children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NodeRecord<V> {
    pub id: NodeId,
    pub value: V,
    pub children: Vec<NodeId>,
}

impl<V> NodeRecord<V> {
    pub fn new(id: NodeId, value: V, children: Vec<NodeId>) -> Self {
        Self {
            id,
            value,
            children,
        }
    }
}

/// One output row: a surviving node with its (ascending) neighbor ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeDescriptor<V> {
    pub id: NodeId,
    pub value: V,
    pub neighbors: Vec<NodeId>,
}

impl<V: Clone> From<&Node<V>> for NodeDescriptor<V> {
    fn from(node: &Node<V>) -> Self {
        Self {
            id: node.id,
            value: node.value.clone(),
            neighbors: node.neighbors.iter().copied().collect(),
        }
    }
}

impl<V: std::fmt::Display> NodeDescriptor<V> {
    pub fn to_line(&self) -> String {
        let neighbors = self
            .neighbors
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}:{} -> [{neighbors}]", self.id, self.value)
    }
}

pub fn validate_record<V>(record: &NodeRecord<V>) -> Result<(), GraphError> {
    if record.id == SENTINEL_ID {
        return Err(GraphError::ReservedId(record.id));
    }
    Ok(())
}

/// Parses a JSON array of `{id, value, children}` records with string labels.
pub fn parse_records(input: &str) -> Result<Vec<NodeRecord<String>>, GraphError> {
    let records: Vec<NodeRecord<String>> = serde_json::from_str(input)?;
    Ok(records)
}

pub fn descriptors_to_json<V: Serialize>(
    descriptors: &[NodeDescriptor<V>],
) -> Result<String, GraphError> {
    serde_json::to_string_pretty(descriptors).map_err(GraphError::from)
}
