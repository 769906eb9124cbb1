use thiserror::Error;

use crate::node::NodeId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {parent} references missing child {child}")]
    Reference { parent: NodeId, child: NodeId },
    #[error("duplicate node id {0}")]
    DuplicateId(NodeId),
    #[error("node id {0} is reserved")]
    ReservedId(NodeId),
    #[error("node not found: {0}")]
    NotFound(String),
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("io error: {0}")]
    Io(String),
}

impl GraphError {
    pub fn reference(parent: NodeId, child: NodeId) -> Self {
        GraphError::Reference { parent, child }
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        GraphError::NotFound(msg.into())
    }

    pub fn invariant<T: Into<String>>(msg: T) -> Self {
        GraphError::InvariantViolation(msg.into())
    }

    pub fn parse<T: Into<String>>(msg: T) -> Self {
        GraphError::Parse(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        GraphError::Io(msg.into())
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::parse(err.to_string())
    }
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::io(err.to_string())
    }
}
