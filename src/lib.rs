//! Structural sharing for labeled graphs.
//!
//! A [`Graph`] is built from id-referenced records, then canonicalized: every
//! set of value-and-shape identical subtrees collapses to one shared node and
//! whatever is no longer reachable is dropped.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod algo;
pub mod bench_utils;
pub mod builder;
pub mod config;
pub mod equality;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod merge;
pub mod node;
pub mod pairwise;
pub mod postorder;
pub mod record;
pub mod safety;

pub use crate::algo::{ReversedEdges, leaf_paths, reversed_edges, reversed_edges_from};
pub use crate::builder::GraphBuilder;
pub use crate::config::{MergeConfig, MergeStrategy, OutputFormat, RootOrder};
pub use crate::errors::GraphError;
pub use crate::graph::Graph;
pub use crate::merge::MergeReport;
pub use crate::node::{Label, Node, NodeId, SENTINEL_ID};
pub use crate::record::{NodeDescriptor, NodeRecord, parse_records};
