//! Options controlling a merge pass and how its result is printed.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which canonicalization algorithm a pass runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Bottom-up walk from every root with a value-indexed memo.
    #[default]
    Postorder,
    /// Compare every pair of nodes, then rewrite edges from a super-root.
    Pairwise,
}

/// Order in which the postorder walk visits roots.
///
/// Roots visited earlier register their nodes in the memo first, so when two
/// components hold equal subtrees the earlier root's copy is the one kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RootOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    pub strategy: MergeStrategy,
    pub root_order: RootOrder,
}

impl MergeConfig {
    pub fn postorder() -> Self {
        Self::default()
    }

    pub fn pairwise() -> Self {
        Self {
            strategy: MergeStrategy::Pairwise,
            ..Self::default()
        }
    }

    pub fn with_root_order(mut self, root_order: RootOrder) -> Self {
        self.root_order = root_order;
        self
    }
}
