use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{node::NodeId, record::NodeRecord};

/// Synthetic input for benches and tests: a list of records ready for
/// [`crate::GraphBuilder`].
#[derive(Clone, Debug)]
pub struct RecordDataset {
    pub records: Vec<NodeRecord<String>>,
}

impl RecordDataset {
    pub fn nodes(&self) -> usize {
        self.records.len()
    }

    pub fn edges(&self) -> usize {
        self.records.iter().map(|record| record.children.len()).sum()
    }
}

#[derive(Clone, Debug)]
pub enum DatasetShape {
    /// A single chain, every node labeled differently.
    Line,
    /// One hub whose leaves share `labels` distinct values.
    Star { labels: usize },
    /// `copies` identical complete trees of the given fanout and depth.
    ReplicatedTrees {
        copies: usize,
        fanout: usize,
        depth: usize,
    },
    /// Random forest: each node picks a parent among earlier nodes, labels
    /// drawn from a small alphabet so many subtrees collide.
    RandomForest { roots: usize, labels: usize },
}

pub fn generate_records(shape: DatasetShape, node_count: usize, seed: u64) -> RecordDataset {
    assert!(node_count > 1, "node_count must exceed 1");
    let records = match shape {
        DatasetShape::Line => line_records(node_count),
        DatasetShape::Star { labels } => star_records(node_count, labels),
        DatasetShape::ReplicatedTrees {
            copies,
            fanout,
            depth,
        } => replicated_tree_records(copies, fanout, depth),
        DatasetShape::RandomForest { roots, labels } => {
            random_forest_records(node_count, roots, labels, seed)
        }
    };
    RecordDataset { records }
}

fn line_records(count: usize) -> Vec<NodeRecord<String>> {
    (0..count)
        .map(|idx| {
            let children = if idx + 1 < count {
                vec![to_id(idx + 1)]
            } else {
                Vec::new()
            };
            NodeRecord::new(to_id(idx), format!("N{idx}"), children)
        })
        .collect()
}

fn star_records(count: usize, labels: usize) -> Vec<NodeRecord<String>> {
    assert!(labels > 0, "labels must be positive");
    let mut records = Vec::with_capacity(count);
    records.push(NodeRecord::new(
        to_id(0),
        "hub".to_string(),
        (1..count).map(to_id).collect(),
    ));
    for leaf in 1..count {
        records.push(NodeRecord::new(
            to_id(leaf),
            label(leaf % labels),
            Vec::new(),
        ));
    }
    records
}

fn replicated_tree_records(copies: usize, fanout: usize, depth: usize) -> Vec<NodeRecord<String>> {
    assert!(copies > 0 && fanout > 0, "copies and fanout must be positive");
    let mut records = Vec::new();
    let mut next = 0usize;
    for _ in 0..copies {
        build_tree(&mut records, &mut next, fanout, depth, 0);
    }
    records
}

fn build_tree(
    records: &mut Vec<NodeRecord<String>>,
    next: &mut usize,
    fanout: usize,
    depth: usize,
    position: usize,
) -> NodeId {
    let id = to_id(*next);
    *next += 1;
    let slot = records.len();
    records.push(NodeRecord::new(id, label(depth * fanout + position), Vec::new()));
    if depth > 0 {
        let children = (0..fanout)
            .map(|pos| build_tree(records, next, fanout, depth - 1, pos))
            .collect();
        records[slot].children = children;
    }
    id
}

fn random_forest_records(
    count: usize,
    roots: usize,
    labels: usize,
    seed: u64,
) -> Vec<NodeRecord<String>> {
    assert!(roots > 0 && roots <= count, "roots must be within 1..=node_count");
    assert!(labels > 0, "labels must be positive");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records: Vec<NodeRecord<String>> = (0..count)
        .map(|idx| NodeRecord::new(to_id(idx), label(rng.gen_range(0..labels)), Vec::new()))
        .collect();
    for idx in roots..count {
        let parent = rng.gen_range(0..idx);
        records[parent].children.push(to_id(idx));
    }
    records
}

fn label(idx: usize) -> String {
    let letter = (b'A' + (idx % 26) as u8) as char;
    if idx < 26 {
        letter.to_string()
    } else {
        format!("{letter}{}", idx / 26)
    }
}

/// Dataset ids start at 1 so none collides with the sentinel.
fn to_id(idx: usize) -> NodeId {
    idx as NodeId + 1
}
