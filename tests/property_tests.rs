use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use sharegraph::{
    Graph, MergeConfig, NodeRecord, RootOrder, leaf_paths, safety::run_strict_safety_checks,
};

/// Records over a three-letter alphabet. With `acyclic` every edge points
/// from a lower to a higher id.
fn arb_records(max_nodes: usize, acyclic: bool) -> impl Strategy<Value = Vec<NodeRecord<String>>> {
    (1..max_nodes)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(0u8..3, n),
                prop::collection::vec((0..n, 0..n), 0..=2 * n),
            )
        })
        .prop_map(move |(labels, edges)| to_records(&labels, &edges, acyclic))
}

fn to_records(labels: &[u8], edges: &[(usize, usize)], acyclic: bool) -> Vec<NodeRecord<String>> {
    let mut records: Vec<NodeRecord<String>> = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            NodeRecord::new(idx as i64 + 1, ((b'A' + label) as char).to_string(), Vec::new())
        })
        .collect();
    for &(from, to) in edges {
        let (from, to) = if acyclic {
            if from == to {
                continue;
            }
            (from.min(to), from.max(to))
        } else {
            (from, to)
        };
        records[from].children.push(to as i64 + 1);
    }
    records
}

fn path_sets(graph: &Graph<String>) -> BTreeMap<i64, BTreeSet<Vec<String>>> {
    graph
        .roots()
        .into_iter()
        .map(|root| {
            let paths = leaf_paths(graph, root).unwrap().into_iter().collect();
            (root, paths)
        })
        .collect()
}

fn merge_configs() -> [MergeConfig; 3] {
    [
        MergeConfig::postorder(),
        MergeConfig::postorder().with_root_order(RootOrder::Descending),
        MergeConfig::pairwise(),
    ]
}

proptest! {
    #[test]
    fn prop_same_tree_is_reflexive(records in arb_records(12, false)) {
        let graph = Graph::from_records(&records).unwrap();
        for id in graph.ids() {
            prop_assert!(graph.is_same_tree(id, id).unwrap());
        }
    }

    #[test]
    fn prop_same_tree_is_symmetric(records in arb_records(10, true)) {
        let graph = Graph::from_records(&records).unwrap();
        let ids = graph.ids();
        for &a in &ids {
            for &b in &ids {
                prop_assert_eq!(
                    graph.is_same_tree(a, b).unwrap(),
                    graph.is_same_tree(b, a).unwrap()
                );
            }
        }
    }

    #[test]
    fn prop_postorder_leaves_consistent_graph(records in arb_records(16, false)) {
        let mut graph = Graph::from_records(&records).unwrap();
        let roots = graph.roots();
        let before = graph.len();
        let report = graph.postorder_merge().unwrap();
        prop_assert!(run_strict_safety_checks(&graph, &roots).is_ok());
        prop_assert!(graph.nodes().all(|node| node.live));
        prop_assert!(graph.len() <= before);
        prop_assert_eq!(report.nodes_after, graph.len());
    }

    #[test]
    fn prop_postorder_is_idempotent(records in arb_records(16, true)) {
        for order in [RootOrder::Ascending, RootOrder::Descending] {
            let mut graph = Graph::from_records(&records).unwrap();
            graph.postorder_merge_with(order).unwrap();
            let snapshot = graph.clone();
            let report = graph.postorder_merge_with(order).unwrap();
            prop_assert!(!report.changed());
            prop_assert_eq!(&graph, &snapshot);
        }
    }

    #[test]
    fn prop_pairwise_leaves_consistent_graph(records in arb_records(12, true)) {
        let mut graph = Graph::from_records(&records).unwrap();
        let roots = graph.roots();
        graph.pairwise_merge().unwrap();
        prop_assert!(run_strict_safety_checks(&graph, &roots).is_ok());
        prop_assert!(graph.nodes().all(|node| node.live));
    }

    #[test]
    fn prop_merges_preserve_leaf_paths(records in arb_records(12, true)) {
        for config in merge_configs() {
            let mut graph = Graph::from_records(&records).unwrap();
            let before = path_sets(&graph);
            graph.canonicalize(&config).unwrap();
            for (root, paths) in &before {
                if graph.contains(*root) {
                    let after: BTreeSet<Vec<String>> =
                        leaf_paths(&graph, *root).unwrap().into_iter().collect();
                    prop_assert_eq!(&after, paths);
                }
            }
        }
    }
}
