use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sharegraph::{
    Graph, NodeId,
    bench_utils::{DatasetShape, generate_records},
};

const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

fn tree_depths() -> &'static [usize] {
    #[cfg(feature = "bench-ci")]
    {
        &[3, 5]
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        &[4, 6, 8]
    }
}

fn tree_size(fanout: usize, depth: usize) -> usize {
    (0..=depth).map(|level| fanout.pow(level as u32)).sum()
}

fn bench_equal_trees(c: &mut Criterion) {
    let fanout = 3;
    let mut group = c.benchmark_group("same_tree_equal");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for &depth in tree_depths() {
        let dataset = generate_records(
            DatasetShape::ReplicatedTrees {
                copies: 2,
                fanout,
                depth,
            },
            2,
            0,
        );
        let graph = Graph::from_records(&dataset.records).expect("graph");
        let first: NodeId = 1;
        let second = first + tree_size(fanout, depth) as NodeId;
        group.bench_function(BenchmarkId::from_parameter(format!("depth_{depth}")), |b| {
            b.iter(|| {
                assert!(graph.is_same_tree(first, second).expect("compare"));
            });
        });
    }
    group.finish();
}

fn bench_star_siblings(c: &mut Criterion) {
    let mut group = c.benchmark_group("same_tree_star");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for &leaves in &[100usize, 1_000] {
        let dataset = generate_records(DatasetShape::Star { labels: 1 }, leaves + 1, 0);
        let mut records = dataset.records.clone();
        let offset = records.len() as NodeId;
        for record in &dataset.records {
            let mut copy = record.clone();
            copy.id += offset;
            copy.children = copy.children.iter().map(|child| child + offset).collect();
            records.push(copy);
        }
        let graph = Graph::from_records(&records).expect("graph");
        let hub = 1;
        group.bench_function(BenchmarkId::from_parameter(leaves), |b| {
            b.iter(|| {
                assert!(graph.is_same_tree(hub, hub + offset).expect("compare"));
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = equality_benches;
    config = Criterion::default();
    targets = bench_equal_trees, bench_star_siblings
);
criterion_main!(equality_benches);
