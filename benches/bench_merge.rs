use std::time::Duration;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sharegraph::{
    Graph, RootOrder,
    bench_utils::{DatasetShape, RecordDataset, generate_records},
};

const FOREST_SEED: u64 = 0x5EED;
const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

struct ReadyGraph {
    label: String,
    graph: Graph<String>,
}

fn bench_scales() -> &'static [usize] {
    #[cfg(feature = "bench-ci")]
    {
        &[1_000, 5_000, 10_000]
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        &[10_000, 50_000, 100_000]
    }
}

/// Pairwise compares every pair of nodes, so it only sees small inputs.
fn pairwise_scales() -> &'static [usize] {
    if cfg!(feature = "bench-ci") {
        &[100, 250]
    } else {
        &[250, 500, 1_000]
    }
}

fn forest_cases(scales: &[usize]) -> Vec<ReadyGraph> {
    scales
        .iter()
        .map(|&nodes| {
            let dataset = generate_records(
                DatasetShape::RandomForest {
                    roots: (nodes / 100).max(1),
                    labels: 4,
                },
                nodes,
                FOREST_SEED + nodes as u64,
            );
            materialize(&dataset, format!("forest_{nodes}"))
        })
        .collect()
}

fn materialize(dataset: &RecordDataset, label: String) -> ReadyGraph {
    let graph = Graph::from_records(&dataset.records).expect("graph");
    ReadyGraph { label, graph }
}

fn bench_postorder_forest(c: &mut Criterion) {
    let cases = forest_cases(bench_scales());
    let mut group = c.benchmark_group("postorder_forest");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for case in &cases {
        for order in [RootOrder::Ascending, RootOrder::Descending] {
            let id = format!("{}_{order:?}", case.label);
            group.bench_function(BenchmarkId::from_parameter(id), |b| {
                b.iter_batched(
                    || case.graph.clone(),
                    |mut graph| graph.postorder_merge_with(order).expect("merge"),
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_postorder_replicated(c: &mut Criterion) {
    let dataset = generate_records(
        DatasetShape::ReplicatedTrees {
            copies: 64,
            fanout: 3,
            depth: 5,
        },
        2,
        0,
    );
    let case = materialize(&dataset, "replicated".into());
    let mut group = c.benchmark_group("postorder_replicated");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    group.bench_function("trees", |b| {
        b.iter_batched(
            || case.graph.clone(),
            |mut graph| graph.postorder_merge().expect("merge"),
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn bench_postorder_line(c: &mut Criterion) {
    // Distinct labels: nothing merges, every node is walked once per round.
    let dataset = generate_records(DatasetShape::Line, 2_000, 0);
    let case = materialize(&dataset, "line".into());
    let mut group = c.benchmark_group("postorder_line");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    group.bench_function(BenchmarkId::from_parameter(case.label.clone()), |b| {
        b.iter_batched(
            || case.graph.clone(),
            |mut graph| graph.postorder_merge().expect("merge"),
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn bench_pairwise_forest(c: &mut Criterion) {
    let cases = forest_cases(pairwise_scales());
    let mut group = c.benchmark_group("pairwise_forest");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for case in &cases {
        let id = case.label.clone();
        group.bench_function(BenchmarkId::from_parameter(id), |b| {
            b.iter_batched(
                || case.graph.clone(),
                |mut graph| graph.pairwise_merge().expect("merge"),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    name = merge_benches;
    config = Criterion::default();
    targets = bench_postorder_forest, bench_postorder_replicated, bench_postorder_line, bench_pairwise_forest
);
criterion_main!(merge_benches);
