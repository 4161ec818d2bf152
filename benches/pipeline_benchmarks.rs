use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sociogram::algo::compute_layout;
use sociogram::{CategoryLookup, LayoutConfig, RatingMatrix, SociogramPipeline};

const TOKENS: &[&str] = &["", "", "3", "2", "1", "-1", "-2", "2!", "1!", "-2!"];

/// Deterministic pseudo-random class matrix of `size` entities
fn class_matrix(size: usize) -> RatingMatrix {
    let ids: Vec<String> = (0..size).map(|i| format!("Student{}", i)).collect();
    let cells = (0..size)
        .map(|r| {
            (0..size)
                .map(|c| {
                    if r == c {
                        String::new()
                    } else {
                        TOKENS[(r * 31 + c * 17 + r * c) % TOKENS.len()].to_string()
                    }
                })
                .collect()
        })
        .collect();
    RatingMatrix::new(&ids, &ids, cells).unwrap()
}

/// Benchmark scoring (normalize + aggregate)
fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    let pipeline = SociogramPipeline::default();

    for size in [10, 30, 100].iter() {
        let matrix = class_matrix(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &matrix, |b, matrix| {
            b.iter(|| pipeline.score(matrix).unwrap());
        });
    }
    group.finish();
}

/// Benchmark the spring layout of the positive graph
fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("spring_layout");
    let pipeline = SociogramPipeline::default();
    let config = LayoutConfig::default();

    for size in [10, 30, 100].iter() {
        let report = pipeline.run(&class_matrix(*size), &CategoryLookup::new()).unwrap();
        let graph = report.positive.graph;
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| compute_layout(graph, &config));
        });
    }
    group.finish();
}

/// Benchmark a full run, all three variants
fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    group.sample_size(20);
    let pipeline = SociogramPipeline::default();
    let lookup = CategoryLookup::new();

    for size in [10, 30].iter() {
        let matrix = class_matrix(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &matrix, |b, matrix| {
            b.iter(|| pipeline.run(matrix, &lookup).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scoring, bench_layout, bench_full_pipeline);
criterion_main!(benches);
