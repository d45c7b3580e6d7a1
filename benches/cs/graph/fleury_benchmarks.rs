use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use fleury::graph::{EulerPathFinder, FleuryConfig, MultiGraph, SelectionRule};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Complete graph on an odd number of vertices, so every degree is even.
fn complete(n: usize) -> MultiGraph<usize> {
    let mut edges = Vec::with_capacity(n * (n - 1) / 2);
    for u in 0..n {
        for v in u + 1..n {
            edges.push((u, v));
        }
    }
    MultiGraph::undirected(0..n, edges).unwrap()
}

/// A random closed walk turned into a multigraph.
fn closed_walk(n: usize, len: usize, seed: u64) -> MultiGraph<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut walk = vec![0];
    for _ in 0..len {
        walk.push(rng.gen_range(0..n));
    }
    walk.push(0);
    let edges: Vec<(usize, usize)> = walk.windows(2).map(|w| (w[0], w[1])).collect();
    MultiGraph::undirected(0..n, edges).unwrap()
}

fn finder(rule: SelectionRule) -> EulerPathFinder {
    EulerPathFinder::with_config(FleuryConfig { rule })
}

fn bench_complete(c: &mut Criterion) {
    let mut group = c.benchmark_group("fleury_complete");
    for &n in &[11usize, 21, 41] {
        let graph = complete(n);
        for (name, rule) in [
            ("bridges", SelectionRule::Bridges),
            ("degree_heuristic", SelectionRule::DegreeHeuristic),
        ] {
            let euler = finder(rule);
            group.bench_with_input(BenchmarkId::new(name, n), &graph, |b, graph| {
                b.iter_batched(
                    || graph.clone(),
                    |mut g| black_box(euler.build_euler_path(&mut g)),
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

fn bench_random_multigraph(c: &mut Criterion) {
    let mut group = c.benchmark_group("fleury_random_multigraph");
    let euler = finder(SelectionRule::Bridges);
    for &len in &[100usize, 500, 1000] {
        let graph = closed_walk(50, len, 42);
        group.bench_with_input(BenchmarkId::from_parameter(len), &graph, |b, graph| {
            b.iter_batched(
                || graph.clone(),
                |mut g| black_box(euler.build_euler_path(&mut g)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_complete, bench_random_multigraph);
criterion_main!(benches);
