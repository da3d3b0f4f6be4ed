//! Benchmarks for structural churn and layout of the dock tree.

use berth_dock::{DockSide, DockTree, LayoutRect, NodeId};
use berth_test_utils::sample_registry;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const SIDES: [DockSide; 4] = [DockSide::East, DockSide::South, DockSide::West, DockSide::North];

/// A tree of `leaves` leaves built by splitting the newest leaf in turn.
fn build_tree(leaves: usize) -> (DockTree, Vec<NodeId>) {
    let mut tree = DockTree::new(sample_registry());
    let mut nodes = Vec::with_capacity(leaves);
    let mut last = tree
        .dock("console", tree.root(), DockSide::Center, None)
        .map(|p| p.node)
        .unwrap_or(tree.root());
    nodes.push(last);
    for i in 1..leaves {
        if let Ok(placement) = tree.dock("inspector", last, SIDES[i % SIDES.len()], None) {
            last = placement.node;
            nodes.push(last);
        }
    }
    (tree, nodes)
}

fn bench_dock_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("dock_split");

    for size in [10, 100, 500] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| build_tree(black_box(size)));
        });
    }

    group.finish();
}

fn bench_undock_prune(c: &mut Criterion) {
    let mut group = c.benchmark_group("undock_prune");

    for size in [10, 100, 500] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || build_tree(size),
                |(mut tree, nodes)| {
                    for node in nodes.into_iter().rev() {
                        let _ = tree.undock(black_box(node), 0);
                    }
                    tree
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_compute_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_layout");
    let viewport = LayoutRect::new(0.0, 0.0, 1920.0, 1080.0);

    for size in [10, 100] {
        let (mut tree, _) = build_tree(size);
        group.throughput(Throughput::Elements(tree.node_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| tree.compute_layout(black_box(viewport)));
        });
    }

    group.finish();
}

fn bench_relayout(c: &mut Criterion) {
    let (mut tree, _) = build_tree(100);
    let _ = tree.compute_layout(LayoutRect::new(0.0, 0.0, 1920.0, 1080.0));
    let root = tree.root();

    c.bench_function("relayout_100", |b| {
        b.iter(|| tree.relayout(black_box(root)));
    });
}

criterion_group!(
    benches,
    bench_dock_split,
    bench_undock_prune,
    bench_compute_layout,
    bench_relayout
);
criterion_main!(benches);
