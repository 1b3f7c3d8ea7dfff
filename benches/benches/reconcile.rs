// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for view graph reconciliation and full layout passes.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use sapling_graph::sapling_layout::FrameLayout;
use sapling_graph::{Color, HStack, ModifiedContent, Spacer, VStack, ViewExt, ViewGraph};

type Row = HStack<(ModifiedContent<Color, FrameLayout>, Spacer, Color)>;

fn rows(n: usize, width: f64) -> VStack<Vec<Row>> {
    let rows = (0..n)
        .map(|i| {
            let shade = (i % 256) as u8;
            HStack::new((
                Color::GREEN.frame(width, 12.0),
                Spacer::new(),
                Color::from_rgba8(0, 0, shade, 255),
            ))
        })
        .collect();
    VStack::new(rows)
}

fn mounted(n: usize) -> ViewGraph {
    let mut graph = ViewGraph::new();
    let _ = graph.update(&rows(n, 40.0));
    graph
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("sapling_reconcile");
    group.sample_size(30);

    for &n in &[16_usize, 256, 2_048] {
        group.bench_function(format!("mount(n={n})"), |b| {
            let view = rows(n, 40.0);
            b.iter_batched(
                ViewGraph::new,
                |mut graph| {
                    black_box(graph.update(&view).created.len());
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("update_unchanged(n={n})"), |b| {
            let view = rows(n, 40.0);
            let mut graph = mounted(n);
            b.iter(|| black_box(graph.update(&view).updated));
        });

        group.bench_function(format!("shrink_grow(n={n})"), |b| {
            let short = rows(n / 2, 40.0);
            let long = rows(n, 40.0);
            let mut graph = mounted(n);
            b.iter(|| {
                let _ = graph.update(&short);
                black_box(graph.update(&long).created.len());
            });
        });

        group.bench_function(format!("layout(n={n})"), |b| {
            let mut graph = mounted(n);
            b.iter(|| {
                graph.layout(Size::new(800.0, n as f64 * 12.0));
                black_box(graph.root());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
