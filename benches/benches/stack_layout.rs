// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for stack size negotiation and placement over synthetic children.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use sapling_layout::{
    HStackLayout, Layout, ProposedViewSize, Subviews, UnitPoint, VStackLayout, ViewDimensions,
    ViewSpacing,
};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        let t = f64::from(self.next_u32()) / f64::from(u32::MAX);
        lo + (hi - lo) * t
    }
}

/// A child that is either fixed or stretches between a minimum and maximum.
#[derive(Clone, Copy)]
struct Leaf {
    min: Size,
    max: Size,
    priority: f64,
}

impl Leaf {
    fn fit(&self, proposal: ProposedViewSize) -> Size {
        let proposed = proposal.replacing_unspecified_dimensions_by(self.min);
        Size::new(
            proposed.width.clamp(self.min.width, self.max.width),
            proposed.height.clamp(self.min.height, self.max.height),
        )
    }
}

#[derive(Clone)]
struct Leaves {
    leaves: Vec<Leaf>,
    placed: Vec<Point>,
}

impl Subviews for Leaves {
    fn len(&self) -> usize {
        self.leaves.len()
    }

    fn size_that_fits(&mut self, index: usize, proposal: ProposedViewSize) -> Size {
        self.leaves[index].fit(proposal)
    }

    fn dimensions(&mut self, index: usize, proposal: ProposedViewSize) -> ViewDimensions {
        ViewDimensions::new(self.leaves[index].fit(proposal))
    }

    fn spacing(&mut self, _: usize) -> ViewSpacing {
        ViewSpacing::ZERO
    }

    fn priority(&mut self, index: usize) -> f64 {
        self.leaves[index].priority
    }

    fn place(&mut self, _: usize, position: Point, _: UnitPoint, _: ProposedViewSize) {
        self.placed.push(position);
    }
}

fn build_leaves(n: usize, priorities: u32, seed: u64) -> Leaves {
    let mut rng = Lcg::new(seed);
    let leaves = (0..n)
        .map(|_| {
            let min = Size::new(rng.gen_range_f64(4.0, 40.0), rng.gen_range_f64(4.0, 40.0));
            // Roughly a third of the children are rigid.
            let max = if rng.next_u32() % 3 == 0 {
                min
            } else {
                Size::new(f64::INFINITY, f64::INFINITY)
            };
            let priority = f64::from(rng.next_u32() % priorities.max(1));
            Leaf { min, max, priority }
        })
        .collect();
    Leaves {
        leaves,
        placed: Vec::with_capacity(n),
    }
}

fn bench_stacks(c: &mut Criterion) {
    let mut group = c.benchmark_group("sapling_stack_layout");
    group.sample_size(50);

    for &(n, priorities) in &[(16_usize, 1_u32), (256, 1), (256, 4), (4_096, 4)] {
        let proposal = ProposedViewSize::new(Some(n as f64 * 20.0), Some(600.0));

        group.bench_function(format!("hstack_size(n={n},p={priorities})"), |b| {
            let layout = HStackLayout::new(Default::default(), Some(8.0));
            let mut leaves = build_leaves(n, priorities, 0x5A91_0000_0000_0001);
            b.iter(|| {
                let mut cache = layout.make_cache(&mut leaves);
                black_box(layout.size_that_fits(proposal, &mut leaves, &mut cache));
            });
        });

        group.bench_function(format!("vstack_place(n={n},p={priorities})"), |b| {
            let layout = VStackLayout::new(Default::default(), Some(8.0));
            let bounds = Rect::new(0.0, 0.0, 600.0, n as f64 * 20.0);
            b.iter_batched(
                || build_leaves(n, priorities, 0x5A91_0000_0000_0002),
                |mut leaves| {
                    let mut cache = layout.make_cache(&mut leaves);
                    let proposal = ProposedViewSize::from_size(bounds.size());
                    layout.place_subviews(bounds, proposal, &mut leaves, &mut cache);
                    black_box(leaves.placed.len());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_stacks);
criterion_main!(benches);
