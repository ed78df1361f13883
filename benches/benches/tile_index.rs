// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use placard_tiles::{DEFAULT_TILE_SIZE, OrientedRect, TileIndex};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

fn gen_labels(count: usize, w: f64, h: f64, max_rotation: f64, seed: u64) -> Vec<OrientedRect> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let x0 = rng.next_f64() * (VIEWPORT.width() - w);
        let y0 = rng.next_f64() * (VIEWPORT.height() - h);
        let rotation = (rng.next_f64() - 0.5) * 2.0 * max_rotation;
        let bounds = Rect::new(x0, y0, x0 + w, y0 + h);
        out.push(OrientedRect::from_bounds(bounds, Point::new(x0, y0), rotation));
    }
    out
}

/// Greedy placement against a flat list, for comparison.
fn place_brute_force(labels: &[OrientedRect]) -> usize {
    let mut placed: Vec<OrientedRect> = Vec::new();
    for r in labels {
        if !placed.iter().any(|p| p.overlaps(r)) {
            placed.push(*r);
        }
    }
    placed.len()
}

fn place_tiled(index: &mut TileIndex, labels: &[OrientedRect]) -> usize {
    labels.iter().filter(|r| index.place_label(r)).count()
}

fn bench_greedy_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_placement");
    for &n in &[256usize, 1024, 4096] {
        let labels = gen_labels(n, 60.0, 14.0, 0.0, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("tile_index_n{n}"), |b| {
            b.iter_batched(
                || TileIndex::new(VIEWPORT, DEFAULT_TILE_SIZE),
                |mut index| black_box(place_tiled(&mut index, &labels)),
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("brute_force_n{n}"), |b| {
            b.iter(|| black_box(place_brute_force(&labels)));
        });
    }
    group.finish();
}

fn bench_rotated_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotated_placement");
    let labels = gen_labels(2048, 80.0, 14.0, 0.6, 0xFACE_FEED_CAFE_BABE);
    group.throughput(Throughput::Elements(labels.len() as u64));
    group.bench_function("tile_index", |b| {
        b.iter_batched(
            || TileIndex::new(VIEWPORT, DEFAULT_TILE_SIZE),
            |mut index| black_box(place_tiled(&mut index, &labels)),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_tile_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_size");
    let labels = gen_labels(4096, 60.0, 14.0, 0.0, 0xC1A5_7E55_9999_ABCD);
    for &side in &[32.0, 64.0, 128.0, 256.0] {
        group.bench_function(format!("side_{side}"), |b| {
            b.iter_batched(
                || TileIndex::new(VIEWPORT, Size::new(side, side)),
                |mut index| black_box(place_tiled(&mut index, &labels)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_reset_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_reuse");
    let labels = gen_labels(1024, 60.0, 14.0, 0.0, 0xBADC_F00D_1234_5678);
    let mut index = TileIndex::new(VIEWPORT, DEFAULT_TILE_SIZE);
    group.bench_function("reset_then_place", |b| {
        b.iter(|| {
            index.reset(VIEWPORT, DEFAULT_TILE_SIZE);
            black_box(place_tiled(&mut index, &labels))
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_greedy_placement,
    bench_rotated_placement,
    bench_tile_sizes,
    bench_reset_reuse,
);
criterion_main!(benches);
