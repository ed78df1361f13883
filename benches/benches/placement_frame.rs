// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use placard_labels::{
    Camera, FixedCamera, IteratorType, LabelHierarchy, LabelRecord, TextProperty, Vec3,
};
use placard_mapper::{FixedMetricStrategy, LabelPlacer, RenderWindow, Renderer};

struct Screen {
    camera: FixedCamera,
}

impl RenderWindow for Screen {
    fn never_rendered(&self) -> bool {
        false
    }
}

impl Renderer for Screen {
    fn render_window(&self) -> Option<&dyn RenderWindow> {
        Some(self)
    }
    fn active_camera(&self) -> Option<&dyn Camera> {
        Some(&self.camera)
    }
    fn viewport_size(&self) -> (u32, u32) {
        (1920, 1080)
    }
    fn tiled_size_and_origin(&self) -> (u32, u32, i32, i32) {
        (1920, 1080, 0, 0)
    }
    fn world_to_display(&self, p: Vec3) -> Point {
        Point::new(p.x, p.y)
    }
}

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

fn gen_hierarchy(count: usize, seed: u64) -> LabelHierarchy {
    let mut rng = Rng::new(seed);
    let mut h = LabelHierarchy::new(TextProperty::default());
    for i in 0..count {
        let anchor = Vec3::new(rng.next_f64() * 1900.0, rng.next_f64() * 1070.0, 0.0);
        h.push(LabelRecord::text(anchor, format!("label {i}")).with_priority(rng.next_f64()));
    }
    h
}

fn bench_frames(c: &mut Criterion) {
    let screen = Screen {
        camera: FixedCamera::default(),
    };
    let mut group = c.benchmark_group("render_overlay");
    for &n in &[1000usize, 10_000] {
        let labels = gen_hierarchy(n, 0xCAFE_F00D_DEAD_BEEF ^ n as u64);
        group.throughput(Throughput::Elements(n as u64));
        for (name, order) in [("full_sort", IteratorType::FullSort), ("queue", IteratorType::Queue)] {
            let mut placer: LabelPlacer<_> = LabelPlacer::new(FixedMetricStrategy::new());
            placer.set_iterator_type(order);
            group.bench_function(format!("{name}_n{n}"), |b| {
                b.iter(|| {
                    let report = placer.render_overlay(Some(&screen), &[&labels]);
                    black_box(report.map(|r| r.placed.len()))
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_frames);
criterion_main!(benches);
