// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-to-frame label stability while the view pans.
//!
//! Two placers watch the same labels while the camera pans a few pixels per
//! frame. The `Queue` order revisits last frame's labels first, so its
//! selection changes less than the `FullSort` order, which re-ranks
//! everything each frame.
//!
//! Run:
//! - `cargo run -p placard_demos --example panning_stability`

use std::cell::Cell;

use kurbo::Point;
use placard_labels::{
    Camera, FixedCamera, IteratorType, LabelHierarchy, LabelRecord, SourcedId, TextProperty, Vec3,
};
use placard_mapper::{FixedMetricStrategy, LabelPlacer, RenderWindow, Renderer};

/// A view whose horizontal pan can change between frames.
struct PanningView {
    camera: FixedCamera,
    pan: Cell<f64>,
}

impl RenderWindow for PanningView {
    fn never_rendered(&self) -> bool {
        false
    }
}

impl Renderer for PanningView {
    fn render_window(&self) -> Option<&dyn RenderWindow> {
        Some(self)
    }
    fn active_camera(&self) -> Option<&dyn Camera> {
        Some(&self.camera)
    }
    fn viewport_size(&self) -> (u32, u32) {
        (800, 600)
    }
    fn tiled_size_and_origin(&self) -> (u32, u32, i32, i32) {
        (800, 600, 0, 0)
    }
    fn world_to_display(&self, p: Vec3) -> Point {
        Point::new(p.x - self.pan.get(), p.y)
    }
}

// Simple deterministic RNG (xorshift64)
struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

fn churn(previous: &[SourcedId], current: &[SourcedId]) -> usize {
    current.iter().filter(|id| !previous.contains(id)).count()
}

fn main() {
    env_logger::init();

    let mut rng = Rng(0x0DDB_1A5E_5BAD_5EED);
    let mut labels = LabelHierarchy::new(TextProperty::default());
    for i in 0..400 {
        let anchor = Vec3::new(rng.next_f64() * 1200.0, rng.next_f64() * 590.0, 0.0);
        // Priorities nearly tie so small moves reshuffle a full sort.
        let priority = 1.0 + rng.next_f64() * 0.01;
        labels.push(LabelRecord::text(anchor, format!("poi-{i}")).with_priority(priority));
    }

    let view = PanningView {
        camera: FixedCamera::default(),
        pan: Cell::new(0.0),
    };
    let mut queue: LabelPlacer<_> = LabelPlacer::new(FixedMetricStrategy::new());
    let mut sorted: LabelPlacer<_> = LabelPlacer::new(FixedMetricStrategy::new());
    sorted.set_iterator_type(IteratorType::FullSort);

    let mut last = (Vec::new(), Vec::new());
    let mut total = (0, 0);
    for frame in 0..20 {
        view.pan.set(f64::from(frame) * 4.0);
        let (Ok(q), Ok(s)) = (
            queue.render_overlay(Some(&view), &[&labels]),
            sorted.render_overlay(Some(&view), &[&labels]),
        ) else {
            log::error!("frame {frame} failed");
            return;
        };
        let q: Vec<SourcedId> = q.placed_ids().collect();
        let s: Vec<SourcedId> = s.placed_ids().collect();
        if frame > 0 {
            total.0 += churn(&last.0, &q);
            total.1 += churn(&last.1, &s);
        }
        println!("frame {frame:2}: queue {:3} placed, full sort {:3} placed", q.len(), s.len());
        last = (q, s);
    }
    println!("== Labels newly shown over 19 pans ==");
    println!("  queue:     {}", total.0);
    println!("  full sort: {}", total.1);
}
