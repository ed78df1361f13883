// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-frame placement scenarios.

use kurbo::{Point, Rect};
use placard_labels::{
    Camera, FixedCamera, IteratorType, LabelHierarchy, LabelId, LabelRecord, TextProperty, Vec3,
};
use placard_mapper::{
    FixedMetricStrategy, FrameReport, LabelPlacer, PlacementConfig, RenderWindow, Renderer,
};
use placard_tiles::OrientedRect;

/// Window-sized orthographic view: world x/y are display pixels.
struct Ortho {
    camera: FixedCamera,
    size: (u32, u32),
}

impl Ortho {
    fn new(width: u32, height: u32) -> Self {
        Self {
            camera: FixedCamera::default(),
            size: (width, height),
        }
    }
}

impl RenderWindow for Ortho {
    fn never_rendered(&self) -> bool {
        false
    }
}

impl Renderer for Ortho {
    fn render_window(&self) -> Option<&dyn RenderWindow> {
        Some(self)
    }
    fn active_camera(&self) -> Option<&dyn Camera> {
        Some(&self.camera)
    }
    fn viewport_size(&self) -> (u32, u32) {
        self.size
    }
    fn tiled_size_and_origin(&self) -> (u32, u32, i32, i32) {
        (self.size.0, self.size.1, 0, 0)
    }
    fn world_to_display(&self, world: Vec3) -> Point {
        Point::new(world.x, world.y)
    }
}

// Simple deterministic RNG (xorshift64*)
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
    fn below(&mut self, n: u64) -> f64 {
        (self.next_u64() % n) as f64
    }
}

/// 100 five-glyph labels at whole-pixel anchors; each measures 50 x 20.
fn random_labels(seed: u64) -> LabelHierarchy {
    random_labels_from(seed, 0.0)
}

/// Like [`random_labels`], with every anchor moved right by `dx`.
fn random_labels_from(seed: u64, dx: f64) -> LabelHierarchy {
    let mut rng = Rng::new(seed);
    let mut h = LabelHierarchy::new(TextProperty {
        font_size: 20.0,
        ..TextProperty::default()
    });
    for i in 0..100 {
        let anchor = Vec3::new(dx + rng.below(950), rng.below(980), 0.0);
        let priority = rng.below(1000);
        h.push(LabelRecord::text(anchor, format!("L{i:04}")).with_priority(priority));
    }
    h
}

fn placer(iterator_type: IteratorType) -> LabelPlacer<FixedMetricStrategy> {
    LabelPlacer::with_config(
        FixedMetricStrategy::new().with_advance_ratio(0.5),
        PlacementConfig {
            iterator_type,
            maximum_label_fraction: 1.0,
            place_all_labels: false,
            ..PlacementConfig::default()
        },
    )
}

fn frame(placer: &mut LabelPlacer<FixedMetricStrategy>, labels: &LabelHierarchy) -> FrameReport {
    placer
        .render_overlay(Some(&Ortho::new(1000, 1000)), &[labels])
        .unwrap()
}

fn footprint(labels: &LabelHierarchy, id: u64) -> OrientedRect {
    let anchor = labels.get(LabelId(id)).unwrap().anchor;
    let bounds = Rect::new(anchor.x, anchor.y, anchor.x + 50.0, anchor.y + 20.0);
    OrientedRect::from_bounds(bounds, bounds.origin(), 0.0)
}

#[test]
fn random_labels_are_disjoint_and_maximal() {
    let labels = random_labels(0x5EED);
    let mut p = placer(IteratorType::FullSort);
    let report = frame(&mut p, &labels);

    assert!(!report.placed.is_empty());
    assert_eq!(report.considered, 100);
    assert_eq!(report.allowable_area, 1_000_000.0);
    assert!(!report.budget_exceeded());
    assert_eq!(report.placed.len() + report.rejections.overlap, 100);

    for (i, a) in report.placed.iter().enumerate() {
        assert_eq!(a.screen_rect.size(), kurbo::Size::new(50.0, 20.0));
        for b in &report.placed[i + 1..] {
            assert!(!a.footprint.overlaps(&b.footprint), "{:?} overlaps {:?}", a.id, b.id);
        }
    }

    // Every rejected label collides with a label that was kept.
    let placed: Vec<u64> = report.placed_ids().map(|placed| placed.id.0).collect();
    for id in (0..100).filter(|id| !placed.contains(id)) {
        let rect = footprint(&labels, id);
        assert!(
            report.placed.iter().any(|p| p.footprint.overlaps(&rect)),
            "label {id} was rejected without a collision"
        );
    }
}

#[test]
fn higher_priority_wins_every_collision() {
    let labels = random_labels(42);
    let mut p = placer(IteratorType::FullSort);
    let report = frame(&mut p, &labels);

    let priority = |id: u64| labels.get(LabelId(id)).unwrap().priority;
    let placed: Vec<u64> = report.placed_ids().map(|placed| placed.id.0).collect();
    for id in (0..100).filter(|id| !placed.contains(id)) {
        let rect = footprint(&labels, id);
        assert!(
            report
                .placed
                .iter()
                .any(|p| p.footprint.overlaps(&rect) && priority(p.id.0) >= priority(id)),
            "label {id} lost to a less important label"
        );
    }
}

#[test]
fn placement_is_deterministic() {
    let labels = random_labels(7);
    let mut a = placer(IteratorType::FullSort);
    let mut b = placer(IteratorType::FullSort);
    let ra = frame(&mut a, &labels);
    let rb = frame(&mut b, &labels);
    assert_eq!(ra.placed, rb.placed);
    assert_eq!(ra.rendered_area, rb.rendered_area);
    assert_eq!(a.strategy().commands(), b.strategy().commands());
}

#[test]
fn queue_order_is_stable_across_frames() {
    let labels = random_labels(99);
    let mut p = placer(IteratorType::Queue);
    let first = frame(&mut p, &labels);
    let second = frame(&mut p, &labels);
    let third = frame(&mut p, &labels);
    assert_eq!(first.placed, second.placed);
    assert_eq!(second.placed, third.placed);
}

#[test]
fn queue_order_is_stable_across_frames_with_two_sources() {
    // Both sources number their labels from 0; each covers its own half of the view.
    let left = random_labels_from(3, 0.0);
    let right = random_labels_from(4, 1000.0);
    let mut p = placer(IteratorType::Queue);
    let renderer = Ortho::new(2000, 1000);
    let mut frames = (0..3).map(|_| {
        let mut ids: Vec<_> = p
            .render_overlay(Some(&renderer), &[&left, &right])
            .unwrap()
            .placed_ids()
            .collect();
        // Round-robin interleaving may differ between frames; the selection may not.
        ids.sort();
        ids
    });
    let first = frames.next().unwrap();
    assert!(first.iter().any(|id| id.source == 0));
    assert!(first.iter().any(|id| id.source == 1));
    for later in frames {
        assert_eq!(later, first);
    }
}
