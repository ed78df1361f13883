// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy placement of a handful of city labels.
//!
//! This example places labels of two sources over a 640 x 480 view and
//! prints which ones survived and why the others were dropped.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p placard_demos --example placement_basics`

use kurbo::Point;
use placard_labels::{Camera, FixedCamera, LabelHierarchy, LabelRecord, TextProperty, Vec3};
use placard_mapper::{FixedMetricStrategy, LabelPlacer, RenderWindow, Renderer};

/// A top-down view where world x/y are pixels.
struct MapView {
    camera: FixedCamera,
}

impl RenderWindow for MapView {
    fn never_rendered(&self) -> bool {
        false
    }
}

impl Renderer for MapView {
    fn render_window(&self) -> Option<&dyn RenderWindow> {
        Some(self)
    }
    fn active_camera(&self) -> Option<&dyn Camera> {
        Some(&self.camera)
    }
    fn viewport_size(&self) -> (u32, u32) {
        (640, 480)
    }
    fn tiled_size_and_origin(&self) -> (u32, u32, i32, i32) {
        (640, 480, 0, 0)
    }
    fn world_to_display(&self, p: Vec3) -> Point {
        Point::new(p.x, p.y)
    }
}

fn main() {
    env_logger::init();

    let mut cities = LabelHierarchy::new(TextProperty::default());
    for (x, y, name, population) in [
        (120.0, 300.0, "Capital City", 900.0),
        (130.0, 306.0, "Ogdenville", 40.0),
        (400.0, 120.0, "Shelbyville", 300.0),
        (405.0, 110.0, "Cypress Creek", 25.0),
        (600.0, 460.0, "Brockway", 10.0),
        (-200.0, 200.0, "Off the map", 1000.0),
    ] {
        cities.push(LabelRecord::text(Vec3::new(x, y, 0.0), name).with_priority(population));
    }

    let mut landmarks = LabelHierarchy::new(TextProperty {
        font_size: 10.0,
        ..TextProperty::default()
    });
    landmarks.push(LabelRecord::icon(Vec3::new(200.0, 200.0, 0.0), 3).with_priority(5.0));
    landmarks.push(LabelRecord::text(Vec3::new(402.0, 118.0, 0.0), "Lake").with_priority(1.0));

    let view = MapView {
        camera: FixedCamera::default(),
    };
    let mut placer: LabelPlacer<_> = LabelPlacer::new(FixedMetricStrategy::new());
    let report = match placer.render_overlay(Some(&view), &[&cities, &landmarks]) {
        Ok(report) => report,
        Err(err) => {
            log::error!("{err}");
            return;
        }
    };

    println!("== Placed ==");
    for label in &report.placed {
        println!(
            "  {:?} {:?} at {:?}",
            label.id, label.label_type, label.screen_rect
        );
    }
    println!("== Rejected ==\n  {:?}", report.rejections);
    println!(
        "== Area ==\n  {:.0} of {:.0} allowed (exceeded: {})",
        report.rendered_area,
        report.allowable_area,
        report.budget_exceeded()
    );

    assert_eq!(report.rejections.off_screen, 1);
    assert!(report.rejections.overlap >= 2);
}
