// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotated labels with rounded backgrounds, configured from JSON.
//!
//! The placer settings are read from a JSON document, the way a host would
//! load them from its own settings file. Street names carry per-label
//! orientations; the placer tests their rotated footprints against each
//! other and emits a rounded background for every label it keeps.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p placard_demos --example styled_labels`

use kurbo::Point;
use placard_labels::{Camera, FixedCamera, LabelHierarchy, LabelRecord, TextProperty, Vec3};
use placard_mapper::{
    FixedMetricStrategy, LabelPlacer, LabelShape, PlacementConfig, RenderWindow, Renderer,
};

const SETTINGS: &str = r#"{
    "iterator_type": "FullSort",
    "shape": "RoundedRect",
    "style": "Outline",
    "margin": 3.0,
    "background_color": [0.1, 0.1, 0.1],
    "background_opacity": 1.5,
    "output_traversed_bounds": true
}"#;

struct StreetView {
    camera: FixedCamera,
}

impl RenderWindow for StreetView {
    fn never_rendered(&self) -> bool {
        false
    }
}

impl Renderer for StreetView {
    fn render_window(&self) -> Option<&dyn RenderWindow> {
        Some(self)
    }
    fn active_camera(&self) -> Option<&dyn Camera> {
        Some(&self.camera)
    }
    fn viewport_size(&self) -> (u32, u32) {
        (512, 512)
    }
    fn tiled_size_and_origin(&self) -> (u32, u32, i32, i32) {
        (512, 512, 0, 0)
    }
    fn world_to_display(&self, p: Vec3) -> Point {
        Point::new(p.x, p.y)
    }
}

fn main() {
    env_logger::init();

    let config: PlacementConfig = match serde_json::from_str(SETTINGS) {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid placement settings: {err}");
            return;
        }
    };

    let mut streets = LabelHierarchy::new(TextProperty::default());
    for (x, y, name, degrees, rank) in [
        (100.0, 100.0, "Main Street", 0.0, 10.0),
        (140.0, 60.0, "Evergreen Terrace", 90.0, 8.0),
        (110.0, 95.0, "Elm Street", 15.0, 6.0),
        (300.0, 300.0, "Walnut Avenue", 45.0, 4.0),
        (330.0, 290.0, "Pine Road", -45.0, 2.0),
    ] {
        streets.push(
            LabelRecord::text(Vec3::new(x, y, 0.0), name)
                .with_orientation(degrees)
                .with_priority(rank),
        );
    }

    let view = StreetView {
        camera: FixedCamera::default(),
    };
    let mut placer: LabelPlacer<_> = LabelPlacer::with_config(FixedMetricStrategy::new(), config);
    assert_eq!(placer.config().shape, LabelShape::RoundedRect);
    assert_eq!(placer.config().background_opacity, 1.0);

    let report = match placer.render_overlay(Some(&view), &[&streets]) {
        Ok(report) => report,
        Err(err) => {
            log::error!("{err}");
            return;
        }
    };

    println!("== Drawn ==");
    for cmd in placer.strategy().commands() {
        println!(
            "  {:?} at {:?}, {} deg",
            cmd.content, cmd.anchor, cmd.property.orientation
        );
    }
    println!("== Backgrounds ==");
    for bg in &report.backgrounds {
        println!("  {} points, {:?}", bg.points.len(), bg.style);
    }
    println!(
        "== Index ==\n  {} tiles occupied",
        report.traversed_bounds.len()
    );

    assert_eq!(report.backgrounds.len(), report.placed.len());
}
