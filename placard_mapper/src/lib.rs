// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placard Mapper: per-frame placement of non-overlapping labels.
//!
//! A [`LabelPlacer`] runs once per rendered frame. It asks the host
//! [`Renderer`] for the viewport and camera, merges the candidate sequences
//! of every [`LabelSource`](placard_labels::LabelSource), and draws each
//! candidate that does not overlap a label already placed this frame through
//! a [`LabelRenderStrategy`]. Candidates arrive most important first, so the
//! result is a greedy, priority-respecting selection.
//!
//! - [`PlacementConfig`]: the tunable settings (area fraction, traversal
//!   order, culling switches, backgrounds).
//! - [`Renderer`] / [`RenderWindow`] / [`DepthSnapshot`]: what the host
//!   provides.
//! - [`LabelRenderStrategy`]: how labels are measured and drawn;
//!   [`FixedMetricStrategy`] is a self-contained implementation.
//! - [`FrameReport`]: what a frame placed and why the rest was skipped.
//!
//! The placement index is a [`TileIndex`](placard_tiles::TileIndex) by
//! default; any [`PlacementIndex`](placard_tiles::PlacementIndex) can be
//! substituted.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use placard_labels::{Camera, FixedCamera, LabelHierarchy, LabelRecord, TextProperty, Vec3};
//! use placard_mapper::{FixedMetricStrategy, LabelPlacer, RenderWindow, Renderer};
//!
//! struct Screen(FixedCamera);
//!
//! impl RenderWindow for Screen {
//!     fn never_rendered(&self) -> bool {
//!         false
//!     }
//! }
//!
//! impl Renderer for Screen {
//!     fn render_window(&self) -> Option<&dyn RenderWindow> {
//!         Some(self)
//!     }
//!     fn active_camera(&self) -> Option<&dyn Camera> {
//!         Some(&self.0)
//!     }
//!     fn viewport_size(&self) -> (u32, u32) {
//!         (640, 480)
//!     }
//!     fn tiled_size_and_origin(&self) -> (u32, u32, i32, i32) {
//!         (640, 480, 0, 0)
//!     }
//!     fn world_to_display(&self, p: Vec3) -> Point {
//!         Point::new(p.x, p.y)
//!     }
//! }
//!
//! let mut towns = LabelHierarchy::new(TextProperty::default());
//! towns.push(LabelRecord::text(Vec3::new(100.0, 100.0, 0.0), "Ogdenville").with_priority(3.0));
//! towns.push(LabelRecord::text(Vec3::new(110.0, 104.0, 0.0), "North Haverbrook"));
//! towns.push(LabelRecord::text(Vec3::new(400.0, 300.0, 0.0), "Brockway"));
//!
//! let screen = Screen(FixedCamera::default());
//! let mut placer: LabelPlacer<_> = LabelPlacer::new(FixedMetricStrategy::new());
//! let report = placer.render_overlay(Some(&screen), &[&towns]).unwrap();
//!
//! // "North Haverbrook" collides with the more important "Ogdenville".
//! assert_eq!(report.placed.len(), 2);
//! assert_eq!(report.rejections.overlap, 1);
//! ```

pub mod background;
pub mod config;
pub mod error;
pub mod placer;
pub mod render;
pub mod report;
pub mod strategy;

pub use background::BackgroundShape;
pub use config::{AnchorTransform, LabelShape, LabelStyle, PlacementConfig};
pub use error::{NotReadyReason, PlacementError};
pub use placer::{LabelPlacer, MIN_BOUNDED_WIDTH};
pub use render::{DepthSnapshot, RenderWindow, Renderer};
pub use report::{FrameReport, FrameStatus, PlacedLabel, Rejection, Rejections};
pub use strategy::{
    DrawCommand, DrawContent, FixedMetricStrategy, LabelContent, LabelRenderStrategy,
    StrategyCapabilities,
};
