// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement settings.

use placard_labels::IteratorType;

/// Background drawn behind each placed label.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelShape {
    /// No background.
    #[default]
    None,
    /// A rectangle around the label.
    Rect,
    /// A rectangle with corners rounded by the margin.
    RoundedRect,
}

/// How a background shape is drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelStyle {
    /// A filled polygon.
    #[default]
    Filled,
    /// A closed polyline.
    Outline,
}

/// Coordinate system label anchors are given in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnchorTransform {
    /// World coordinates, projected by the renderer.
    #[default]
    World,
    /// Display pixels; `x` and `y` are used as is.
    Display,
    /// Pixels relative to the renderer's tiled viewport origin.
    Viewport,
}

/// Settings of a [`LabelPlacer`](crate::LabelPlacer).
///
/// Fields are plain data; the setters on the placer clamp ranged values, and
/// [`sanitized`](Self::sanitized) does the same for a config built by hand
/// or deserialized.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementConfig {
    /// Fraction of the viewport area labels may cover, in `[0, 1]`.
    ///
    /// Reported against the rendered area in each
    /// [`FrameReport`](crate::FrameReport); it does not stop placement.
    pub maximum_label_fraction: f64,
    /// Traversal order requested from label sources.
    pub iterator_type: IteratorType,
    /// Text payloads are Unicode rather than plain strings.
    pub use_unicode_strings: bool,
    /// Anchors are directions on a sphere; labels facing away are culled.
    pub positions_as_normals: bool,
    /// Reserved for spoke layouts of coincident labels; has no effect.
    pub generate_perturbed_label_spokes: bool,
    /// Cull labels hidden behind geometry using the depth buffer.
    pub use_depth_buffer: bool,
    /// Draw every candidate, skipping the overlap test.
    pub place_all_labels: bool,
    /// Emit outlines of the occupied placement tiles.
    pub output_traversed_bounds: bool,
    /// Background shape.
    pub shape: LabelShape,
    /// Background style.
    pub style: LabelStyle,
    /// Space between a label and its background edge.
    pub margin: f64,
    /// Background RGB color.
    pub background_color: [f64; 3],
    /// Background opacity in `[0, 1]`.
    pub background_opacity: f64,
    /// Coordinate system of the anchors.
    pub anchor_transform: AnchorTransform,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            maximum_label_fraction: 0.05,
            iterator_type: IteratorType::default(),
            use_unicode_strings: false,
            positions_as_normals: false,
            generate_perturbed_label_spokes: false,
            use_depth_buffer: false,
            place_all_labels: false,
            output_traversed_bounds: false,
            shape: LabelShape::None,
            style: LabelStyle::Filled,
            margin: 5.0,
            background_color: [0.5, 0.5, 0.5],
            background_opacity: 1.0,
            anchor_transform: AnchorTransform::World,
        }
    }
}

impl PlacementConfig {
    /// This config with ranged fields clamped into range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.maximum_label_fraction = clamp_unit(self.maximum_label_fraction);
        self.background_opacity = clamp_unit(self.background_opacity);
        self
    }
}

/// Clamp into `[0, 1]`, mapping NaN to `0`.
pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
