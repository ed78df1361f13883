// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What the placer needs from the host renderer.

use kurbo::{Point, Rect};
use placard_labels::{Camera, Vec3};

/// The window a [`Renderer`] draws into.
pub trait RenderWindow {
    /// True until the window has completed its first render.
    fn never_rendered(&self) -> bool;
}

/// Host renderer state consulted once per frame.
///
/// Display coordinates have their origin at the lower-left of the window and
/// grow right and up, in pixels.
pub trait Renderer {
    /// The window this renderer is attached to.
    fn render_window(&self) -> Option<&dyn RenderWindow>;

    /// The camera labels are viewed through.
    fn active_camera(&self) -> Option<&dyn Camera>;

    /// Viewport size in pixels.
    fn viewport_size(&self) -> (u32, u32);

    /// Size and lower-left origin of the viewport within the (possibly tiled)
    /// window: `(width, height, x, y)`.
    fn tiled_size_and_origin(&self) -> (u32, u32, i32, i32);

    /// Width over height of the tiled viewport, `1` when it is empty.
    fn tiled_aspect_ratio(&self) -> f64 {
        let (w, h, _, _) = self.tiled_size_and_origin();
        if h == 0 {
            1.0
        } else {
            f64::from(w) / f64::from(h)
        }
    }

    /// Project a world point to display coordinates.
    fn world_to_display(&self, world: Vec3) -> Point;

    /// Capture the depth buffer over `viewport`, when the host can.
    fn depth_snapshot(&self, viewport: Rect) -> Option<DepthSnapshot> {
        let _ = viewport;
        None
    }

    /// Whether `world` is hidden behind rendered geometry.
    ///
    /// The default compares the projected depth from [`depth_of`](Self::depth_of)
    /// against the snapshot.
    fn is_point_occluded(&self, world: Vec3, snapshot: &DepthSnapshot) -> bool {
        match self.depth_of(world) {
            Some(z) => snapshot.occludes(self.world_to_display(world), z, 1e-4),
            None => false,
        }
    }

    /// Normalized depth of `world` in `[0, 1]`, for the default occlusion test.
    fn depth_of(&self, world: Vec3) -> Option<f32> {
        let _ = world;
        None
    }
}

/// A copy of the depth buffer for one frame.
///
/// Owned by the placer for the duration of a frame and dropped on every exit
/// path.
#[derive(Clone, PartialEq)]
pub struct DepthSnapshot {
    origin: (i32, i32),
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl DepthSnapshot {
    /// Wrap `values`, row-major from the bottom row, for a `width` x `height`
    /// region whose lower-left pixel is `origin`.
    ///
    /// Returns `None` when `values` does not hold exactly `width * height`
    /// samples.
    pub fn new(origin: (i32, i32), width: usize, height: usize, values: Vec<f32>) -> Option<Self> {
        (width.checked_mul(height)? == values.len()).then_some(Self {
            origin,
            width,
            height,
            values,
        })
    }

    /// Lower-left pixel of the captured region.
    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Captured width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Captured height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Depth at display pixel `(x, y)`, if it lies inside the snapshot.
    pub fn depth_at(&self, x: i64, y: i64) -> Option<f32> {
        let dx = usize::try_from(x - i64::from(self.origin.0)).ok()?;
        let dy = usize::try_from(y - i64::from(self.origin.1)).ok()?;
        if dx >= self.width || dy >= self.height {
            return None;
        }
        self.values.get(dy * self.width + dx).copied()
    }

    /// True when the stored depth under `display` is nearer than `z` by more
    /// than `tolerance`. Points outside the snapshot are never occluded.
    pub fn occludes(&self, display: Point, z: f32, tolerance: f32) -> bool {
        let (x, y) = (round_to_i64(display.x), round_to_i64(display.y));
        self.depth_at(x, y).is_some_and(|stored| stored + tolerance < z)
    }
}

impl core::fmt::Debug for DepthSnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DepthSnapshot")
            .field("origin", &self.origin)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "display coordinates are far inside the i64 range"
)]
pub(crate) fn round_to_i64(v: f64) -> i64 {
    v.round() as i64
}
