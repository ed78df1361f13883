// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera state consumed by label sources and the placement engine.

use crate::types::Vec3;

/// A plane `normal · p + d = 0`. Points with a non-negative value are inside.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Plane {
    /// Inward-facing normal (not necessarily unit length).
    pub normal: Vec3,
    /// Offset.
    pub d: f64,
}

impl Plane {
    /// Create a plane from its normal and offset.
    pub const fn new(normal: Vec3, d: f64) -> Self {
        Self { normal, d }
    }

    /// Create a plane from `[a, b, c, d]` coefficients.
    pub const fn from_coefficients([a, b, c, d]: [f64; 4]) -> Self {
        Self::new(Vec3::new(a, b, c), d)
    }

    /// Signed value of `p` (scaled by the normal's length).
    pub fn evaluate(&self, p: Vec3) -> f64 {
        self.normal.dot(p) + self.d
    }
}

/// The six view-frustum planes (left, right, bottom, top, near, far).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Frustum(pub [Plane; 6]);

impl Frustum {
    /// A frustum that contains every point.
    pub const UNBOUNDED: Self = Self([Plane::new(Vec3::ZERO, 0.0); 6]);

    /// Whether `p` is on the inner side of all six planes.
    pub fn contains(&self, p: Vec3) -> bool {
        self.0.iter().all(|plane| plane.evaluate(p) >= 0.0)
    }
}

/// The camera of the renderer labels are placed for.
///
/// Hosts implement this over their own camera; [`FixedCamera`] is a plain-data
/// implementation.
pub trait Camera {
    /// Eye position in world space.
    fn position(&self) -> Vec3;

    /// Point the camera looks at.
    fn focal_point(&self) -> Vec3;

    /// Up direction.
    fn view_up(&self) -> Vec3;

    /// Normal of the view plane, pointing from the focal point toward the eye.
    fn view_plane_normal(&self) -> Vec3;

    /// Half the viewport height in world units for parallel projection.
    fn parallel_scale(&self) -> f64;

    /// Frustum planes for a viewport with the given width/height ratio.
    fn frustum_planes(&self, aspect: f64) -> Frustum;
}

/// A camera whose state, including its frustum, is set directly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedCamera {
    /// Eye position.
    pub position: Vec3,
    /// Focal point.
    pub focal_point: Vec3,
    /// Up direction.
    pub view_up: Vec3,
    /// View-plane normal (focal point toward eye).
    pub view_plane_normal: Vec3,
    /// Parallel scale.
    pub parallel_scale: f64,
    /// Frustum returned for every aspect ratio.
    pub frustum: Frustum,
}

impl Default for FixedCamera {
    /// Looking down the negative z axis from `(0, 0, 1)` with an unbounded frustum.
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            focal_point: Vec3::ZERO,
            view_up: Vec3::new(0.0, 1.0, 0.0),
            view_plane_normal: Vec3::new(0.0, 0.0, 1.0),
            parallel_scale: 1.0,
            frustum: Frustum::UNBOUNDED,
        }
    }
}

impl Camera for FixedCamera {
    fn position(&self) -> Vec3 {
        self.position
    }
    fn focal_point(&self) -> Vec3 {
        self.focal_point
    }
    fn view_up(&self) -> Vec3 {
        self.view_up
    }
    fn view_plane_normal(&self) -> Vec3 {
        self.view_plane_normal
    }
    fn parallel_scale(&self) -> f64 {
        self.parallel_scale
    }
    fn frustum_planes(&self, _aspect: f64) -> Frustum {
        self.frustum
    }
}
