// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Oriented label footprints and the separating-axis overlap test.

use kurbo::{Point, Rect, Vec2};

/// Screen-space footprint of a label: a rectangle rotated about some origin.
///
/// Corner `0` is the lower-left corner of the unrotated rectangle; the rest
/// follow counter-clockwise. Two projection axes are kept alongside the
/// corners, each scaled by the inverse of its squared edge length so that
/// projecting a point onto an axis yields `origin` at corner `0` and
/// `origin + 1` at the far edge.
///
/// Zero-sized rectangles are never useful as footprints; callers reject them
/// before construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrientedRect {
    corners: [Point; 4],
    axis: [Vec2; 2],
    origin: [f64; 2],
    bounds: Rect,
    rotation: f64,
}

impl OrientedRect {
    /// Build a rectangle of `width` × `height` centered on `center` and rotated
    /// by `rotation` radians.
    pub fn from_center(center: Point, width: f64, height: f64, rotation: f64) -> Self {
        let dir = Vec2::from_angle(rotation);
        let x = dir * (0.5 * width);
        let y = Vec2::new(-dir.y, dir.x) * (0.5 * height);
        let corners = [
            center - x - y,
            center + x - y,
            center + x + y,
            center - x + y,
        ];
        Self::with_corners(corners, rotation)
    }

    /// Build a rectangle from axis-aligned `bounds`, then rotate it by
    /// `rotation` radians about `rotation_origin`.
    pub fn from_bounds(bounds: Rect, rotation_origin: Point, rotation: f64) -> Self {
        let b = bounds.abs();
        let mut corners = [
            Point::new(b.x0, b.y0),
            Point::new(b.x1, b.y0),
            Point::new(b.x1, b.y1),
            Point::new(b.x0, b.y1),
        ];
        if rotation != 0.0 {
            let Vec2 { x: c, y: s } = Vec2::from_angle(rotation);
            for p in &mut corners {
                let d = *p - rotation_origin;
                *p = rotation_origin + Vec2::new(c * d.x - s * d.y, s * d.x + c * d.y);
            }
        }
        Self::with_corners(corners, rotation)
    }

    fn with_corners(corners: [Point; 4], rotation: f64) -> Self {
        let mut axis = [corners[1] - corners[0], corners[3] - corners[0]];
        for a in &mut axis {
            let len2 = a.hypot2();
            if len2 > 0.0 {
                *a = *a / len2;
            }
        }
        let base = corners[0].to_vec2();
        let origin = [base.dot(axis[0]), base.dot(axis[1])];
        let bounds = corners[2..]
            .iter()
            .fold(Rect::from_points(corners[0], corners[1]), |r, &p| {
                r.union_pt(p)
            });
        Self {
            corners,
            axis,
            origin,
            bounds,
            rotation,
        }
    }

    /// Corners in counter-clockwise order, starting at the unrotated lower-left.
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// Axis-aligned bounds of the four corners.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Rotation in radians this rectangle was built with.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// True when the rectangle was built without rotation.
    pub fn is_axis_aligned(&self) -> bool {
        self.rotation == 0.0
    }

    /// Area of the footprint (not of its axis-aligned bounds).
    pub fn area(&self) -> f64 {
        let a = (self.corners[1] - self.corners[0]).cross(self.corners[3] - self.corners[0]);
        if a < 0.0 { -a } else { a }
    }

    /// A copy of this rectangle moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        let c = self.corners;
        Self::with_corners(
            [c[0] + offset, c[1] + offset, c[2] + offset, c[3] + offset],
            self.rotation,
        )
    }

    /// Whether this rectangle and `other` overlap.
    ///
    /// Unrotated pairs use a strict axis-aligned test, so rectangles that only
    /// share an edge do not overlap. Rotated pairs run the projection test
    /// from both sides.
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.is_axis_aligned() && other.is_axis_aligned() {
            let (a0, a2) = (self.corners[0], self.corners[2]);
            let (b0, b2) = (other.corners[0], other.corners[2]);
            return a0.x - b2.x < 0.0
                && b0.x - a2.x < 0.0
                && a0.y - b2.y < 0.0
                && b0.y - a2.y < 0.0;
        }
        self.overlaps_one_way(other) && other.overlaps_one_way(self)
    }

    /// Projects `other` onto this rectangle's two axes and reports overlap
    /// unless one axis separates them.
    fn overlaps_one_way(&self, other: &Self) -> bool {
        for (axis, origin) in self.axis.iter().zip(self.origin) {
            let mut t_min = f64::INFINITY;
            let mut t_max = f64::NEG_INFINITY;
            for c in &other.corners {
                let t = c.to_vec2().dot(*axis);
                t_min = t_min.min(t);
                t_max = t_max.max(t);
            }
            if t_min > 1.0 + origin || t_max < origin {
                return false;
            }
        }
        true
    }
}
