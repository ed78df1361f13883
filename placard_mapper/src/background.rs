// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background shapes drawn behind placed labels.

use core::f64::consts::FRAC_1_SQRT_2;

use kurbo::{Point, Vec2};
use placard_tiles::OrientedRect;

use crate::config::{LabelShape, LabelStyle, PlacementConfig, clamp_unit};

/// A polygon or polyline for the host to draw behind a label.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundShape {
    /// Display-space points in counter-clockwise order.
    ///
    /// Closed outlines repeat the first point at the end.
    pub points: Vec<Point>,
    /// Fill or outline.
    pub style: LabelStyle,
    /// RGB color.
    pub color: [f64; 3],
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl BackgroundShape {
    /// The configured shape around `label`, or `None` when
    /// [`LabelShape::None`] is selected.
    ///
    /// `label` is in display coordinates; its first corner is the lower-left
    /// one of the unrotated box.
    pub fn around(label: &OrientedRect, config: &PlacementConfig) -> Option<Self> {
        let points = match config.shape {
            LabelShape::None => return None,
            LabelShape::Rect => rect_points(label, config.margin, config.style),
            LabelShape::RoundedRect => rounded_rect_points(label, config.margin),
        };
        Some(Self {
            points,
            style: config.style,
            color: config.background_color,
            opacity: clamp_unit(config.background_opacity),
        })
    }
}

/// Unit vectors along the label's bottom and left edges.
fn unit_axes(label: &OrientedRect) -> (Vec2, Vec2) {
    let (sin, cos) = label.rotation().sin_cos();
    (Vec2::new(cos, sin), Vec2::new(-sin, cos))
}

fn rect_points(label: &OrientedRect, margin: f64, style: LabelStyle) -> Vec<Point> {
    let (u, v) = unit_axes(label);
    let (u, v) = (u * margin, v * margin);
    let [c0, c1, c2, c3] = *label.corners();
    let mut points = vec![c0 - u - v, c1 + u - v, c2 + u + v, c3 - u + v];
    if style == LabelStyle::Outline {
        points.push(points[0]);
    }
    points
}

/// Three points per corner on a quarter arc of radius `margin` centered on
/// the corner, then the first point again.
fn rounded_rect_points(label: &OrientedRect, margin: f64) -> Vec<Point> {
    let (u, v) = unit_axes(label);
    let (u, v) = (u * margin, v * margin);
    let d = FRAC_1_SQRT_2;
    let [c0, c1, c2, c3] = *label.corners();
    let mut points = Vec::with_capacity(13);
    points.extend([c0 - u, c0 - (u + v) * d, c0 - v]);
    points.extend([c1 - v, c1 + (u - v) * d, c1 + u]);
    points.extend([c2 + u, c2 + (u + v) * d, c2 + v]);
    points.extend([c3 + v, c3 + (v - u) * d, c3 - u]);
    points.push(points[0]);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn config(shape: LabelShape, style: LabelStyle) -> PlacementConfig {
        PlacementConfig {
            shape,
            style,
            margin: 2.0,
            background_color: [0.1, 0.2, 0.3],
            background_opacity: 0.5,
            ..PlacementConfig::default()
        }
    }

    fn shape(label: &OrientedRect, shape: LabelShape, style: LabelStyle) -> Option<BackgroundShape> {
        BackgroundShape::around(label, &config(shape, style))
    }

    fn label() -> OrientedRect {
        OrientedRect::from_bounds(Rect::new(10.0, 20.0, 30.0, 30.0), Point::new(10.0, 20.0), 0.0)
    }

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn no_shape_means_no_background() {
        assert!(shape(&label(), LabelShape::None, LabelStyle::Filled).is_none());
    }

    #[test]
    fn filled_rect_grows_by_margin() {
        let bg = shape(&label(), LabelShape::Rect, LabelStyle::Filled).unwrap();
        assert_eq!(
            bg.points,
            vec![
                Point::new(8.0, 18.0),
                Point::new(32.0, 18.0),
                Point::new(32.0, 32.0),
                Point::new(8.0, 32.0),
            ]
        );
        assert_eq!(bg.color, [0.1, 0.2, 0.3]);
        assert_eq!(bg.opacity, 0.5);
        assert_eq!(bg.style, LabelStyle::Filled);
    }

    #[test]
    fn outline_rect_is_closed() {
        let bg = shape(&label(), LabelShape::Rect, LabelStyle::Outline).unwrap();
        assert_eq!(bg.points.len(), 5);
        assert_eq!(bg.points[4], bg.points[0]);
    }

    #[test]
    fn rounded_rect_has_thirteen_points_on_corner_arcs() {
        let l = label();
        for style in [LabelStyle::Filled, LabelStyle::Outline] {
            let bg = shape(&l, LabelShape::RoundedRect, style).unwrap();
            assert_eq!(bg.points.len(), 13);
            assert_eq!(bg.points[12], bg.points[0]);
            for (i, p) in bg.points[..12].iter().enumerate() {
                let corner = l.corners()[i / 3];
                assert!(((*p - corner).hypot() - 2.0).abs() < 1e-9, "point {i}");
            }
        }
        let bg = shape(&l, LabelShape::RoundedRect, LabelStyle::Filled).unwrap();
        assert!(close(bg.points[0], Point::new(8.0, 20.0)));
        assert!(close(bg.points[2], Point::new(10.0, 18.0)));
        assert!(close(bg.points[7], Point::new(30.0 + 2.0_f64.sqrt(), 30.0 + 2.0_f64.sqrt())));
    }

    #[test]
    fn rotated_rect_margin_follows_label_axes() {
        let quarter = core::f64::consts::FRAC_PI_2;
        let l = OrientedRect::from_bounds(Rect::new(0.0, 0.0, 10.0, 4.0), Point::ZERO, quarter);
        let bg = shape(&l, LabelShape::Rect, LabelStyle::Filled).unwrap();
        // The bottom edge now points up; the first corner moves down and right.
        assert!(close(bg.points[0], Point::new(2.0, -2.0)));
        assert!(close(bg.points[2], Point::new(-6.0, 12.0)));
    }
}
