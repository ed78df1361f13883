// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What happened during one frame.

use kurbo::{Point, Rect};
use placard_labels::{LabelId, LabelType};
use placard_tiles::{OrientedRect, SourcedId};

use crate::background::BackgroundShape;
use crate::error::NotReadyReason;

/// Whether a frame ran.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Candidates were traversed.
    Rendered,
    /// The frame was skipped; the next one will try again.
    NotReady(NotReadyReason),
}

/// Why a candidate was not drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Neither text nor icon.
    UnsupportedType,
    /// Culled by the eye-position test.
    BehindCamera,
    /// Anchor normal points away from the viewer.
    FacingAway,
    /// Hidden by rendered geometry.
    Occluded,
    /// Measured zero wide or zero tall.
    ZeroSize,
    /// Entirely outside the viewport.
    OffScreen,
    /// An icon carrying a bounded size.
    BoundedIcon,
    /// Bounded slot narrower than the minimum width.
    BoundedTooNarrow,
    /// Bounded slot shorter than the label.
    BoundedTooShort,
    /// Overlaps a label placed earlier this frame.
    Overlap,
}

/// Per-reason rejection counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rejections {
    /// [`Rejection::UnsupportedType`].
    pub unsupported_type: usize,
    /// [`Rejection::BehindCamera`].
    pub behind_camera: usize,
    /// [`Rejection::FacingAway`].
    pub facing_away: usize,
    /// [`Rejection::Occluded`].
    pub occluded: usize,
    /// [`Rejection::ZeroSize`].
    pub zero_size: usize,
    /// [`Rejection::OffScreen`].
    pub off_screen: usize,
    /// [`Rejection::BoundedIcon`].
    pub bounded_icon: usize,
    /// [`Rejection::BoundedTooNarrow`] and [`Rejection::BoundedTooShort`].
    pub bounded_too_small: usize,
    /// [`Rejection::Overlap`].
    pub overlap: usize,
}

impl Rejections {
    /// Count one rejection.
    pub fn record(&mut self, rejection: Rejection) {
        let slot = match rejection {
            Rejection::UnsupportedType => &mut self.unsupported_type,
            Rejection::BehindCamera => &mut self.behind_camera,
            Rejection::FacingAway => &mut self.facing_away,
            Rejection::Occluded => &mut self.occluded,
            Rejection::ZeroSize => &mut self.zero_size,
            Rejection::OffScreen => &mut self.off_screen,
            Rejection::BoundedIcon => &mut self.bounded_icon,
            Rejection::BoundedTooNarrow | Rejection::BoundedTooShort => {
                &mut self.bounded_too_small
            }
            Rejection::Overlap => &mut self.overlap,
        };
        *slot += 1;
    }

    /// Sum over every reason.
    pub fn total(&self) -> usize {
        self.unsupported_type
            + self.behind_camera
            + self.facing_away
            + self.occluded
            + self.zero_size
            + self.off_screen
            + self.bounded_icon
            + self.bounded_too_small
            + self.overlap
    }
}

/// A label drawn this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLabel {
    /// Id within its source.
    pub id: LabelId,
    /// Position of the label's source in the frame's source list.
    pub source: usize,
    /// Text or icon.
    pub label_type: LabelType,
    /// Unrotated display-space box.
    pub screen_rect: Rect,
    /// Display-space footprint, rotated when the label is.
    pub footprint: OrientedRect,
    /// Placed into its bounded slot, bypassing the overlap test.
    pub bounded: bool,
}

/// Summary of one call to [`LabelPlacer::render_overlay`](crate::LabelPlacer::render_overlay).
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Whether the frame ran.
    pub status: FrameStatus,
    /// Accepted labels in drawing order.
    pub placed: Vec<PlacedLabel>,
    /// Candidates pulled from the traversal.
    pub considered: usize,
    /// Summed area of the drawn labels; bounded labels count their clipped area.
    pub rendered_area: f64,
    /// Viewport area times the maximum label fraction.
    pub allowable_area: f64,
    /// Why the other candidates were skipped.
    pub rejections: Rejections,
    /// Backgrounds for the placed labels, in drawing order.
    pub backgrounds: Vec<BackgroundShape>,
    /// Closed display-space outlines of the occupied index tiles.
    pub traversed_bounds: Vec<Vec<Point>>,
}

impl FrameReport {
    pub(crate) fn new(status: FrameStatus) -> Self {
        Self {
            status,
            placed: Vec::new(),
            considered: 0,
            rendered_area: 0.0,
            allowable_area: 0.0,
            rejections: Rejections::default(),
            backgrounds: Vec::new(),
            traversed_bounds: Vec::new(),
        }
    }

    pub(crate) fn not_ready(reason: NotReadyReason) -> Self {
        Self::new(FrameStatus::NotReady(reason))
    }

    /// True when the frame traversed its candidates.
    pub fn is_rendered(&self) -> bool {
        self.status == FrameStatus::Rendered
    }

    /// True when the drawn labels cover more than the allowable area.
    pub fn budget_exceeded(&self) -> bool {
        self.rendered_area > self.allowable_area
    }

    /// Source-qualified ids of the placed labels, in drawing order.
    pub fn placed_ids(&self) -> impl Iterator<Item = SourcedId> + '_ {
        self.placed.iter().map(|p| SourcedId::new(p.source, p.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_count_by_reason() {
        let mut r = Rejections::default();
        r.record(Rejection::Overlap);
        r.record(Rejection::Overlap);
        r.record(Rejection::BoundedTooShort);
        r.record(Rejection::BoundedTooNarrow);
        r.record(Rejection::OffScreen);
        assert_eq!(r.overlap, 2);
        assert_eq!(r.bounded_too_small, 2);
        assert_eq!(r.off_screen, 1);
        assert_eq!(r.total(), 5);
    }

    #[test]
    fn budget_compares_rendered_against_allowable() {
        let mut report = FrameReport::new(FrameStatus::Rendered);
        report.allowable_area = 100.0;
        report.rendered_area = 100.0;
        assert!(!report.budget_exceeded());
        report.rendered_area = 100.5;
        assert!(report.budget_exceeded());
        assert!(report.is_rendered());
        assert!(!FrameReport::not_ready(NotReadyReason::NoCamera).is_rendered());
    }
}
