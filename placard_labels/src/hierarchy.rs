// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory label source.

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Size;
use placard_tiles::LabelId;

use crate::source::{IteratorType, LabelSource, TraversalContext};
use crate::types::{LabelCandidate, LabelType, TextProperty, Vec3};

/// One stored label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelRecord {
    /// World-space anchor.
    pub anchor: Vec3,
    /// Type code: `0` text, `1` icon.
    pub type_code: i32,
    /// Text payload.
    pub text: String,
    /// Icon payload.
    pub icon_index: u32,
    /// Higher is more important.
    pub priority: f64,
    /// Per-label orientation in degrees.
    pub orientation: Option<f64>,
    /// World-space slot the label must fit in.
    pub bounded_size: Option<Size>,
}

impl LabelRecord {
    /// A text label with priority `0`.
    pub fn text(anchor: Vec3, text: impl Into<String>) -> Self {
        Self {
            anchor,
            type_code: LabelType::Text.code(),
            text: text.into(),
            icon_index: 0,
            priority: 0.0,
            orientation: None,
            bounded_size: None,
        }
    }

    /// An icon label with priority `0`.
    pub fn icon(anchor: Vec3, icon_index: u32) -> Self {
        Self {
            type_code: LabelType::Icon.code(),
            icon_index,
            ..Self::text(anchor, String::new())
        }
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    /// Set the orientation in degrees.
    #[must_use]
    pub fn with_orientation(mut self, degrees: f64) -> Self {
        self.orientation = Some(degrees);
        self
    }

    /// Set the bounded size.
    #[must_use]
    pub fn with_bounded_size(mut self, size: Size) -> Self {
        self.bounded_size = Some(size);
        self
    }

    /// Override the raw type code.
    #[must_use]
    pub fn with_type_code(mut self, code: i32) -> Self {
        self.type_code = code;
        self
    }
}

/// A flat, in-memory collection of labels sharing one text property.
///
/// Label ids are insertion indices. The traversal order follows the
/// [`IteratorType`] in the [`TraversalContext`]:
///
/// - [`IteratorType::FullSort`]: visible labels by descending priority, ties
///   in insertion order; the last-placed set is ignored.
/// - [`IteratorType::Queue`]: visible labels placed last frame, in their
///   placed order, then the remaining visible labels by descending priority.
/// - [`IteratorType::Frustum`]: visible labels in insertion order.
///
/// A label is visible when its anchor lies in the frustum. With
/// `positions_as_normals` anchors are directions and every label is visible;
/// facing is left to the engine.
#[derive(Clone, Debug)]
pub struct LabelHierarchy {
    text_property: Arc<TextProperty>,
    records: Vec<LabelRecord>,
}

impl LabelHierarchy {
    /// Create an empty hierarchy whose labels are drawn with `text_property`.
    pub fn new(text_property: TextProperty) -> Self {
        Self {
            text_property: Arc::new(text_property),
            records: Vec::new(),
        }
    }

    /// Add a label and return its id.
    pub fn push(&mut self, record: LabelRecord) -> LabelId {
        self.records.push(record);
        LabelId::from(self.records.len() - 1)
    }

    /// Replace the shared text property.
    pub fn set_text_property(&mut self, text_property: TextProperty) {
        self.text_property = Arc::new(text_property);
    }

    /// The stored record for `id`.
    pub fn get(&self, id: LabelId) -> Option<&LabelRecord> {
        self.records.get(id.index()?)
    }

    /// Number of stored labels.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no labels are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn candidate(&self, idx: usize) -> LabelCandidate {
        let r = &self.records[idx];
        LabelCandidate {
            id: LabelId::from(idx),
            source: 0,
            label_type: LabelType::from_code(r.type_code),
            anchor: r.anchor,
            text: r.text.clone(),
            icon_index: r.icon_index,
            text_property: Arc::clone(&self.text_property),
            orientation: r.orientation,
            bounded_size: r.bounded_size,
            priority: r.priority,
        }
    }

    fn visible_indices(&self, ctx: &TraversalContext<'_>) -> Vec<usize> {
        (0..self.records.len())
            .filter(|&i| ctx.positions_as_normals || ctx.frustum.contains(self.records[i].anchor))
            .collect()
    }

    fn sort_by_priority(&self, order: &mut [usize]) {
        order.sort_by(|&a, &b| {
            self.records[b]
                .priority
                .total_cmp(&self.records[a].priority)
        });
    }

    fn traversal_order(&self, ctx: &TraversalContext<'_>, last_placed: &[LabelId]) -> Vec<usize> {
        let mut visible = self.visible_indices(ctx);
        match ctx.iterator_type {
            IteratorType::Frustum => visible,
            IteratorType::FullSort => {
                self.sort_by_priority(&mut visible);
                visible
            }
            IteratorType::Queue => {
                let candidates: BTreeSet<usize> = visible.iter().copied().collect();
                let mut seen = BTreeSet::new();
                let mut order: Vec<usize> = last_placed
                    .iter()
                    .filter_map(|id| id.index())
                    .filter(|i| candidates.contains(i) && seen.insert(*i))
                    .collect();
                visible.retain(|i| !seen.contains(i));
                self.sort_by_priority(&mut visible);
                order.extend(visible);
                order
            }
        }
    }
}

impl LabelSource for LabelHierarchy {
    fn text_property(&self) -> &Arc<TextProperty> {
        &self.text_property
    }

    fn has_orientations(&self) -> bool {
        self.records.iter().any(|r| r.orientation.is_some())
    }

    fn has_bounded_sizes(&self) -> bool {
        self.records.iter().any(|r| r.bounded_size.is_some())
    }

    fn label_count(&self) -> usize {
        self.records.len()
    }

    fn candidates<'a>(
        &'a self,
        ctx: &TraversalContext<'_>,
        last_placed: &[LabelId],
    ) -> Box<dyn Iterator<Item = LabelCandidate> + 'a> {
        let order = self.traversal_order(ctx, last_placed);
        Box::new(order.into_iter().map(move |i| self.candidate(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    use crate::camera::{FixedCamera, Frustum, Plane};
    use placard_tiles::DEFAULT_TILE_SIZE;

    fn ids(source: &LabelHierarchy, ctx: &TraversalContext<'_>, last: &[LabelId]) -> Vec<u64> {
        source.candidates(ctx, last).map(|c| c.id.0).collect()
    }

    fn sample() -> LabelHierarchy {
        let mut h = LabelHierarchy::new(TextProperty::default());
        h.push(LabelRecord::text(Vec3::new(0.0, 0.0, 0.0), "low").with_priority(1.0));
        h.push(LabelRecord::text(Vec3::new(1.0, 0.0, 0.0), "high").with_priority(9.0));
        h.push(LabelRecord::icon(Vec3::new(2.0, 0.0, 0.0), 3).with_priority(5.0));
        h.push(LabelRecord::text(Vec3::new(-5.0, 0.0, 0.0), "hidden").with_priority(100.0));
        h.push(LabelRecord::text(Vec3::new(3.0, 0.0, 0.0), "tie").with_priority(5.0));
        h
    }

    fn context(camera: &FixedCamera, iterator_type: IteratorType) -> TraversalContext<'_> {
        TraversalContext {
            camera,
            frustum: camera.frustum,
            positions_as_normals: false,
            tile_size: DEFAULT_TILE_SIZE,
            iterator_type,
        }
    }

    fn camera_excluding_negative_x() -> FixedCamera {
        let mut planes = Frustum::UNBOUNDED;
        planes.0[0] = Plane::from_coefficients([1.0, 0.0, 0.0, 0.0]);
        FixedCamera {
            frustum: planes,
            ..FixedCamera::default()
        }
    }

    #[test]
    fn full_sort_orders_by_priority_and_culls() {
        let h = sample();
        let cam = camera_excluding_negative_x();
        let ctx = context(&cam, IteratorType::FullSort);
        assert_eq!(ids(&h, &ctx, &[LabelId(0)]), vec![1, 2, 4, 0]);
    }

    #[test]
    fn frustum_order_keeps_storage_order() {
        let h = sample();
        let cam = camera_excluding_negative_x();
        let ctx = context(&cam, IteratorType::Frustum);
        assert_eq!(ids(&h, &ctx, &[]), vec![0, 1, 2, 4]);
    }

    #[test]
    fn queue_puts_last_placed_first_without_repeats() {
        let h = sample();
        let cam = camera_excluding_negative_x();
        let ctx = context(&cam, IteratorType::Queue);
        // 3 is culled, 42 does not exist, 0 is listed twice.
        let last = [LabelId(0), LabelId(3), LabelId(42), LabelId(0), LabelId(4)];
        assert_eq!(ids(&h, &ctx, &last), vec![0, 4, 1, 2]);
        assert_eq!(ids(&h, &ctx, &[]), vec![1, 2, 4, 0]);
    }

    #[test]
    fn positions_as_normals_skips_frustum_culling() {
        let h = sample();
        let cam = camera_excluding_negative_x();
        let ctx = TraversalContext {
            positions_as_normals: true,
            ..context(&cam, IteratorType::FullSort)
        };
        assert_eq!(ids(&h, &ctx, &[]), vec![3, 1, 2, 4, 0]);
    }

    #[test]
    fn candidates_carry_record_payloads() {
        let mut h = sample();
        let id = h.push(
            LabelRecord::text(Vec3::new(4.0, 0.0, 0.0), "rot")
                .with_orientation(30.0)
                .with_bounded_size(Size::new(2.0, 1.0))
                .with_priority(-1.0),
        );
        assert!(h.has_orientations());
        assert!(h.has_bounded_sizes());
        assert_eq!(h.label_count(), 6);

        let cam = FixedCamera::default();
        let ctx = context(&cam, IteratorType::Frustum);
        let all: Vec<_> = h.candidates(&ctx, &[]).collect();
        let icon = &all[2];
        assert_eq!(icon.label_type, LabelType::Icon);
        assert_eq!(icon.icon_index, 3);
        let rot = all.iter().find(|c| c.id == id).unwrap();
        assert_eq!(rot.text, "rot");
        assert_eq!(rot.orientation, Some(30.0));
        assert_eq!(rot.bounded_size, Some(Size::new(2.0, 1.0)));
        assert!(Arc::ptr_eq(&rot.text_property, h.text_property()));
    }

    #[test]
    fn unknown_type_codes_are_passed_through() {
        let mut h = LabelHierarchy::new(TextProperty::default());
        h.push(LabelRecord::text(Vec3::ZERO, "odd").with_type_code(4));
        let cam = FixedCamera::default();
        let ctx = context(&cam, IteratorType::Queue);
        let c = h.candidates(&ctx, &[]).next().unwrap();
        assert_eq!(c.label_type, LabelType::Other(4));
        assert!(!h.has_orientations());
    }
}
