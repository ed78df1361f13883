// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The label-source protocol.

use alloc::boxed::Box;
use alloc::sync::Arc;

use kurbo::Size;
use placard_tiles::LabelId;

use crate::camera::{Camera, Frustum};
use crate::types::{LabelCandidate, TextProperty};

/// Traversal order requested from label sources.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IteratorType {
    /// Every visible label, highest priority first.
    FullSort,
    /// Labels placed last frame first, then the rest by priority.
    #[default]
    Queue,
    /// Visible labels in storage order.
    Frustum,
}

/// Per-frame view state handed to every source.
#[derive(Copy, Clone)]
pub struct TraversalContext<'a> {
    /// Active camera.
    pub camera: &'a dyn Camera,
    /// View frustum for the current viewport.
    pub frustum: Frustum,
    /// Anchors are directions on a sphere rather than positions.
    pub positions_as_normals: bool,
    /// Screen tile size of the placement index, for level-of-detail decisions.
    pub tile_size: Size,
    /// Requested traversal order.
    pub iterator_type: IteratorType,
}

impl core::fmt::Debug for TraversalContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TraversalContext")
            .field("frustum", &self.frustum)
            .field("positions_as_normals", &self.positions_as_normals)
            .field("tile_size", &self.tile_size)
            .field("iterator_type", &self.iterator_type)
            .finish_non_exhaustive()
    }
}

/// A producer of prioritized label candidates.
///
/// Each frame the engine asks every source for a fresh candidate sequence.
/// Sequences are single-pass: once drained they are dropped and a new one is
/// requested next frame. Stopping early is always allowed.
pub trait LabelSource {
    /// Text property shared by this source's labels.
    fn text_property(&self) -> &Arc<TextProperty>;

    /// Whether candidates carry a per-label orientation.
    ///
    /// When false, the engine ignores [`LabelCandidate::orientation`].
    fn has_orientations(&self) -> bool {
        false
    }

    /// Whether candidates carry a bounded size.
    ///
    /// When false, the engine ignores [`LabelCandidate::bounded_size`].
    fn has_bounded_sizes(&self) -> bool {
        false
    }

    /// Number of labels this source holds.
    fn label_count(&self) -> usize;

    /// Candidates for this frame, most important first.
    ///
    /// `last_placed` lists this source's ids placed during the previous frame,
    /// in placement order; sources may favour them for stability.
    fn candidates<'a>(
        &'a self,
        ctx: &TraversalContext<'_>,
        last_placed: &[LabelId],
    ) -> Box<dyn Iterator<Item = LabelCandidate> + 'a>;
}
