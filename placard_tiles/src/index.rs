// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trait for spatial structures that accept or refuse label footprints.

use alloc::boxed::Box;

use kurbo::{Rect, Size};

use crate::rect::OrientedRect;
use crate::types::SourcedId;

/// Spatial structure used by a placement engine to keep labels apart.
///
/// [`TileIndex`](crate::TileIndex) is the provided implementation; the trait
/// exists so an engine can be driven with an instrumented or alternative
/// structure.
pub trait PlacementIndex {
    /// Create a structure covering `viewport`.
    fn new(viewport: Rect, tile_size: Size) -> Self
    where
        Self: Sized;

    /// Forget this frame's rectangles, cover `viewport`, and rotate the placed-id buffers.
    fn reset(&mut self, viewport: Rect, tile_size: Size);

    /// Whether `rect` would fit without overlapping a placed rectangle.
    fn is_spot_open(&self, rect: &OrientedRect) -> bool;

    /// Place `rect` if it fits, returning whether it was placed.
    fn place_label(&mut self, rect: &OrientedRect) -> bool;

    /// Record a label placed in the current frame.
    fn record_placed(&mut self, id: SourcedId);

    /// Labels placed during the previous frame, in placement order.
    fn last_placed(&self) -> &[SourcedId];

    /// Screen-space regions holding placements, for debug output.
    fn occupied_tiles<'a>(&'a self) -> Box<dyn Iterator<Item = Rect> + 'a>;
}
