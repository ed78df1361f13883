// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placard Tiles: oriented label footprints and a screen-tile placement index.
//!
//! This crate is the geometric core of a non-overlapping label placer.
//!
//! - [`OrientedRect`] is a label footprint: a rectangle, possibly rotated, with
//!   precomputed projection axes for a cheap separating-axis overlap test.
//! - [`TileIndex`] is a uniform grid over the viewport. Each tile keeps the
//!   footprints placed this frame that touch it, so "does this label fit?"
//!   only looks at a handful of tiles instead of every placed label.
//! - [`PlacedIds`] double-buffers the ids placed in the current and previous
//!   frame so label sources can favour labels that were visible last frame.
//!   Ids are [`SourcedId`]s: a [`LabelId`] plus the source it came from.
//!
//! Coordinates are screen units. The index works relative to the viewport
//! origin it was created or reset with; callers translate footprints into that
//! space before querying.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use placard_tiles::{DEFAULT_TILE_SIZE, LabelId, OrientedRect, SourcedId, TileIndex};
//!
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let mut index = TileIndex::new(viewport, DEFAULT_TILE_SIZE);
//!
//! let a = OrientedRect::from_bounds(Rect::new(10.0, 10.0, 90.0, 30.0), Point::ZERO, 0.0);
//! let b = OrientedRect::from_center(Point::new(50.0, 20.0), 40.0, 10.0, 0.5);
//!
//! assert!(index.place_label(&a));
//! index.record_placed(SourcedId::new(0, LabelId(7)));
//! // `b` sits on top of `a`.
//! assert!(!index.is_spot_open(&b));
//! assert!(!index.place_label(&b));
//!
//! // Next frame: tiles are emptied and last frame's ids are kept.
//! index.reset(viewport, DEFAULT_TILE_SIZE);
//! assert!(index.place_label(&b));
//! assert_eq!(index.last_placed(), &[SourcedId::new(0, LabelId(7))]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod index;
pub mod placed;
pub mod rect;
pub mod tiles;
pub mod types;

pub use index::PlacementIndex;
pub use placed::PlacedIds;
pub use rect::OrientedRect;
pub use tiles::{DEFAULT_TILE_SIZE, TileIndex};
pub use types::{LabelId, SourcedId};
