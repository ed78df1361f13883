// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placard Labels: label candidates and the source traversal protocol.
//!
//! A placement engine does not own labels. It asks one or more
//! [`LabelSource`]s for a prioritized candidate sequence each frame, merges
//! them round-robin, and keeps whatever fits.
//!
//! - [`LabelCandidate`]: one label offered for a frame (id, type, anchor,
//!   payload, shared [`TextProperty`], optional orientation and bounded size).
//! - [`Camera`] / [`Frustum`]: the view state sources cull against.
//! - [`LabelSource`]: produces a single-pass, most-important-first sequence
//!   for a [`TraversalContext`], optionally favouring last frame's labels.
//! - [`RoundRobin`] and [`LabelTraversal`]: merge several sources fairly.
//! - [`LabelHierarchy`]: a simple in-memory source supporting the
//!   [`IteratorType`] orders.
//!
//! # Example
//!
//! ```rust
//! use placard_labels::{
//!     FixedCamera, IteratorType, LabelHierarchy, LabelRecord, LabelSource, LabelTraversal,
//!     TextProperty, TraversalContext, Vec3,
//! };
//! use placard_tiles::DEFAULT_TILE_SIZE;
//!
//! let mut cities = LabelHierarchy::new(TextProperty::default());
//! cities.push(LabelRecord::text(Vec3::new(0.0, 0.0, 0.0), "Springfield").with_priority(2.0));
//! cities.push(LabelRecord::text(Vec3::new(5.0, 1.0, 0.0), "Shelbyville").with_priority(8.0));
//!
//! let mut rivers = LabelHierarchy::new(TextProperty::default());
//! rivers.push(LabelRecord::text(Vec3::new(2.0, 2.0, 0.0), "Mill Creek"));
//!
//! let camera = FixedCamera::default();
//! let ctx = TraversalContext {
//!     camera: &camera,
//!     frustum: camera.frustum,
//!     positions_as_normals: false,
//!     tile_size: DEFAULT_TILE_SIZE,
//!     iterator_type: IteratorType::FullSort,
//! };
//!
//! let sources: [&dyn LabelSource; 2] = [&cities, &rivers];
//! let texts: Vec<_> = LabelTraversal::from_sources(&sources, &ctx, &[])
//!     .map(|c| c.text)
//!     .collect();
//! assert_eq!(texts, ["Shelbyville", "Mill Creek", "Springfield"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod camera;
pub mod hierarchy;
pub mod source;
pub mod traversal;
pub mod types;

pub use camera::{Camera, FixedCamera, Frustum, Plane};
pub use hierarchy::{LabelHierarchy, LabelRecord};
pub use placard_tiles::{LabelId, SourcedId};
pub use source::{IteratorType, LabelSource, TraversalContext};
pub use traversal::{LabelTraversal, RoundRobin, TraversalState};
pub use types::{
    FontFamily, FontStyle, HorizontalJustification, LabelCandidate, LabelType, TextProperty,
    Vec3, VerticalJustification,
};
