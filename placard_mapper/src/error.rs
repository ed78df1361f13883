// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors that stop a frame before any label is considered.

/// A structural problem with the host; the frame renders no labels.
///
/// These are not fatal: the next frame simply tries again.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// No renderer was supplied.
    #[error("label placement needs a renderer")]
    MissingRenderer,

    /// The renderer is not attached to a render window.
    #[error("label placement needs a renderer attached to a render window")]
    MissingRenderWindow,
}

/// Why a frame was skipped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotReadyReason {
    /// The renderer has no active camera.
    NoCamera,
    /// The render window has not completed a render yet.
    NeverRendered,
    /// The viewport has no pixels.
    EmptyViewport,
}
