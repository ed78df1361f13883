// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Double-buffered record of the labels placed in the last two frames.

use alloc::vec::Vec;

use crate::types::SourcedId;

/// Two placed-id buffers: the frame being built and the one before it.
///
/// [`swap`](Self::swap) turns the current buffer into the previous one and
/// starts an empty current buffer, reusing the older allocation.
#[derive(Clone, Debug, Default)]
pub struct PlacedIds {
    buffers: [Vec<SourcedId>; 2],
    current: usize,
}

impl PlacedIds {
    /// Create two empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` to the current frame.
    pub fn record(&mut self, id: SourcedId) {
        self.buffers[self.current].push(id);
    }

    /// Ids recorded in the current frame.
    pub fn current(&self) -> &[SourcedId] {
        &self.buffers[self.current]
    }

    /// Ids recorded in the previous frame.
    pub fn last(&self) -> &[SourcedId] {
        &self.buffers[1 - self.current]
    }

    /// Start a new frame.
    pub fn swap(&mut self) {
        self.current = 1 - self.current;
        self.buffers[self.current].clear();
    }
}
