// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared identifier types.

/// Stable identity of a label across frames.
///
/// Sources hand out ids; the placement engine only compares and stores them
/// so that a label placed in one frame can be recognized in the next.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelId(pub u64);

impl LabelId {
    /// The id as an index, if it fits.
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl From<usize> for LabelId {
    fn from(i: usize) -> Self {
        Self(u64::try_from(i).unwrap_or(u64::MAX))
    }
}

/// A [`LabelId`] qualified by the source that produced it.
///
/// Label ids are only unique within one source. Placed sets store this pair so
/// that sources merged into one frame never claim each other's labels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcedId {
    /// Position of the source in the frame's source list.
    pub source: usize,
    /// Id within that source.
    pub id: LabelId,
}

impl SourcedId {
    /// Label `id` of the source at position `source`.
    pub const fn new(source: usize, id: LabelId) -> Self {
        Self { source, id }
    }
}
