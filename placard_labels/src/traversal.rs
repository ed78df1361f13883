// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Merging candidate sequences from several sources.
//!
//! [`RoundRobin`] interleaves any number of iterators, taking one item from
//! each in turn and dropping iterators as they run dry. [`LabelTraversal`]
//! wraps the merged sequence with an explicit begin / current / advance
//! cursor for callers that want to inspect the traversal state.

use alloc::boxed::Box;
use alloc::vec::Vec;

use placard_tiles::{LabelId, SourcedId};

use crate::source::{LabelSource, TraversalContext};
use crate::types::LabelCandidate;

/// Interleaves several iterators one item at a time.
#[derive(Debug)]
pub struct RoundRobin<I> {
    sources: Vec<I>,
    cursor: usize,
}

impl<I: Iterator> RoundRobin<I> {
    /// Merge `sources`; the first item comes from the first source.
    pub fn new(sources: Vec<I>) -> Self {
        Self { sources, cursor: 0 }
    }
}

impl<I: Iterator> Iterator for RoundRobin<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.sources.is_empty() {
            let idx = self.cursor % self.sources.len();
            if let Some(item) = self.sources[idx].next() {
                self.cursor = idx + 1;
                return Some(item);
            }
            self.sources.remove(idx);
            self.cursor = idx;
        }
        None
    }
}

impl<I: Iterator> core::iter::FusedIterator for RoundRobin<I> {}

/// Where a [`LabelTraversal`] stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraversalState {
    /// [`LabelTraversal::begin`] has not been called.
    NotStarted,
    /// A current candidate is available.
    Active,
    /// Every source is drained; this is final.
    Exhausted,
}

type Candidates<'a> = Box<dyn Iterator<Item = LabelCandidate> + 'a>;

/// Single-pass, round-robin traversal over the candidates of several sources.
///
/// Use it either as an [`Iterator`] or through the explicit
/// [`begin`](Self::begin) / [`current`](Self::current) /
/// [`advance`](Self::advance) cursor.
pub struct LabelTraversal<'a> {
    merged: RoundRobin<Candidates<'a>>,
    current: Option<LabelCandidate>,
    state: TraversalState,
}

impl<'a> LabelTraversal<'a> {
    /// Ask each source for this frame's candidates and merge them.
    ///
    /// Each source sees only its own entries of `last_placed`, and every
    /// candidate is tagged with the position of the source that produced it.
    pub fn from_sources(
        sources: &[&'a dyn LabelSource],
        ctx: &TraversalContext<'_>,
        last_placed: &[SourcedId],
    ) -> Self {
        let streams = sources
            .iter()
            .enumerate()
            .map(|(index, source)| {
                let own: Vec<LabelId> = last_placed
                    .iter()
                    .filter(|placed| placed.source == index)
                    .map(|placed| placed.id)
                    .collect();
                let tagged = source.candidates(ctx, &own).map(move |mut c| {
                    c.source = index;
                    c
                });
                Box::new(tagged) as Candidates<'a>
            })
            .collect();
        Self::new(streams)
    }

    /// Merge already-built candidate sequences.
    pub fn new(streams: Vec<Candidates<'a>>) -> Self {
        Self {
            merged: RoundRobin::new(streams),
            current: None,
            state: TraversalState::NotStarted,
        }
    }

    /// Move onto the first candidate. Has no effect once started.
    pub fn begin(&mut self) {
        if self.state == TraversalState::NotStarted {
            self.pull();
        }
    }

    /// Move onto the next candidate.
    pub fn advance(&mut self) {
        match self.state {
            TraversalState::NotStarted => self.begin(),
            TraversalState::Active => self.pull(),
            TraversalState::Exhausted => {}
        }
    }

    /// The candidate under the cursor.
    pub fn current(&self) -> Option<&LabelCandidate> {
        self.current.as_ref()
    }

    /// Current state.
    pub fn state(&self) -> TraversalState {
        self.state
    }

    /// True once every source is drained.
    pub fn is_at_end(&self) -> bool {
        self.state == TraversalState::Exhausted
    }

    fn pull(&mut self) {
        self.current = self.merged.next();
        self.state = if self.current.is_some() {
            TraversalState::Active
        } else {
            TraversalState::Exhausted
        };
    }
}

impl Iterator for LabelTraversal<'_> {
    type Item = LabelCandidate;

    fn next(&mut self) -> Option<LabelCandidate> {
        self.begin();
        let item = self.current.take();
        if item.is_some() {
            self.pull();
        }
        item
    }
}

impl core::fmt::Debug for LabelTraversal<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LabelTraversal")
            .field("state", &self.state)
            .field("current", &self.current.as_ref().map(|c| c.id))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;

    use crate::camera::FixedCamera;
    use crate::hierarchy::{LabelHierarchy, LabelRecord};
    use crate::source::IteratorType;
    use crate::types::{LabelType, TextProperty, Vec3};
    use placard_tiles::DEFAULT_TILE_SIZE;

    fn candidate(id: u64) -> LabelCandidate {
        LabelCandidate {
            id: LabelId(id),
            source: 0,
            label_type: LabelType::Text,
            anchor: Vec3::ZERO,
            text: String::new(),
            icon_index: 0,
            text_property: Arc::new(TextProperty::default()),
            orientation: None,
            bounded_size: None,
            priority: 0.0,
        }
    }

    fn stream<'a>(ids: &'a [u64]) -> Candidates<'a> {
        Box::new(ids.iter().map(|&id| candidate(id)))
    }

    #[test]
    fn round_robin_alternates_and_drops_drained_sources() {
        let merged: Vec<_> = RoundRobin::new(vec![
            vec![1, 2, 3].into_iter(),
            vec![10].into_iter(),
            vec![20, 21].into_iter(),
        ])
        .collect();
        assert_eq!(merged, vec![1, 10, 20, 2, 21, 3]);
    }

    #[test]
    fn round_robin_of_nothing_is_empty() {
        let mut merged = RoundRobin::new(Vec::<core::iter::Empty<u8>>::new());
        assert_eq!(merged.next(), None);
        assert_eq!(merged.next(), None);
    }

    #[test]
    fn cursor_walks_through_states() {
        let a = [1, 2];
        let b = [7];
        let mut t = LabelTraversal::new(vec![stream(&a), stream(&b)]);
        assert_eq!(t.state(), TraversalState::NotStarted);
        assert!(t.current().is_none());

        t.begin();
        assert_eq!(t.state(), TraversalState::Active);
        assert_eq!(t.current().map(|c| c.id), Some(LabelId(1)));
        t.advance();
        assert_eq!(t.current().map(|c| c.id), Some(LabelId(7)));
        t.advance();
        assert_eq!(t.current().map(|c| c.id), Some(LabelId(2)));
        t.advance();
        assert!(t.is_at_end());
        assert!(t.current().is_none());

        // Exhaustion is final.
        t.advance();
        t.begin();
        assert!(t.is_at_end());
        assert!(t.next().is_none());
    }

    #[test]
    fn iterator_and_cursor_share_position() {
        let a = [1, 2, 3];
        let mut t = LabelTraversal::new(vec![stream(&a)]);
        t.begin();
        t.advance();
        let rest: Vec<_> = t.by_ref().map(|c| c.id.0).collect();
        assert_eq!(rest, vec![2, 3]);
        assert_eq!(t.state(), TraversalState::Exhausted);
    }

    #[test]
    fn sources_only_see_their_own_last_placed_ids() {
        let mut a = LabelHierarchy::new(TextProperty::default());
        a.push(LabelRecord::text(Vec3::new(5.0, 5.0, 0.0), "a0"));
        let mut b = LabelHierarchy::new(TextProperty::default());
        b.push(LabelRecord::text(Vec3::new(1.0, 1.0, 0.0), "b0").with_priority(1.0));
        b.push(LabelRecord::text(Vec3::new(1.0, 1.0, 0.0), "b1").with_priority(9.0));

        let camera = FixedCamera::default();
        let ctx = TraversalContext {
            camera: &camera,
            frustum: camera.frustum,
            positions_as_normals: false,
            tile_size: DEFAULT_TILE_SIZE,
            iterator_type: IteratorType::Queue,
        };
        let sources: [&dyn LabelSource; 2] = [&a, &b];
        // Label 0 of the first source was placed; the second source's label 0 was not.
        let last = [SourcedId::new(0, LabelId(0)), SourcedId::new(1, LabelId(1))];
        let order: Vec<_> = LabelTraversal::from_sources(&sources, &ctx, &last)
            .map(|c| (c.source, c.text))
            .collect();
        assert_eq!(
            order,
            vec![
                (0, String::from("a0")),
                (1, String::from("b1")),
                (1, String::from("b0")),
            ]
        );
    }

    #[test]
    fn empty_traversal_is_exhausted_after_begin() {
        let mut t = LabelTraversal::new(Vec::new());
        t.begin();
        assert!(t.is_at_end());
    }
}
