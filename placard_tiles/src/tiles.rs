// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform screen-tile index of placed label footprints.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect, Size};

use crate::index::PlacementIndex;
use crate::placed::PlacedIds;
use crate::rect::OrientedRect;
use crate::types::SourcedId;

/// Tile size used when the caller has no better idea.
pub const DEFAULT_TILE_SIZE: Size = Size::new(128.0, 128.0);

/// Inclusive tile range `[x0, x1] × [y0, y1]`, already clamped to the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct TileRange {
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
}

/// Uniform grid over the viewport holding the rectangles placed this frame.
///
/// Rectangles are expressed relative to the viewport origin given to
/// [`TileIndex::new`] / [`TileIndex::reset`]. A rectangle is stored in every
/// tile its bounds touch, so overlap queries only look at those tiles.
///
/// Tile storage only grows; a smaller viewport reuses the existing tiles.
pub struct TileIndex {
    tile_size: Size,
    num_tiles: (usize, usize),
    tiles: Vec<Vec<OrientedRect>>,
    screen_origin: Point,
    placed: PlacedIds,
    rect_count: usize,
}

impl TileIndex {
    /// Create an index covering `viewport` with tiles of `tile_size`.
    pub fn new(viewport: Rect, tile_size: Size) -> Self {
        let mut index = Self {
            tile_size,
            num_tiles: (0, 0),
            tiles: Vec::new(),
            screen_origin: viewport.origin(),
            placed: PlacedIds::new(),
            rect_count: 0,
        };
        index.resize(viewport, tile_size);
        index
    }

    /// Prepare for a new frame.
    ///
    /// Every tile is emptied, the grid is recomputed for `viewport` (growing
    /// storage if needed) and the placed-id buffers are swapped so this
    /// frame's ids become [`last_placed`](Self::last_placed).
    pub fn reset(&mut self, viewport: Rect, tile_size: Size) {
        for tile in &mut self.tiles {
            tile.clear();
        }
        self.rect_count = 0;
        self.resize(viewport, tile_size);
        self.placed.swap();
    }

    fn resize(&mut self, viewport: Rect, tile_size: Size) {
        debug_assert!(
            tile_size.width > 0.0 && tile_size.height > 0.0,
            "tile sizes must be positive"
        );
        let span = viewport.abs();
        self.tile_size = tile_size;
        self.screen_origin = span.origin();
        self.num_tiles = (
            tile_count(span.width(), tile_size.width),
            tile_count(span.height(), tile_size.height),
        );
        let needed = self.num_tiles.0 * self.num_tiles.1;
        if self.tiles.len() < needed {
            self.tiles.resize_with(needed, Vec::new);
        }
    }

    /// Whether `rect` could be placed without overlapping anything placed so far.
    ///
    /// A rectangle entirely off the grid is trivially open.
    pub fn is_spot_open(&self, rect: &OrientedRect) -> bool {
        match self.tile_range(rect.bounds()) {
            Some(range) => !self.overlaps_any(range, rect),
            None => true,
        }
    }

    /// Place `rect` if it overlaps nothing placed so far.
    ///
    /// Returns `false` for rectangles entirely off the grid and for
    /// overlapping ones; in both cases the tiles are left untouched.
    pub fn place_label(&mut self, rect: &OrientedRect) -> bool {
        let Some(range) = self.tile_range(rect.bounds()) else {
            return false;
        };
        if self.overlaps_any(range, rect) {
            return false;
        }
        let nx = self.num_tiles.0;
        for ty in range.y0..=range.y1 {
            for tx in range.x0..=range.x1 {
                self.tiles[ty * nx + tx].push(*rect);
            }
        }
        self.rect_count += 1;
        true
    }

    fn overlaps_any(&self, range: TileRange, rect: &OrientedRect) -> bool {
        let nx = self.num_tiles.0;
        (range.y0..=range.y1).any(|ty| {
            (range.x0..=range.x1).any(|tx| self.tiles[ty * nx + tx].iter().any(|r| r.overlaps(rect)))
        })
    }

    fn tile_range(&self, bounds: Rect) -> Option<TileRange> {
        let (nx, ny) = self.num_tiles;
        if nx == 0 || ny == 0 {
            return None;
        }
        let b = bounds.abs();
        let tx0 = floor_to_i64(b.x0 / self.tile_size.width);
        let tx1 = ceil_to_i64(b.x1 / self.tile_size.width);
        let ty0 = floor_to_i64(b.y0 / self.tile_size.height);
        let ty1 = ceil_to_i64(b.y1 / self.tile_size.height);
        let (nx, ny) = (to_i64(nx), to_i64(ny));
        if tx0 >= nx || tx1 < 0 || ty0 >= ny || ty1 < 0 {
            return None;
        }
        Some(TileRange {
            x0: to_usize(tx0.max(0)),
            x1: to_usize(tx1.min(nx - 1)),
            y0: to_usize(ty0.max(0)),
            y1: to_usize(ty1.min(ny - 1)),
        })
    }

    /// Record that the label `id` was placed this frame.
    pub fn record_placed(&mut self, id: SourcedId) {
        self.placed.record(id);
    }

    /// Ids placed during the previous frame, in placement order.
    pub fn last_placed(&self) -> &[SourcedId] {
        self.placed.last()
    }

    /// Ids placed so far this frame, in placement order.
    pub fn placed_this_frame(&self) -> &[SourcedId] {
        self.placed.current()
    }

    /// Whether `id` was placed during the previous frame.
    pub fn was_placed_last_frame(&self, id: SourcedId) -> bool {
        self.placed.last().contains(&id)
    }

    /// Grid dimensions `(columns, rows)`.
    pub fn num_tiles(&self) -> (usize, usize) {
        self.num_tiles
    }

    /// Size of one tile.
    pub fn tile_size(&self) -> Size {
        self.tile_size
    }

    /// Screen position of the grid's lower-left corner.
    pub fn screen_origin(&self) -> Point {
        self.screen_origin
    }

    /// Number of rectangles placed since the last reset.
    pub fn len(&self) -> usize {
        self.rect_count
    }

    /// True when nothing has been placed since the last reset.
    pub fn is_empty(&self) -> bool {
        self.rect_count == 0
    }

    /// Screen-space rectangles of the tiles that hold at least one placement.
    pub fn occupied_tiles(&self) -> impl Iterator<Item = Rect> + '_ {
        let (nx, ny) = self.num_tiles;
        let Size { width, height } = self.tile_size;
        let origin = self.screen_origin;
        self.tiles[..nx * ny]
            .iter()
            .enumerate()
            .filter(|(_, rects)| !rects.is_empty())
            .map(move |(i, _)| {
                let x = origin.x + (i % nx) as f64 * width;
                let y = origin.y + (i / nx) as f64 * height;
                Rect::new(x, y, x + width, y + height)
            })
    }
}

impl PlacementIndex for TileIndex {
    fn new(viewport: Rect, tile_size: Size) -> Self {
        Self::new(viewport, tile_size)
    }
    fn reset(&mut self, viewport: Rect, tile_size: Size) {
        self.reset(viewport, tile_size);
    }
    fn is_spot_open(&self, rect: &OrientedRect) -> bool {
        self.is_spot_open(rect)
    }
    fn place_label(&mut self, rect: &OrientedRect) -> bool {
        self.place_label(rect)
    }
    fn record_placed(&mut self, id: SourcedId) {
        self.record_placed(id);
    }
    fn last_placed(&self) -> &[SourcedId] {
        self.last_placed()
    }
    fn occupied_tiles<'a>(&'a self) -> Box<dyn Iterator<Item = Rect> + 'a> {
        Box::new(self.occupied_tiles())
    }
}

impl Debug for TileIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TileIndex")
            .field("tile_size", &self.tile_size)
            .field("num_tiles", &self.num_tiles)
            .field("capacity", &self.tiles.len())
            .field("screen_origin", &self.screen_origin)
            .field("placed", &self.rect_count)
            .field("ids", &self.placed)
            .finish_non_exhaustive()
    }
}

/// Tile coordinates are clamped to `±2^52` so the cast and the floor step stay inside `i64`.
const TILE_COORD_LIMIT: f64 = 4_503_599_627_370_496.0;

#[inline]
fn floor_to_i64(v: f64) -> i64 {
    let v = v.clamp(-TILE_COORD_LIMIT, TILE_COORD_LIMIT);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Clamped to TILE_COORD_LIMIT above; NaN maps to 0."
    )]
    let i = v as i64;
    if (i as f64) > v { i - 1 } else { i }
}

#[inline]
fn ceil_to_i64(v: f64) -> i64 {
    -floor_to_i64(-v)
}

#[inline]
fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[inline]
fn to_usize(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

fn tile_count(span: f64, tile: f64) -> usize {
    if span <= 0.0 || tile <= 0.0 {
        return 0;
    }
    to_usize(ceil_to_i64(span / tile))
}
