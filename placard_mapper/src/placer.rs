// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame placement loop.

use std::borrow::Cow;

use kurbo::{Point, Rect, Size, Vec2};
use placard_labels::{
    IteratorType, LabelCandidate, LabelSource, LabelTraversal, LabelType, TextProperty,
    TraversalContext, Vec3,
};
use placard_tiles::{DEFAULT_TILE_SIZE, OrientedRect, PlacementIndex, SourcedId, TileIndex};

use crate::background::BackgroundShape;
use crate::config::{AnchorTransform, PlacementConfig, clamp_unit};
use crate::error::{NotReadyReason, PlacementError};
use crate::render::{DepthSnapshot, Renderer};
use crate::report::{FrameReport, FrameStatus, PlacedLabel, Rejection};
use crate::strategy::{LabelContent, LabelRenderStrategy};

/// Narrowest on-screen slot a bounded label is drawn into.
pub const MIN_BOUNDED_WIDTH: f64 = 20.0;

/// Places prioritized labels over a rendered view so that none overlap.
///
/// Each call to [`render_overlay`](Self::render_overlay) resets the placement
/// index, walks the merged candidate sequence of every source once, and
/// draws every candidate that fits through the strategy `S`. The index `I`
/// is created on the first frame and reused afterwards; it also remembers
/// which labels were placed last frame, so [`IteratorType::Queue`] sources
/// can keep them stable.
pub struct LabelPlacer<S, I = TileIndex> {
    config: PlacementConfig,
    strategy: S,
    index: Option<I>,
    tile_size: Size,
}

impl<S: LabelRenderStrategy, I: PlacementIndex> LabelPlacer<S, I> {
    /// A placer with default settings.
    pub fn new(strategy: S) -> Self {
        Self::with_config(strategy, PlacementConfig::default())
    }

    /// A placer with `config`, clamped into range.
    pub fn with_config(strategy: S, config: PlacementConfig) -> Self {
        Self {
            config: config.sanitized(),
            strategy,
            index: None,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }

    /// Use tiles of `tile_size` from the next frame on.
    #[must_use]
    pub fn with_tile_size(mut self, tile_size: Size) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Current settings.
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Mutable settings; ranged values are clamped when a frame reads them.
    pub fn config_mut(&mut self) -> &mut PlacementConfig {
        &mut self.config
    }

    /// Replace every setting.
    pub fn set_config(&mut self, config: PlacementConfig) {
        self.config = config.sanitized();
    }

    /// Set the fraction of the viewport labels may cover, clamped to `[0, 1]`.
    pub fn set_maximum_label_fraction(&mut self, fraction: f64) {
        self.config.maximum_label_fraction = clamp_unit(fraction);
    }

    /// Set the background opacity, clamped to `[0, 1]`.
    pub fn set_background_opacity(&mut self, opacity: f64) {
        self.config.background_opacity = clamp_unit(opacity);
    }

    /// Set the traversal order requested from sources.
    pub fn set_iterator_type(&mut self, iterator_type: IteratorType) {
        self.config.iterator_type = iterator_type;
    }

    /// Draw every candidate, ignoring overlaps.
    pub fn set_place_all_labels(&mut self, place_all: bool) {
        self.config.place_all_labels = place_all;
    }

    /// The text strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// The text strategy, mutably.
    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    /// The placement index, once a frame has run.
    pub fn index(&self) -> Option<&I> {
        self.index.as_ref()
    }

    /// Tile size of the placement index.
    pub fn tile_size(&self) -> Size {
        self.tile_size
    }

    /// Place and draw this frame's labels.
    ///
    /// A missing renderer or render window is an error. A missing camera, a
    /// window that has never rendered, or an empty viewport skip the frame
    /// with [`FrameStatus::NotReady`]; nothing is reset in that case.
    pub fn render_overlay(
        &mut self,
        renderer: Option<&dyn Renderer>,
        sources: &[&dyn LabelSource],
    ) -> Result<FrameReport, PlacementError> {
        let Some(renderer) = renderer else {
            log::error!("label placement skipped: no renderer");
            return Err(PlacementError::MissingRenderer);
        };
        let Some(window) = renderer.render_window() else {
            log::error!("label placement skipped: renderer has no render window");
            return Err(PlacementError::MissingRenderWindow);
        };
        let Some(camera) = renderer.active_camera() else {
            return Ok(not_ready(NotReadyReason::NoCamera));
        };
        if window.never_rendered() {
            return Ok(not_ready(NotReadyReason::NeverRendered));
        }
        let (vw, vh) = renderer.viewport_size();
        let (tw, th, tx, ty) = renderer.tiled_size_and_origin();
        if vw == 0 || vh == 0 || tw == 0 || th == 0 {
            return Ok(not_ready(NotReadyReason::EmptyViewport));
        }

        let kdbounds = Rect::from_origin_size(
            (f64::from(tx), f64::from(ty)),
            (f64::from(tw), f64::from(th)),
        );
        let Self {
            config,
            strategy,
            index: slot,
            tile_size,
        } = self;
        let fresh = slot.is_none();
        let index = slot.get_or_insert_with(|| I::new(kdbounds, *tile_size));
        if !fresh {
            index.reset(kdbounds, *tile_size);
        }

        let mut report = FrameReport::new(FrameStatus::Rendered);
        report.allowable_area = kdbounds.area() * clamp_unit(config.maximum_label_fraction);

        let depth = if config.use_depth_buffer {
            let snapshot = renderer.depth_snapshot(kdbounds);
            if snapshot.is_none() {
                log::debug!("depth buffer unavailable; occlusion culling skipped this frame");
            }
            snapshot
        } else {
            None
        };

        let ctx = TraversalContext {
            camera,
            frustum: camera.frustum_planes(renderer.tiled_aspect_ratio()),
            positions_as_normals: config.positions_as_normals,
            tile_size: *tile_size,
            iterator_type: config.iterator_type,
        };
        let features: Vec<(bool, bool)> = sources
            .iter()
            .map(|s| (s.has_orientations(), s.has_bounded_sizes()))
            .collect();
        let traversal = LabelTraversal::from_sources(sources, &ctx, index.last_placed());
        let frame = Frame {
            renderer,
            eye: camera.position(),
            view_plane_normal: camera.view_plane_normal(),
            kdbounds,
            depth: depth.as_ref(),
        };

        strategy.start_frame();
        for mut candidate in traversal {
            report.considered += 1;
            let (orientations, bounded_sizes) =
                features.get(candidate.source).copied().unwrap_or_default();
            if !orientations {
                candidate.orientation = None;
            }
            if !bounded_sizes {
                candidate.bounded_size = None;
            }
            match place_candidate(&candidate, &frame, config, strategy, index) {
                Ok(placement) => {
                    index.record_placed(SourcedId::new(candidate.source, candidate.id));
                    report.rendered_area += placement.area;
                    report.backgrounds.extend(placement.background);
                    report.placed.push(placement.label);
                }
                Err(rejection) => {
                    log::trace!("label {:?} rejected: {rejection:?}", candidate.id);
                    report.rejections.record(rejection);
                }
            }
        }
        strategy.end_frame();
        drop(depth);

        if config.output_traversed_bounds {
            report.traversed_bounds = index.occupied_tiles().map(closed_outline).collect();
        }

        log::debug!(
            "placed {} of {} labels ({} rejected), area {:.0} of {:.0}",
            report.placed.len(),
            report.considered,
            report.rejections.total(),
            report.rendered_area,
            report.allowable_area,
        );
        Ok(report)
    }
}

impl<S: core::fmt::Debug, I> core::fmt::Debug for LabelPlacer<S, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LabelPlacer")
            .field("config", &self.config)
            .field("strategy", &self.strategy)
            .field("initialized", &self.index.is_some())
            .field("tile_size", &self.tile_size)
            .finish_non_exhaustive()
    }
}

fn not_ready(reason: NotReadyReason) -> FrameReport {
    log::debug!("label placement not ready: {reason:?}");
    FrameReport::not_ready(reason)
}

/// Per-frame state shared by every candidate.
struct Frame<'a> {
    renderer: &'a dyn Renderer,
    eye: Vec3,
    view_plane_normal: Vec3,
    kdbounds: Rect,
    depth: Option<&'a DepthSnapshot>,
}

impl Frame<'_> {
    /// Display position of `anchor`, rounded to whole pixels.
    fn to_display(&self, anchor: Vec3, transform: AnchorTransform) -> Point {
        let p = match transform {
            AnchorTransform::World => self.renderer.world_to_display(anchor),
            AnchorTransform::Display => Point::new(anchor.x, anchor.y),
            AnchorTransform::Viewport => {
                Point::new(anchor.x + self.kdbounds.x0, anchor.y + self.kdbounds.y0)
            }
        };
        p.round()
    }
}

struct Placement {
    label: PlacedLabel,
    area: f64,
    background: Option<BackgroundShape>,
}

fn place_candidate<S, I>(
    candidate: &LabelCandidate,
    frame: &Frame<'_>,
    config: &PlacementConfig,
    strategy: &mut S,
    index: &mut I,
) -> Result<Placement, Rejection>
where
    S: LabelRenderStrategy + ?Sized,
    I: PlacementIndex + ?Sized,
{
    let content = match candidate.label_type {
        LabelType::Text => LabelContent::Text(&candidate.text),
        LabelType::Icon => LabelContent::Icon(candidate.icon_index),
        LabelType::Other(code) => {
            log::debug!("label {:?} has unsupported type {code}", candidate.id);
            return Err(Rejection::UnsupportedType);
        }
    };

    let anchor = candidate.anchor;
    if (anchor - frame.eye).dot(frame.view_plane_normal) > 0.0 {
        return Err(Rejection::BehindCamera);
    }
    if config.positions_as_normals && frame.view_plane_normal.dot(anchor) < 0.0 {
        return Err(Rejection::FacingAway);
    }
    if let Some(depth) = frame.depth {
        if frame.renderer.is_point_occluded(anchor, depth) {
            return Err(Rejection::Occluded);
        }
    }

    let display = frame.to_display(anchor, config.anchor_transform);

    let rotates = strategy.supports_rotation();
    let property: Cow<'_, TextProperty> = match candidate.orientation {
        Some(degrees) if rotates => Cow::Owned(TextProperty {
            orientation: degrees,
            ..(*candidate.text_property).clone()
        }),
        _ => Cow::Borrowed(&*candidate.text_property),
    };
    let bounds = strategy.compute_label_bounds(&property, content);
    let size = bounds.abs().size();
    if size.width == 0.0 || size.height == 0.0 {
        return Err(Rejection::ZeroSize);
    }
    let lower_left = display + Vec2::new(bounds.min_x(), bounds.min_y());
    let screen = Rect::from_origin_size(lower_left, size);
    let kd = frame.kdbounds;
    if screen.x1 < kd.x0 || screen.x0 > kd.x1 || screen.y1 < kd.y0 || screen.y0 > kd.y1 {
        return Err(Rejection::OffScreen);
    }

    if let Some(slot) = candidate.bounded_size {
        if strategy.supports_bounded_size() {
            return place_bounded(
                candidate, frame, config, strategy, &property, display, screen, slot,
            );
        }
    }

    let rotation = if rotates {
        property.orientation.to_radians()
    } else {
        0.0
    };
    let origin = kd.origin().to_vec2();
    let footprint = OrientedRect::from_bounds(screen - origin, display - origin, rotation);
    if !config.place_all_labels && !index.place_label(&footprint) {
        return Err(Rejection::Overlap);
    }
    let footprint = footprint.translated(origin);

    let background = BackgroundShape::around(&footprint, config);
    strategy.render_label(display, &property, content, None);
    Ok(Placement {
        label: PlacedLabel {
            id: candidate.id,
            source: candidate.source,
            label_type: candidate.label_type,
            screen_rect: screen,
            footprint,
            bounded: false,
        },
        area: size.width * size.height,
        background,
    })
}

/// Draw a label into its own world-space slot without consulting the index.
fn place_bounded<S>(
    candidate: &LabelCandidate,
    frame: &Frame<'_>,
    config: &PlacementConfig,
    strategy: &mut S,
    property: &TextProperty,
    display: Point,
    screen: Rect,
    slot: Size,
) -> Result<Placement, Rejection>
where
    S: LabelRenderStrategy + ?Sized,
{
    if candidate.label_type != LabelType::Text {
        return Err(Rejection::BoundedIcon);
    }
    let extent = |offset: Vec3| {
        let end = frame.to_display(candidate.anchor + offset, config.anchor_transform);
        (end - display).hypot()
    };
    let width = extent(Vec3::new(slot.width, 0.0, 0.0));
    let height = extent(Vec3::new(0.0, slot.height, 0.0));
    if width < MIN_BOUNDED_WIDTH {
        return Err(Rejection::BoundedTooNarrow);
    }
    if height < screen.height() {
        return Err(Rejection::BoundedTooShort);
    }

    strategy.render_label(display, property, LabelContent::Text(&candidate.text), Some(width));
    let clipped = Rect::from_origin_size(
        screen.origin(),
        (screen.width().min(width), screen.height()),
    );
    Ok(Placement {
        label: PlacedLabel {
            id: candidate.id,
            source: candidate.source,
            label_type: candidate.label_type,
            screen_rect: clipped,
            footprint: OrientedRect::from_bounds(clipped, display, 0.0),
            bounded: true,
        },
        area: clipped.area(),
        background: None,
    })
}

fn closed_outline(tile: Rect) -> Vec<Point> {
    vec![
        Point::new(tile.x0, tile.y0),
        Point::new(tile.x1, tile.y0),
        Point::new(tile.x1, tile.y1),
        Point::new(tile.x0, tile.y1),
        Point::new(tile.x0, tile.y0),
    ]
}
