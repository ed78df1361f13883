// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measuring and drawing label content.
//!
//! The placer never shapes text itself. It asks a [`LabelRenderStrategy`] for
//! the bounds of a label relative to its anchor, decides whether the label
//! fits, and then asks the same strategy to draw it.

use kurbo::{Point, Rect, Size};
use placard_labels::{HorizontalJustification, TextProperty, VerticalJustification};

bitflags::bitflags! {
    /// Optional features of a [`LabelRenderStrategy`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StrategyCapabilities: u8 {
        /// Labels can be drawn at an arbitrary orientation.
        const ROTATION     = 0b0000_0001;
        /// Labels can be clipped to a maximum width.
        const BOUNDED_SIZE = 0b0000_0010;
    }
}

/// Payload of one label.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LabelContent<'a> {
    /// A text string.
    Text(&'a str),
    /// An index into the host's icon sheet.
    Icon(u32),
}

/// Measures and draws labels for the placer.
pub trait LabelRenderStrategy {
    /// Called once before the first label of a frame.
    fn start_frame(&mut self) {}

    /// Called once after the last label of a frame.
    fn end_frame(&mut self) {}

    /// Bounds of `content` relative to its anchor, ignoring orientation.
    fn compute_label_bounds(&mut self, property: &TextProperty, content: LabelContent<'_>) -> Rect;

    /// Draw `content` anchored at the display point `anchor`.
    ///
    /// `max_width` is set for labels placed into a bounded slot.
    fn render_label(
        &mut self,
        anchor: Point,
        property: &TextProperty,
        content: LabelContent<'_>,
        max_width: Option<f64>,
    );

    /// Optional features this strategy implements.
    fn capabilities(&self) -> StrategyCapabilities;

    /// Shorthand for [`StrategyCapabilities::ROTATION`].
    fn supports_rotation(&self) -> bool {
        self.capabilities().contains(StrategyCapabilities::ROTATION)
    }

    /// Shorthand for [`StrategyCapabilities::BOUNDED_SIZE`].
    fn supports_bounded_size(&self) -> bool {
        self.capabilities()
            .contains(StrategyCapabilities::BOUNDED_SIZE)
    }
}

/// Owned copy of a [`LabelContent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawContent {
    /// Text.
    Text(String),
    /// Icon index.
    Icon(u32),
}

impl From<LabelContent<'_>> for DrawContent {
    fn from(content: LabelContent<'_>) -> Self {
        match content {
            LabelContent::Text(s) => Self::Text(s.to_owned()),
            LabelContent::Icon(i) => Self::Icon(i),
        }
    }
}

/// One call to [`LabelRenderStrategy::render_label`], as recorded by
/// [`FixedMetricStrategy`].
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    /// Display anchor.
    pub anchor: Point,
    /// Effective text property, orientation included.
    pub property: TextProperty,
    /// What was drawn.
    pub content: DrawContent,
    /// Width limit for bounded labels.
    pub max_width: Option<f64>,
}

/// A strategy with monospaced metrics that records a display list.
///
/// Every glyph advances `font_size * advance_ratio`; each line is
/// `font_size` tall and lines are separated by the property's
/// `line_offset`. Icons are a fixed size and centered on their anchor. Text
/// bounds follow the property's justification.
///
/// Useful for headless hosts and tests, and as a template for real text
/// back ends.
#[derive(Clone)]
pub struct FixedMetricStrategy {
    advance_ratio: f64,
    icon_size: Size,
    capabilities: StrategyCapabilities,
    commands: Vec<DrawCommand>,
    frames: u64,
    in_frame: bool,
}

impl Default for FixedMetricStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedMetricStrategy {
    /// Glyph advance as a fraction of the font size.
    pub const DEFAULT_ADVANCE_RATIO: f64 = 0.6;
    /// Size of every icon.
    pub const DEFAULT_ICON_SIZE: Size = Size::new(16.0, 16.0);

    /// A strategy supporting rotation and bounded sizes.
    pub fn new() -> Self {
        Self {
            advance_ratio: Self::DEFAULT_ADVANCE_RATIO,
            icon_size: Self::DEFAULT_ICON_SIZE,
            capabilities: StrategyCapabilities::all(),
            commands: Vec::new(),
            frames: 0,
            in_frame: false,
        }
    }

    /// Set the glyph advance ratio.
    #[must_use]
    pub fn with_advance_ratio(mut self, ratio: f64) -> Self {
        self.advance_ratio = ratio;
        self
    }

    /// Set the icon size.
    #[must_use]
    pub fn with_icon_size(mut self, size: Size) -> Self {
        self.icon_size = size;
        self
    }

    /// Restrict the advertised capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: StrategyCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Labels drawn since the last [`start_frame`](LabelRenderStrategy::start_frame).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of completed frames.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Unjustified size of `text`.
    pub fn text_size(&self, property: &TextProperty, text: &str) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let mut lines = 0_u32;
        let mut widest = 0_usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        let glyphs = f64::from(u32::try_from(widest).unwrap_or(u32::MAX));
        let width = glyphs * property.font_size * self.advance_ratio;
        let height = f64::from(lines) * property.font_size
            + f64::from(lines - 1) * property.line_offset;
        Size::new(width, height)
    }
}

impl LabelRenderStrategy for FixedMetricStrategy {
    fn start_frame(&mut self) {
        self.commands.clear();
        self.in_frame = true;
    }

    fn end_frame(&mut self) {
        if self.in_frame {
            self.frames += 1;
            self.in_frame = false;
        }
    }

    fn compute_label_bounds(&mut self, property: &TextProperty, content: LabelContent<'_>) -> Rect {
        match content {
            LabelContent::Icon(_) => Rect::from_center_size(Point::ZERO, self.icon_size),
            LabelContent::Text(text) => {
                let size = self.text_size(property, text);
                let x0 = match property.justification {
                    HorizontalJustification::Left => 0.0,
                    HorizontalJustification::Centered => -0.5 * size.width,
                    HorizontalJustification::Right => -size.width,
                };
                let y0 = match property.vertical_justification {
                    VerticalJustification::Bottom => 0.0,
                    VerticalJustification::Centered => -0.5 * size.height,
                    VerticalJustification::Top => -size.height,
                };
                Rect::from_origin_size((x0, y0), size)
            }
        }
    }

    fn render_label(
        &mut self,
        anchor: Point,
        property: &TextProperty,
        content: LabelContent<'_>,
        max_width: Option<f64>,
    ) {
        self.commands.push(DrawCommand {
            anchor,
            property: property.clone(),
            content: content.into(),
            max_width,
        });
    }

    fn capabilities(&self) -> StrategyCapabilities {
        self.capabilities
    }
}

impl core::fmt::Debug for FixedMetricStrategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FixedMetricStrategy")
            .field("advance_ratio", &self.advance_ratio)
            .field("icon_size", &self.icon_size)
            .field("capabilities", &self.capabilities)
            .field("commands", &self.commands.len())
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}
