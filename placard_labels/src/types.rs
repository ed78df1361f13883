// Copyright 2025 the Placard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label records handed from sources to the placement engine.

use alloc::string::String;
use alloc::sync::Arc;
use core::ops::{Add, Mul, Neg, Sub};

use kurbo::Size;
use placard_tiles::LabelId;

/// A 3D point or direction in world space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, o: Self) -> Self {
        Self::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, o: Self) -> Self {
        Self::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// What a label draws.
///
/// Sources store the type as an integer code; codes other than `0` (text)
/// and `1` (icon) are carried through as [`LabelType::Other`] so the engine
/// can skip them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LabelType {
    /// A text string.
    Text,
    /// An icon from an icon sheet.
    Icon,
    /// Any other type code.
    Other(i32),
}

impl LabelType {
    /// Decode a type code.
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Text,
            1 => Self::Icon,
            other => Self::Other(other),
        }
    }

    /// The integer code for this type.
    pub const fn code(self) -> i32 {
        match self {
            Self::Text => 0,
            Self::Icon => 1,
            Self::Other(code) => code,
        }
    }
}

/// Font family used to draw text labels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Sans-serif.
    #[default]
    Arial,
    /// Monospace.
    Courier,
    /// Serif.
    Times,
}

bitflags::bitflags! {
    /// Font style switches.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FontStyle: u8 {
        /// Bold weight.
        const BOLD   = 0b0000_0001;
        /// Italic slant.
        const ITALIC = 0b0000_0010;
        /// Drop shadow.
        const SHADOW = 0b0000_0100;
    }
}

/// Horizontal placement of text relative to its anchor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalJustification {
    /// Anchor at the left edge.
    #[default]
    Left,
    /// Anchor at the horizontal center.
    Centered,
    /// Anchor at the right edge.
    Right,
}

/// Vertical placement of text relative to its anchor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalJustification {
    /// Anchor at the bottom edge.
    #[default]
    Bottom,
    /// Anchor at the vertical center.
    Centered,
    /// Anchor at the top edge.
    Top,
}

/// Appearance of a text label.
#[derive(Clone, Debug, PartialEq)]
pub struct TextProperty {
    /// Font family.
    pub font_family: FontFamily,
    /// Font size in screen units.
    pub font_size: f64,
    /// RGB color, each channel in `[0, 1]`.
    pub color: [f64; 3],
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Bold, italic and shadow switches.
    pub style: FontStyle,
    /// Horizontal justification.
    pub justification: HorizontalJustification,
    /// Vertical justification.
    pub vertical_justification: VerticalJustification,
    /// Counter-clockwise rotation in degrees.
    pub orientation: f64,
    /// Offset between lines of multi-line text.
    pub line_offset: f64,
}

impl Default for TextProperty {
    fn default() -> Self {
        Self {
            font_family: FontFamily::Arial,
            font_size: 12.0,
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            style: FontStyle::empty(),
            justification: HorizontalJustification::Left,
            vertical_justification: VerticalJustification::Bottom,
            orientation: 0.0,
            line_offset: 0.0,
        }
    }
}

/// One label offered to the placement engine.
///
/// Candidates are produced fresh every frame and are not retained; only their
/// [`id`](Self::id) survives in the placed set.
#[derive(Clone, Debug)]
pub struct LabelCandidate {
    /// Identity that stays the same from frame to frame, unique within its source.
    pub id: LabelId,
    /// Position of the producing source in the merged traversal.
    ///
    /// Sources leave this at `0`; [`LabelTraversal::from_sources`] fills it in.
    ///
    /// [`LabelTraversal::from_sources`]: crate::LabelTraversal::from_sources
    pub source: usize,
    /// Text, icon, or an unsupported code.
    pub label_type: LabelType,
    /// World-space anchor.
    pub anchor: Vec3,
    /// Text payload for [`LabelType::Text`].
    pub text: String,
    /// Icon payload for [`LabelType::Icon`].
    pub icon_index: u32,
    /// Text property shared by every label of the source.
    pub text_property: Arc<TextProperty>,
    /// Per-label orientation in degrees, when the source carries one.
    pub orientation: Option<f64>,
    /// World-space slot the label must fit in, when the source carries one.
    pub bounded_size: Option<Size>,
    /// Priority the source ordered this label by.
    pub priority: f64,
}
