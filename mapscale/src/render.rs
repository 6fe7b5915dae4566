//! Drawing primitives the scale bar produces and the [`Canvas`] trait a renderer implements to
//! display them.

use mapscale_types::{Point2d, Vector2d};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Color;

/// Drawing surface. Coordinates are screen pixels from the top-left corner.
pub trait Canvas {
    /// Draws a straight line segment.
    fn draw_line(&mut self, start: Point2d, end: Point2d, paint: LinePaint);
    /// Draws a single line of text anchored at `position` according to the paint alignment.
    fn draw_text(&mut self, text: &str, position: Point2d, paint: &TextPaint);
}

/// Line drawing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePaint {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
    /// Shape of line ends.
    pub line_cap: LineCap,
}

/// Shape of line ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LineCap {
    /// Half-circle around the end point.
    Round,
    /// Line ends exactly at the end point.
    Butt,
}

/// Horizontal alignment of a text relative to its anchor.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Text starts at the anchor.
    Left,
    /// Text is centered on the anchor.
    #[default]
    Center,
    /// Text ends at the anchor.
    Right,
}

/// Vertical alignment of a text relative to its anchor.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum VerticalAlignment {
    /// Top of the text is at the anchor.
    Top,
    /// Text is centered on the anchor.
    #[default]
    Middle,
    /// Bottom of the text is at the anchor.
    Bottom,
}

/// Text drawing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPaint {
    /// Font size in pixels.
    pub font_size: f64,
    /// Text color.
    pub color: Color,
    /// Horizontal alignment.
    pub horizontal_alignment: HorizontalAlignment,
    /// Vertical alignment.
    pub vertical_alignment: VerticalAlignment,
    /// Optional drop shadow.
    pub shadow: Option<TextShadow>,
}

/// Drop shadow of a text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextShadow {
    /// Shadow color.
    pub color: Color,
    /// Offset of the shadow from the text in pixels.
    pub offset: Vector2d,
    /// Blur radius in pixels.
    pub blur_radius: f64,
}
