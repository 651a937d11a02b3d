use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

/// Paint layer of an overlay item. Later variants are drawn on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub enum Layer {
    /// Panel backgrounds.
    #[default]
    Panel,
    /// Widget frames, tracks and fills.
    Widget,
    /// Handles drawn over their widget, such as slider thumbs.
    Handle,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilledRect {
    pub rect: Rect,
    pub color: Color,
}

/// One line of text. `origin` is the top-left of the line box in logical
/// pixels and `size` the font size.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
    pub origin: Vec2,
}

/// What an overlay item draws. The rect and text renderers each pick out
/// their own variant.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill(FilledRect),
    Text(TextRun),
}
