use vista_engine::coords::{Rect, Vec2};
use vista_engine::draw::{DrawList, Layer};
use vista_engine::paint::Color;
use vista_engine::text::{FontId, FontSystem};

/// Drawing surface for widgets: a thin layer over the engine's `DrawList`.
///
/// Without a font, text calls are dropped and measurement falls back to an
/// estimate so layout still works.
pub struct Painter<'a> {
    pub(crate) draw_list: &'a mut DrawList,
    pub(crate) fonts: &'a FontSystem,
    pub(crate) font: Option<FontId>,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(draw_list: &'a mut DrawList, fonts: &'a FontSystem, font: Option<FontId>) -> Self {
        Self { draw_list, fonts, font }
    }

    pub fn fill_rect(&mut self, layer: Layer, rect: Rect, color: Color) {
        self.draw_list.fill_rect(layer, rect, color);
    }

    /// Text with its line box's top-left at `origin`.
    pub fn text(&mut self, origin: Vec2, text: &str, size: f32, color: Color) {
        let Some(font) = self.font else { return };
        if text.is_empty() {
            return;
        }
        self.draw_list.text(origin, text, font, size, color);
    }

    /// Single-line extent in logical pixels.
    pub fn measure_text(&self, text: &str, size: f32) -> Vec2 {
        match self.font {
            Some(font) => self.fonts.measure_text(text, font, size),
            None => Vec2::new(text.chars().count() as f32 * size * 0.5, size * 1.2),
        }
    }

    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }
}
