use vista_engine::coords::Vec2;
use vista_engine::draw::DrawList;
use vista_engine::render::shapes::{RectRenderer, TextRenderer};
use vista_engine::render::{RenderCtx, RenderTarget};
use vista_engine::text::{load_system_font, FontId, FontSystem};

use crate::input::UiInput;
use crate::painter::Painter;
use crate::style::Style;
use crate::ui::{Ui, UiMemory};

/// Owns everything the GUI needs across frames: fonts, widget memory, the
/// draw list and the two overlay renderers.
pub struct GuiOverlay {
    fonts: FontSystem,
    font: Option<FontId>,
    style: Style,
    memory: UiMemory,
    draw_list: DrawList,
    rects: RectRenderer,
    text: TextRenderer,
}

impl GuiOverlay {
    /// Creates the overlay with the first usable system font. Without one the
    /// overlay still draws panels and widgets, just no text.
    pub fn new() -> Self {
        let mut fonts = FontSystem::new();
        let font = load_system_font(&mut fonts);
        if font.is_none() {
            log::warn!("no system font found; GUI text is disabled");
        }
        Self::with_fonts(fonts, font)
    }

    pub fn with_fonts(fonts: FontSystem, font: Option<FontId>) -> Self {
        Self {
            fonts,
            font,
            style: Style::default(),
            memory: UiMemory::default(),
            draw_list: DrawList::new(),
            rects: RectRenderer::new(),
            text: TextRenderer::new(),
        }
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Whether a pointer event at `pos` (logical pixels) belongs to the GUI.
    ///
    /// Uses the panels laid out last frame, so it can run before this frame's
    /// widgets are built.
    pub fn wants_pointer(&self, pos: Vec2) -> bool {
        self.memory.wants_pointer(pos)
    }

    /// Records this frame's widgets.
    pub fn frame<R>(&mut self, input: UiInput, build: impl FnOnce(&mut Ui<'_>) -> R) -> R {
        self.draw_list.clear();
        let painter = Painter::new(&mut self.draw_list, &self.fonts, self.font);
        let mut ui = Ui::new(painter, &mut self.memory, &self.style, input);
        let out = build(&mut ui);
        ui.finish();
        out
    }

    /// Draws the recorded widgets on top of `target` without clearing it.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if self.draw_list.is_empty() {
            return;
        }
        self.rects.render(ctx, target, &mut self.draw_list);
        self.text.render(ctx, target, &mut self.draw_list, &self.fonts);
    }
}

impl Default for GuiOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_engine::coords::Rect;

    #[test]
    fn frame_records_panel_and_claims_pointer() {
        let mut gui = GuiOverlay::with_fonts(FontSystem::new(), None);
        gui.frame(UiInput::default(), |ui| {
            ui.panel(Rect::new(0.0, 0.0, 100.0, 100.0), "Scene", |ui| ui.separator());
        });

        assert!(!gui.draw_list.is_empty());
        assert!(gui.wants_pointer(Vec2::new(50.0, 50.0)));
        assert!(!gui.wants_pointer(Vec2::new(150.0, 50.0)));
    }

    #[test]
    fn frame_returns_builder_result() {
        let mut gui = GuiOverlay::with_fonts(FontSystem::new(), None);
        let n = gui.frame(UiInput::default(), |_| 7);
        assert_eq!(n, 7);
    }
}
