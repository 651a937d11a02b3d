use std::ops::RangeInclusive;

use vista_engine::coords::{Rect, Vec2};
use vista_engine::draw::Layer;

use crate::input::UiInput;
use crate::painter::Painter;
use crate::style::Style;

/// Identity of a widget within a frame. Assigned in call order, so it is
/// stable as long as the widget sequence does not change between frames.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct WidgetId(pub u32);

/// Interaction state that survives between frames.
#[derive(Debug, Default)]
pub struct UiMemory {
    /// Widget that took the primary button press; keeps it until release.
    pub active: Option<WidgetId>,
    /// Panels drawn last frame, used to decide pointer ownership before the
    /// next frame's widgets run.
    pub panels: Vec<Rect>,
}

impl UiMemory {
    /// Whether the GUI owns the pointer at `pos`: it is over a panel, or a
    /// widget is being dragged.
    pub fn wants_pointer(&self, pos: Vec2) -> bool {
        self.active.is_some() || self.panels.iter().any(|p| p.contains(pos))
    }
}

/// Per-frame widget builder.
pub struct Ui<'a> {
    painter: Painter<'a>,
    memory: &'a mut UiMemory,
    style: &'a Style,
    input: UiInput,
    next_id: u32,
    /// Content area of the current panel.
    content: Rect,
    /// Top-left of the next row.
    cursor: Vec2,
}

impl<'a> Ui<'a> {
    pub(crate) fn new(painter: Painter<'a>, memory: &'a mut UiMemory, style: &'a Style, input: UiInput) -> Self {
        memory.panels.clear();
        Self {
            painter,
            memory,
            style,
            input,
            next_id: 0,
            content: Rect::default(),
            cursor: Vec2::ZERO,
        }
    }

    pub(crate) fn finish(self) {
        if self.input.released || !self.input.down {
            self.memory.active = None;
        }
    }

    pub fn input(&self) -> UiInput {
        self.input
    }

    fn next_id(&mut self) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Reserves a full-width row of `height` and advances the cursor.
    fn allocate_row(&mut self, height: f32) -> Rect {
        let r = Rect::new(self.cursor.x, self.cursor.y, self.content.size.x, height);
        self.cursor.y += height + self.style.spacing;
        r
    }

    /// Claims the pointer press for `id` when it starts inside `rect`.
    /// Returns `(hovered, active)`.
    fn interact(&mut self, id: WidgetId, rect: Rect) -> (bool, bool) {
        let hovered = self.input.hovering(rect);
        if hovered && self.input.pressed && self.memory.active.is_none() {
            self.memory.active = Some(id);
        }
        (hovered, self.memory.active == Some(id))
    }

    fn widget_bg(&self, hovered: bool, active: bool) -> vista_engine::paint::Color {
        if active {
            self.style.widget_active_bg
        } else if hovered {
            self.style.widget_hover_bg
        } else {
            self.style.widget_bg
        }
    }

    /// Lays out `add` inside a titled panel at `rect`.
    pub fn panel(&mut self, rect: Rect, title: &str, add: impl FnOnce(&mut Ui<'a>)) {
        self.memory.panels.push(rect);
        self.painter.fill_rect(Layer::Panel, rect, self.style.panel_bg);

        let saved = (self.content, self.cursor);
        self.content = rect.inset(self.style.padding);
        self.cursor = self.content.origin;

        self.painter.push_clip(rect);
        if !title.is_empty() {
            let row = self.allocate_row(self.style.title_size * 1.4);
            self.painter.text(row.origin, title, self.style.title_size, self.style.title_color);
        }
        add(self);
        self.painter.pop_clip();

        (self.content, self.cursor) = saved;
    }

    pub fn label(&mut self, text: impl AsRef<str>) {
        let row = self.allocate_row(self.style.row_height);
        self.painter.text(row.origin, text.as_ref(), self.style.font_size, self.style.text_color);
    }

    /// Smaller, dimmer text for secondary information.
    pub fn caption(&mut self, text: impl AsRef<str>) {
        let size = self.style.font_size * 0.9;
        let row = self.allocate_row(size * 1.4);
        self.painter.text(row.origin, text.as_ref(), size, self.style.dim_text_color);
    }

    pub fn separator(&mut self) {
        let row = self.allocate_row(self.style.spacing * 2.0);
        let y = row.origin.y + row.size.y * 0.5;
        self.painter
            .fill_rect(Layer::Widget, Rect::new(row.origin.x, y, row.size.x, 1.0), self.style.separator);
    }

    /// Returns `true` on the frame the button is released over itself.
    pub fn button(&mut self, text: &str) -> bool {
        let id = self.next_id();
        let rect = self.allocate_row(self.style.row_height + 4.0);
        let (hovered, active) = self.interact(id, rect);

        self.painter.fill_rect(Layer::Widget, rect, self.widget_bg(hovered, active));
        let size = self.painter.measure_text(text, self.style.font_size);
        let origin = Vec2::new(
            rect.origin.x + (rect.size.x - size.x) * 0.5,
            rect.origin.y + (rect.size.y - size.y) * 0.5,
        );
        self.painter.text(origin, text, self.style.font_size, self.style.text_color);

        active && hovered && self.input.released
    }

    /// Toggles `value` on press. Returns `true` when it changed.
    pub fn checkbox(&mut self, text: &str, value: &mut bool) -> bool {
        let changed = self.toggle_row(text, *value);
        if changed {
            *value = !*value;
        }
        changed
    }

    /// One option of a mutually exclusive group. Returns `true` when the
    /// (previously unselected) option is picked.
    pub fn radio(&mut self, text: &str, selected: bool) -> bool {
        self.toggle_row(text, selected) && !selected
    }

    fn toggle_row(&mut self, text: &str, on: bool) -> bool {
        let id = self.next_id();
        let row = self.allocate_row(self.style.row_height);
        let (hovered, _) = self.interact(id, row);
        let pressed = hovered && self.input.pressed && self.memory.active == Some(id);

        let b = self.style.box_size;
        let boxr = Rect::new(row.origin.x, row.origin.y + (row.size.y - b) * 0.5, b, b);
        self.painter.fill_rect(Layer::Widget, boxr, self.widget_bg(hovered, false));
        if on {
            self.painter.fill_rect(Layer::Widget, boxr.inset(3.0), self.style.accent);
        }

        let text_origin = Vec2::new(boxr.origin.x + b + self.style.spacing * 2.0, row.origin.y);
        self.painter.text(text_origin, text, self.style.font_size, self.style.text_color);

        pressed
    }

    /// Horizontal slider for `value` in `range`. Returns `true` when the value
    /// changed this frame.
    pub fn slider(&mut self, text: &str, value: &mut f32, range: RangeInclusive<f32>) -> bool {
        let id = self.next_id();

        let label_row = self.allocate_row(self.style.row_height);
        let caption = format!("{text}: {value:.2}");
        self.painter
            .text(label_row.origin, &caption, self.style.font_size, self.style.text_color);

        let track_row = self.allocate_row(self.style.row_height * 0.8);
        let (hovered, active) = self.interact(id, track_row);

        let mut changed = false;
        if active && self.input.down {
            if let Some(p) = self.input.pointer {
                let new = slider_value_at(p.x, track_row, &range);
                if new != *value {
                    *value = new;
                    changed = true;
                }
            }
        }

        let th = self.style.track_height;
        let track = Rect::new(
            track_row.origin.x,
            track_row.origin.y + (track_row.size.y - th) * 0.5,
            track_row.size.x,
            th,
        );
        self.painter.fill_rect(Layer::Widget, track, self.widget_bg(hovered, active));

        let t = slider_fraction(*value, &range);
        let fill = Rect::new(track.origin.x, track.origin.y, track.size.x * t, th);
        self.painter.fill_rect(Layer::Widget, fill, self.style.accent);

        let tw = self.style.thumb_width;
        let thumb = Rect::new(
            track.origin.x + track.size.x * t - tw * 0.5,
            track_row.origin.y,
            tw,
            track_row.size.y,
        );
        self.painter.fill_rect(Layer::Handle, thumb, self.style.title_color);

        changed
    }
}

/// Maps a pointer x to a value in `range`, clamped to the track ends.
pub(crate) fn slider_value_at(x: f32, track: Rect, range: &RangeInclusive<f32>) -> f32 {
    let (lo, hi) = (*range.start(), *range.end());
    if track.size.x <= 0.0 {
        return lo;
    }
    let t = ((x - track.origin.x) / track.size.x).clamp(0.0, 1.0);
    lo + t * (hi - lo)
}

/// Position of `value` along `range` in `[0, 1]`.
pub(crate) fn slider_fraction(value: f32, range: &RangeInclusive<f32>) -> f32 {
    let (lo, hi) = (*range.start(), *range.end());
    if (hi - lo).abs() < f32::EPSILON {
        0.0
    } else {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_engine::draw::DrawList;
    use vista_engine::text::FontSystem;

    const PANEL: Rect = Rect::new(0.0, 0.0, 220.0, 400.0);

    struct Harness {
        draw_list: DrawList,
        fonts: FontSystem,
        memory: UiMemory,
        style: Style,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                draw_list: DrawList::new(),
                fonts: FontSystem::new(),
                memory: UiMemory::default(),
                style: Style::default(),
            }
        }

        fn frame<R>(&mut self, input: UiInput, build: impl FnOnce(&mut Ui<'_>) -> R) -> R {
            self.draw_list.clear();
            let painter = Painter::new(&mut self.draw_list, &self.fonts, None);
            let mut ui = Ui::new(painter, &mut self.memory, &self.style, input);
            let mut out = None;
            ui.panel(PANEL, "", |ui| out = Some(build(ui)));
            ui.finish();
            out.expect("panel body runs")
        }
    }

    fn at(x: f32, y: f32) -> UiInput {
        UiInput { pointer: Some(Vec2::new(x, y)), ..UiInput::default() }
    }

    // ── value mapping ─────────────────────────────────────────────────────

    #[test]
    fn slider_maps_track_ends_to_range_ends() {
        let track = Rect::new(10.0, 0.0, 100.0, 10.0);
        assert_eq!(slider_value_at(10.0, track, &(-2.0..=2.0)), -2.0);
        assert_eq!(slider_value_at(110.0, track, &(-2.0..=2.0)), 2.0);
        assert_eq!(slider_value_at(60.0, track, &(-2.0..=2.0)), 0.0);
    }

    #[test]
    fn slider_clamps_outside_track() {
        let track = Rect::new(10.0, 0.0, 100.0, 10.0);
        assert_eq!(slider_value_at(-50.0, track, &(0.0..=1.0)), 0.0);
        assert_eq!(slider_value_at(500.0, track, &(0.0..=1.0)), 1.0);
    }

    #[test]
    fn fraction_of_degenerate_range_is_zero() {
        assert_eq!(slider_fraction(3.0, &(1.0..=1.0)), 0.0);
        assert_eq!(slider_fraction(0.5, &(0.0..=2.0)), 0.25);
    }

    // ── interaction ───────────────────────────────────────────────────────

    // Panel padding 10, title none, label row 20 + spacing 4: track row at y 34..50.
    const TRACK_Y: f32 = 40.0;

    #[test]
    fn slider_reports_change_only_while_dragged() {
        let mut h = Harness::new();
        let mut v = 0.0f32;

        let idle = h.frame(at(110.0, TRACK_Y), |ui| ui.slider("x", &mut v, 0.0..=1.0));
        assert!(!idle);
        assert_eq!(v, 0.0);

        let press = UiInput { pressed: true, down: true, ..at(110.0, TRACK_Y) };
        assert!(h.frame(press, |ui| ui.slider("x", &mut v, 0.0..=1.0)));
        assert!((v - 0.5).abs() < 1e-5);

        // Same position again: held but no change.
        let hold = UiInput { down: true, ..at(110.0, TRACK_Y) };
        assert!(!h.frame(hold, |ui| ui.slider("x", &mut v, 0.0..=1.0)));

        // Drag continues outside the panel; value clamps to the end.
        let drag = UiInput { down: true, ..at(900.0, 300.0) };
        assert!(h.frame(drag, |ui| ui.slider("x", &mut v, 0.0..=1.0)));
        assert_eq!(v, 1.0);

        let release = UiInput { released: true, ..at(900.0, 300.0) };
        h.frame(release, |ui| ui.slider("x", &mut v, 0.0..=1.0));
        assert!(h.memory.active.is_none());
    }

    #[test]
    fn checkbox_toggles_on_press() {
        let mut h = Harness::new();
        let mut on = false;
        let press = UiInput { pressed: true, down: true, ..at(15.0, 15.0) };
        assert!(h.frame(press, |ui| ui.checkbox("inertia", &mut on)));
        assert!(on);

        let hold = UiInput { down: true, ..at(15.0, 15.0) };
        assert!(!h.frame(hold, |ui| ui.checkbox("inertia", &mut on)));
        assert!(on);
    }

    #[test]
    fn button_clicks_on_release_over_itself() {
        let mut h = Harness::new();
        let press = UiInput { pressed: true, down: true, ..at(50.0, 15.0) };
        assert!(!h.frame(press, |ui| ui.button("reset")));

        let release = UiInput { released: true, ..at(50.0, 15.0) };
        assert!(h.frame(release, |ui| ui.button("reset")));
    }

    #[test]
    fn button_release_elsewhere_does_not_click() {
        let mut h = Harness::new();
        let press = UiInput { pressed: true, down: true, ..at(50.0, 15.0) };
        h.frame(press, |ui| ui.button("reset"));
        let release = UiInput { released: true, ..at(50.0, 300.0) };
        assert!(!h.frame(release, |ui| ui.button("reset")));
    }

    #[test]
    fn radio_reports_only_new_selection() {
        let mut h = Harness::new();
        let press = UiInput { pressed: true, down: true, ..at(15.0, 15.0) };
        assert!(!h.frame(press, |ui| ui.radio("scene 1", true)));
        h.frame(UiInput::default(), |_| ());
        assert!(h.frame(press, |ui| ui.radio("scene 1", false)));
    }

    #[test]
    fn memory_tracks_panels_and_drags() {
        let mut h = Harness::new();
        h.frame(UiInput::default(), |ui| ui.label("hello"));
        assert!(h.memory.wants_pointer(Vec2::new(100.0, 100.0)));
        assert!(!h.memory.wants_pointer(Vec2::new(300.0, 100.0)));
    }
}
