use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

use super::{DrawCmd, FilledRect, Layer, TextRun};

/// A recorded command together with the layer and clip it was recorded under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub layer: Layer,
    pub cmd: DrawCmd,
    /// Logical-pixel scissor; `None` is unclipped.
    pub clip_rect: Option<Rect>,
}

/// The overlay's draw stream for one frame.
///
/// Rebuilt every frame by the GUI. Buffers keep their capacity across
/// [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    // Indices into `items`, grouped by layer; rebuilt lazily.
    paint_order: Vec<usize>,
    paint_order_stale: bool,
    // Each entry is already intersected with the one below it.
    clips: Vec<Rect>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.paint_order.clear();
        self.paint_order_stale = false;
        self.clips.clear();
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn push(&mut self, layer: Layer, cmd: DrawCmd) {
        let clip_rect = self.clips.last().copied();
        self.items.push(DrawItem { layer, cmd, clip_rect });
        self.paint_order_stale = true;
    }

    /// Records a solid rectangle; zero-area rectangles are skipped.
    pub fn fill_rect(&mut self, layer: Layer, rect: Rect, color: Color) {
        if !rect.is_empty() {
            self.push(layer, DrawCmd::Fill(FilledRect { rect, color }));
        }
    }

    /// Records one line of text on [`Layer::Text`].
    pub fn text(&mut self, origin: Vec2, text: impl Into<String>, font: FontId, size: f32, color: Color) {
        let run = TextRun { text: text.into(), font, size, color, origin };
        self.push(Layer::Text, DrawCmd::Text(run));
    }

    /// Restricts later items to `rect` within the current clip. Pair every
    /// call with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        let clip = self
            .clips
            .last()
            .map_or(rect, |outer| outer.intersect(rect).unwrap_or_default());
        self.clips.push(clip);
    }

    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clips.is_empty(), "unbalanced pop_clip");
        self.clips.pop();
    }

    /// Items bottom layer first. Within a layer, recording order is kept.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.paint_order_stale {
            let items = &self.items;
            self.paint_order.clear();
            self.paint_order.extend(0..items.len());
            // Stable, so equal layers stay in recording order.
            self.paint_order.sort_by_key(|&i| items[i].layer);
            self.paint_order_stale = false;
        }
        self.paint_order.iter().map(|&i| &self.items[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32) -> Rect {
        Rect::new(x, 0.0, 10.0, 10.0)
    }

    fn painted_x(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Fill(f) => f.rect.origin.x,
                DrawCmd::Text(t) => t.origin.x,
            })
            .collect()
    }

    #[test]
    fn layers_paint_bottom_up_and_keep_recording_order() {
        let mut list = DrawList::new();
        list.text(Vec2::new(0.0, 0.0), "fps", FontId(0), 12.0, Color::WHITE);
        list.fill_rect(Layer::Widget, square(1.0), Color::WHITE);
        list.fill_rect(Layer::Panel, square(2.0), Color::WHITE);
        list.fill_rect(Layer::Handle, square(3.0), Color::WHITE);
        list.fill_rect(Layer::Widget, square(4.0), Color::WHITE);

        assert_eq!(painted_x(&mut list), vec![2.0, 1.0, 4.0, 3.0, 0.0]);
    }

    #[test]
    fn zero_area_fill_is_skipped() {
        let mut list = DrawList::new();
        list.fill_rect(Layer::Panel, Rect::new(0.0, 0.0, 20.0, 0.0), Color::WHITE);
        assert!(list.is_empty());
    }

    #[test]
    fn clip_stack_intersects_and_unwinds() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 200.0, 100.0));
        list.push_clip(Rect::new(150.0, 0.0, 100.0, 100.0));
        list.fill_rect(Layer::Panel, square(0.0), Color::WHITE);
        list.pop_clip();
        list.fill_rect(Layer::Panel, square(0.0), Color::WHITE);
        list.pop_clip();
        list.fill_rect(Layer::Panel, square(0.0), Color::WHITE);

        let clips: Vec<_> = list.items().iter().map(|i| i.clip_rect).collect();
        assert_eq!(clips, vec![
            Some(Rect::new(150.0, 0.0, 50.0, 100.0)),
            Some(Rect::new(0.0, 0.0, 200.0, 100.0)),
            None,
        ]);
    }

    #[test]
    fn disjoint_nested_clip_hides_everything() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_clip(Rect::new(50.0, 50.0, 10.0, 10.0));
        list.fill_rect(Layer::Panel, square(0.0), Color::WHITE);
        assert!(list.items()[0].clip_rect.is_some_and(Rect::is_empty));
    }

    #[test]
    fn clear_drops_items_and_order() {
        let mut list = DrawList::new();
        list.fill_rect(Layer::Panel, square(0.0), Color::WHITE);
        let _ = painted_x(&mut list);
        list.clear();
        list.fill_rect(Layer::Panel, square(7.0), Color::WHITE);
        assert_eq!(list.len(), 1);
        assert_eq!(painted_x(&mut list), vec![7.0]);
    }
}
