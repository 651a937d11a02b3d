//! Viewport layout and pointer routing across scenes.

use vista_engine::coords::{CanvasSize, ViewportRect};

use crate::scene::{Scene, SceneView};

/// Splits the area right of a `sidebar` pixel strip into `count` side-by-side
/// columns of full height.
///
/// Columns tile the area exactly: the last one absorbs the rounding remainder.
pub fn column_viewports(output: CanvasSize, sidebar: u32, count: usize) -> Vec<ViewportRect> {
    if count == 0 {
        return Vec::new();
    }

    let left = sidebar.min(output.width);
    let available = output.width - left;
    let n = count as u32;
    let column = available / n;

    (0..n)
        .map(|i| {
            let x = left + i * column;
            let width = if i + 1 == n { output.width - x } else { column };
            ViewportRect::new(x, 0, width, output.height)
        })
        .collect()
}

/// Sidebar width in physical pixels for a logical width.
pub fn sidebar_pixels(logical_width: f32, scale_factor: f32) -> u32 {
    (logical_width * scale_factor).round().max(0.0) as u32
}

/// Something with a viewport that accepts pointer input in surface space.
pub trait PointerTarget {
    fn hit_test(&self, x: f32, y: f32) -> bool;
    fn pointer_down(&mut self, x: f32, y: f32) -> bool;
    fn pointer_move(&mut self, x: f32, y: f32) -> bool;
    fn pointer_up(&mut self);
    fn scroll(&mut self, x: f32, y: f32, delta_y: f32) -> bool;
}

impl PointerTarget for SceneView {
    fn hit_test(&self, x: f32, y: f32) -> bool {
        SceneView::hit_test(self, x, y)
    }
    fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.on_pointer_down(x, y)
    }
    fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.on_pointer_move(x, y)
    }
    fn pointer_up(&mut self) {
        self.on_pointer_up();
    }
    fn scroll(&mut self, x: f32, y: f32, delta_y: f32) -> bool {
        self.on_scroll(x, y, delta_y)
    }
}

impl PointerTarget for Scene {
    fn hit_test(&self, x: f32, y: f32) -> bool {
        Scene::hit_test(self, x, y)
    }
    fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.on_pointer_down(x, y)
    }
    fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.on_pointer_move(x, y)
    }
    fn pointer_up(&mut self) {
        self.on_pointer_up();
    }
    fn scroll(&mut self, x: f32, y: f32, delta_y: f32) -> bool {
        self.on_scroll(x, y, delta_y)
    }
}

/// Routes pointer events to the target under the cursor, with capture.
///
/// The target that accepted a pointer-down receives every move and the
/// matching pointer-up until the drag ends, even outside its viewport.
#[derive(Debug, Default, Clone)]
pub struct PointerRouter {
    capture: Option<usize>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the target owning the current drag.
    pub fn capture(&self) -> Option<usize> {
        self.capture
    }

    /// First target whose viewport contains the point.
    pub fn hit<T: PointerTarget>(targets: &[T], x: f32, y: f32) -> Option<usize> {
        targets.iter().position(|t| t.hit_test(x, y))
    }

    /// Starts a drag on the hit target. Returns the captured index.
    pub fn pointer_down<T: PointerTarget>(&mut self, targets: &mut [T], x: f32, y: f32) -> Option<usize> {
        if let Some(prev) = self.capture.take() {
            // A missed release; end the stale drag first.
            if let Some(t) = targets.get_mut(prev) {
                t.pointer_up();
            }
        }

        let index = Self::hit(targets, x, y)?;
        if targets[index].pointer_down(x, y) {
            self.capture = Some(index);
        }
        self.capture
    }

    /// Returns whether the receiving target's camera changed.
    pub fn pointer_move<T: PointerTarget>(&mut self, targets: &mut [T], x: f32, y: f32) -> bool {
        let index = match self.capture {
            Some(i) => Some(i),
            None => Self::hit(targets, x, y),
        };
        match index.and_then(|i| targets.get_mut(i)) {
            Some(t) => t.pointer_move(x, y),
            None => false,
        }
    }

    /// Ends the captured drag, or forwards to the hit target without one.
    pub fn pointer_up<T: PointerTarget>(&mut self, targets: &mut [T], x: f32, y: f32) {
        let index = match self.capture.take() {
            Some(i) => Some(i),
            None => Self::hit(targets, x, y),
        };
        if let Some(t) = index.and_then(|i| targets.get_mut(i)) {
            t.pointer_up();
        }
    }

    /// Scroll always goes to the hit target, capture or not.
    pub fn scroll<T: PointerTarget>(&mut self, targets: &mut [T], x: f32, y: f32, delta_y: f32) -> bool {
        match Self::hit(targets, x, y) {
            Some(i) => targets[i].scroll(x, y, delta_y),
            None => false,
        }
    }

    /// Drops the capture, e.g. when the window loses focus mid-drag.
    pub fn cancel<T: PointerTarget>(&mut self, targets: &mut [T]) {
        if let Some(t) = self.capture.take().and_then(|i| targets.get_mut(i)) {
            t.pointer_up();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraState;

    fn views(viewports: &[ViewportRect]) -> Vec<SceneView> {
        viewports
            .iter()
            .map(|vp| {
                let mut v = SceneView::new(*vp, CameraState::default());
                v.take_pending();
                v
            })
            .collect()
    }

    #[test]
    fn columns_tile_without_gaps_or_overlap() {
        for (width, sidebar, count) in [(1280, 260, 2), (1001, 0, 3), (640, 100, 7), (300, 299, 2)] {
            let vps = column_viewports(CanvasSize::new(width, 480), sidebar, count);
            assert_eq!(vps.len(), count);
            assert_eq!(vps[0].x, sidebar);

            for pair in vps.windows(2) {
                assert_eq!(pair[0].x + pair[0].width, pair[1].x);
            }
            let last = vps[count - 1];
            assert_eq!(last.x + last.width, width);
            assert!(vps.iter().all(|v| v.height == 480 && v.y == 0));
        }
    }

    #[test]
    fn last_column_absorbs_remainder() {
        let vps = column_viewports(CanvasSize::new(1001, 100), 0, 3);
        let widths: Vec<u32> = vps.iter().map(|v| v.width).collect();
        assert_eq!(widths, vec![333, 333, 335]);
    }

    #[test]
    fn sidebar_wider_than_window_leaves_empty_columns() {
        let vps = column_viewports(CanvasSize::new(200, 100), 500, 2);
        assert!(vps.iter().all(|v| v.is_empty()));
        assert!(column_viewports(CanvasSize::new(200, 100), 0, 0).is_empty());
    }

    #[test]
    fn sidebar_scales_to_physical_pixels() {
        assert_eq!(sidebar_pixels(260.0, 1.0), 260);
        assert_eq!(sidebar_pixels(260.0, 1.5), 390);
    }

    #[test]
    fn shared_edge_routes_to_one_scene() {
        let mut targets = views(&column_viewports(CanvasSize::new(400, 100), 0, 2));
        assert_eq!(PointerRouter::hit(&targets, 200.0, 50.0), Some(1));
        assert_eq!(PointerRouter::hit(&targets, 199.5, 50.0), Some(0));

        let mut router = PointerRouter::new();
        assert_eq!(router.pointer_down(&mut targets, 200.0, 50.0), Some(1));
        assert!(!targets[0].camera().is_dragging());
        assert!(targets[1].camera().is_dragging());
    }

    #[test]
    fn captured_drag_follows_pointer_out_of_viewport() {
        let mut targets = views(&column_viewports(CanvasSize::new(400, 100), 0, 2));
        let untouched = *targets[1].camera().state();
        let mut router = PointerRouter::new();

        router.pointer_down(&mut targets, 150.0, 50.0);
        assert!(router.pointer_move(&mut targets, 300.0, 50.0));
        assert_eq!(*targets[1].camera().state(), untouched);

        router.pointer_up(&mut targets, 300.0, 50.0);
        assert!(!targets[0].camera().is_dragging());
        assert_eq!(router.capture(), None);
    }

    #[test]
    fn pointer_down_outside_all_viewports_captures_nothing() {
        let mut targets = views(&column_viewports(CanvasSize::new(400, 100), 100, 2));
        let mut router = PointerRouter::new();
        assert_eq!(router.pointer_down(&mut targets, 50.0, 50.0), None);
        assert!(!router.pointer_move(&mut targets, 60.0, 50.0));
    }

    #[test]
    fn scroll_goes_to_hit_scene_even_during_capture() {
        let mut targets = views(&column_viewports(CanvasSize::new(400, 100), 0, 2));
        let mut router = PointerRouter::new();
        router.pointer_down(&mut targets, 10.0, 10.0);

        let zoom0 = targets[0].camera().state().zoom;
        assert!(router.scroll(&mut targets, 300.0, 10.0, 1.0));
        assert_eq!(targets[0].camera().state().zoom, zoom0);
        assert!(targets[1].camera().state().zoom > zoom0);
    }

    #[test]
    fn cancel_releases_captured_scene() {
        let mut targets = views(&column_viewports(CanvasSize::new(400, 100), 0, 2));
        let mut router = PointerRouter::new();
        router.pointer_down(&mut targets, 10.0, 10.0);
        router.cancel(&mut targets);
        assert!(!targets[0].camera().is_dragging());
        assert_eq!(router.capture(), None);
    }
}
