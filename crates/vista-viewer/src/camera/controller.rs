use glam::{Mat4, Vec2};

use super::drag::mouse_space;
use super::{CameraState, DragState};

/// Orbit camera driven by pointer drags, wheel scrolls and per-frame inertia.
///
/// Pointer coordinates are viewport-local pixels. Every mutating call returns
/// `true` when the camera state changed, i.e. when the view matrix needs to be
/// uploaded again.
#[derive(Debug, Clone)]
pub struct CameraController {
    state: CameraState,
    drag: DragState,
    inertia_enabled: bool,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraState::default())
    }
}

impl CameraController {
    pub fn new(state: CameraState) -> Self {
        Self {
            state,
            drag: DragState::default(),
            inertia_enabled: true,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    pub fn inertia_enabled(&self) -> bool {
        self.inertia_enabled
    }

    /// Turning inertia off also stops any rotation still in progress.
    pub fn set_inertia_enabled(&mut self, enabled: bool) {
        self.inertia_enabled = enabled;
        if !enabled {
            self.drag.velocity = Vec2::ZERO;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.state.view_matrix()
    }

    /// Starts a drag. The first move of a drag yields `velocity = delta`.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.drag.active = true;
        self.drag.start_mouse = mouse_space(x, y);
        self.drag.start_camera = self.state;
        self.drag.previous_delta = Vec2::ZERO;
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        if !self.drag.active {
            return false;
        }

        let delta = (mouse_space(x, y) - self.drag.start_mouse) * self.drag.sensitivity;
        let before = self.state;
        self.state.set_angles(self.drag.start_camera.angles + delta);

        self.drag.velocity = delta - self.drag.previous_delta;
        self.drag.previous_delta = delta;

        self.state != before
    }

    /// Ends the drag. The last velocity is kept for inertia.
    pub fn on_pointer_up(&mut self) {
        self.drag.active = false;
    }

    /// `delta_y` in wheel notches, positive away from the user.
    pub fn on_scroll(&mut self, delta_y: f32) -> bool {
        let before = self.state.zoom;
        self.state
            .set_zoom(self.state.zoom + delta_y * self.drag.scroll_sensitivity);
        self.state.zoom != before
    }

    /// Applies one frame of inertia. Does nothing while dragging or once the
    /// velocity has decayed below the cutoff.
    pub fn tick(&mut self) -> bool {
        if !self.inertia_enabled || !self.drag.is_coasting() {
            return false;
        }

        let before = self.state;
        self.state.set_angles(self.state.angles + self.drag.velocity);
        self.drag.velocity *= self.drag.inertia;

        self.state != before
    }
}
