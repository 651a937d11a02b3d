use glam::Vec2;

use super::CameraState;

/// Velocity components below this stop inertia updates.
pub const INERTIA_EPSILON: f32 = 1e-4;

/// Pointer drag bookkeeping for one camera.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub active: bool,
    /// Pointer position at drag start, in mirrored mouse space.
    pub start_mouse: Vec2,
    pub start_camera: CameraState,
    /// Radians per pixel.
    pub sensitivity: f32,
    /// Zoom units per wheel notch.
    pub scroll_sensitivity: f32,
    pub velocity: Vec2,
    pub previous_delta: Vec2,
    /// Per-tick velocity decay factor.
    pub inertia: f32,
}

impl Default for DragState {
    fn default() -> Self {
        Self {
            active: false,
            start_mouse: Vec2::ZERO,
            start_camera: CameraState::default(),
            sensitivity: 0.01,
            scroll_sensitivity: 0.1,
            velocity: Vec2::ZERO,
            previous_delta: Vec2::ZERO,
            inertia: 0.9,
        }
    }
}

impl DragState {
    /// Whether the remaining velocity still moves the camera.
    pub fn is_coasting(&self) -> bool {
        !self.active
            && (self.velocity.x.abs() >= INERTIA_EPSILON
                || self.velocity.y.abs() >= INERTIA_EPSILON)
    }
}

/// Maps a viewport-local pointer position into mouse space.
///
/// X is mirrored so dragging right decreases yaw.
#[inline]
pub fn mouse_space(x: f32, y: f32) -> Vec2 {
    Vec2::new(-x, y)
}
