use glam::{Mat4, Vec2, Vec3};

/// Smallest distance kept between pitch and the poles.
pub const PITCH_EPSILON: f32 = 1e-5;
/// Pitch is clamped to `[-PITCH_LIMIT, PITCH_LIMIT]`.
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - PITCH_EPSILON;

pub const ZOOM_MIN: f32 = -2.0;
pub const ZOOM_MAX: f32 = 2.0;

/// Orbit camera around the origin.
///
/// `angles.x` is yaw, `angles.y` pitch, both in radians. The eye sits at
/// distance `exp(-zoom)` so larger zoom values move it closer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraState {
    pub angles: Vec2,
    pub zoom: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            angles: Vec2::new(0.8, 0.5),
            zoom: -1.2,
        }
    }
}

impl CameraState {
    pub fn yaw(&self) -> f32 {
        self.angles.x
    }

    pub fn pitch(&self) -> f32 {
        self.angles.y
    }

    /// Sets the angles, clamping pitch away from the poles.
    pub fn set_angles(&mut self, angles: Vec2) {
        self.angles = Vec2::new(angles.x, angles.y.clamp(-PITCH_LIMIT, PITCH_LIMIT));
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Eye position in world space (+Z up).
    pub fn eye(&self) -> Vec3 {
        let (sx, cx) = self.angles.x.sin_cos();
        let (sy, cy) = self.angles.y.sin_cos();
        Vec3::new(cx * cy, sx * cy, sy) * (-self.zoom).exp()
    }

    /// Left-handed view matrix looking at the origin.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye(), Vec3::ZERO, Vec3::Z)
    }
}
