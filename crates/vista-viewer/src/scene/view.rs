use glam::Mat4;
use vista_engine::coords::ViewportRect;

use crate::camera::{CameraController, CameraState};
use crate::gpu::{LightingUniforms, SceneField, SceneUniforms};

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.01;
pub const Z_FAR: f32 = 100.0;

/// Left-handed, depth 0..1 projection for a viewport, or `None` when it has no
/// area.
pub fn projection_for(viewport: ViewportRect) -> Option<Mat4> {
    let aspect = viewport.aspect()?;
    Some(Mat4::perspective_lh(
        FOV_Y_DEGREES.to_radians(),
        aspect,
        Z_NEAR,
        Z_FAR,
    ))
}

/// GPU writes a scene still owes.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PendingUploads {
    pub projection: bool,
    pub view: bool,
    pub lighting: bool,
}

impl PendingUploads {
    pub fn any(self) -> bool {
        self.projection || self.view || self.lighting
    }
}

/// CPU side of a scene: viewport, camera and uniform values, plus which of
/// them changed since the last upload.
///
/// Pointer coordinates arrive in surface space (physical pixels) and are
/// translated to viewport-local space before reaching the camera.
#[derive(Debug, Clone)]
pub struct SceneView {
    viewport: ViewportRect,
    camera: CameraController,
    uniforms: SceneUniforms,
    lighting: LightingUniforms,
    pending: PendingUploads,
}

impl SceneView {
    pub fn new(viewport: ViewportRect, camera: CameraState) -> Self {
        let camera = CameraController::new(camera);
        let mut uniforms = SceneUniforms {
            view: camera.view_matrix(),
            ..SceneUniforms::default()
        };
        if let Some(projection) = projection_for(viewport) {
            uniforms.projection = projection;
        }

        Self {
            viewport,
            camera,
            uniforms,
            lighting: LightingUniforms::default(),
            pending: PendingUploads {
                projection: true,
                view: true,
                lighting: true,
            },
        }
    }

    pub fn viewport(&self) -> ViewportRect {
        self.viewport
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn uniforms(&self) -> &SceneUniforms {
        &self.uniforms
    }

    pub fn lighting(&self) -> &LightingUniforms {
        &self.lighting
    }

    /// Mutable lighting access; marks the lighting for upload.
    pub fn lighting_mut(&mut self) -> &mut LightingUniforms {
        self.pending.lighting = true;
        &mut self.lighting
    }

    pub fn set_inertia_enabled(&mut self, enabled: bool) {
        self.camera.set_inertia_enabled(enabled);
    }

    pub fn pending(&self) -> PendingUploads {
        self.pending
    }

    /// Returns and clears the pending uploads.
    pub fn take_pending(&mut self) -> PendingUploads {
        std::mem::take(&mut self.pending)
    }

    /// Moves the scene to a new viewport. The projection is left alone for an
    /// empty viewport.
    pub fn set_viewport(&mut self, viewport: ViewportRect) {
        self.viewport = viewport;
        if let Some(projection) = projection_for(viewport) {
            self.uniforms.projection = projection;
            self.pending.projection = true;
        }
    }

    /// Half-open viewport containment of a surface-space point.
    pub fn hit_test(&self, x: f32, y: f32) -> bool {
        self.viewport.contains(x, y)
    }

    /// Starts a drag if the point lies in this viewport. Returns whether it did.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) -> bool {
        if !self.hit_test(x, y) {
            return false;
        }
        let (lx, ly) = self.viewport.to_local(x, y);
        self.camera.on_pointer_down(lx, ly);
        true
    }

    /// Forwards a move regardless of position; the camera ignores it unless a
    /// drag is active.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        let (lx, ly) = self.viewport.to_local(x, y);
        let changed = self.camera.on_pointer_move(lx, ly);
        self.mark_view(changed)
    }

    pub fn on_pointer_up(&mut self) {
        self.camera.on_pointer_up();
    }

    /// Zooms if the point lies in this viewport.
    pub fn on_scroll(&mut self, x: f32, y: f32, delta_y: f32) -> bool {
        if !self.hit_test(x, y) {
            return false;
        }
        let changed = self.camera.on_scroll(delta_y);
        self.mark_view(changed)
    }

    /// One frame of camera inertia.
    pub fn tick(&mut self) -> bool {
        let changed = self.camera.tick();
        self.mark_view(changed)
    }

    pub fn set_time(&mut self, time: f32) {
        self.uniforms.time = time;
    }

    /// Fields of [`SceneUniforms`] that `pending` requires uploading.
    pub fn dirty_fields(pending: PendingUploads) -> impl Iterator<Item = SceneField> {
        [
            (pending.projection, SceneField::Projection),
            (pending.view, SceneField::View),
        ]
        .into_iter()
        .filter_map(|(dirty, field)| dirty.then_some(field))
    }

    fn mark_view(&mut self, changed: bool) -> bool {
        if changed {
            self.uniforms.view = self.camera.view_matrix();
            self.pending.view = true;
        }
        changed
    }
}
