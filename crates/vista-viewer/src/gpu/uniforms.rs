use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

/// Per-scene transforms and animation state, bound at slot 0.
///
/// Fields are updated individually with [`SceneUniforms::write_field`] so a
/// camera move only uploads the view matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    pub color: Vec4,
    pub time: f32,
    pub _pad: [f32; 3],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            color: Vec4::new(0.0, 1.0, 0.4, 1.0),
            time: 1.0,
            _pad: [0.0; 3],
        }
    }
}

/// A single [`SceneUniforms`] field, for partial uploads.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SceneField {
    Projection,
    View,
    Model,
    Color,
    Time,
}

impl SceneField {
    /// Byte range of the field inside the uniform buffer.
    pub fn range(self) -> std::ops::Range<usize> {
        let (offset, len) = match self {
            SceneField::Projection => (offset_of!(SceneUniforms, projection), size_of::<Mat4>()),
            SceneField::View => (offset_of!(SceneUniforms, view), size_of::<Mat4>()),
            SceneField::Model => (offset_of!(SceneUniforms, model), size_of::<Mat4>()),
            SceneField::Color => (offset_of!(SceneUniforms, color), size_of::<Vec4>()),
            SceneField::Time => (offset_of!(SceneUniforms, time), size_of::<f32>()),
        };
        offset..offset + len
    }
}

impl SceneUniforms {
    pub const SIZE: wgpu::BufferAddress = size_of::<Self>() as wgpu::BufferAddress;

    pub fn field_bytes(&self, field: SceneField) -> &[u8] {
        &bytemuck::bytes_of(self)[field.range()]
    }

    /// Uploads only `field` to `buffer`.
    pub fn write_field(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer, field: SceneField) {
        let range = field.range();
        queue.write_buffer(buffer, range.start as wgpu::BufferAddress, self.field_bytes(field));
    }
}

/// Two directional lights, bound at slot 3.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LightingUniforms {
    /// xyz direction, w unused.
    pub directions: [Vec4; 2],
    pub colors: [Vec4; 2],
}

impl Default for LightingUniforms {
    fn default() -> Self {
        Self {
            directions: [
                Vec4::new(0.5, -0.9, 0.1, 0.0),
                Vec4::new(0.2, 0.4, 0.3, 0.0),
            ],
            colors: [
                Vec4::new(1.0, 0.9, 0.6, 1.0),
                Vec4::new(0.6, 0.9, 1.0, 1.0),
            ],
        }
    }
}

impl LightingUniforms {
    pub const SIZE: wgpu::BufferAddress = size_of::<Self>() as wgpu::BufferAddress;
    pub const LIGHT_COUNT: usize = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_uniforms_layout_matches_wgsl() {
        // WGSL: mat4x4f x3, vec4f, f32 padded to 16 bytes.
        assert_eq!(SceneUniforms::SIZE, 224);
        assert_eq!(SceneField::Projection.range(), 0..64);
        assert_eq!(SceneField::View.range(), 64..128);
        assert_eq!(SceneField::Model.range(), 128..192);
        assert_eq!(SceneField::Color.range(), 192..208);
        assert_eq!(SceneField::Time.range(), 208..212);
    }

    #[test]
    fn lighting_uniforms_layout_matches_wgsl() {
        assert_eq!(LightingUniforms::SIZE, 64);
    }

    #[test]
    fn field_bytes_slice_the_right_field() {
        let u = SceneUniforms { time: 2.5, ..SceneUniforms::default() };
        assert_eq!(u.field_bytes(SceneField::Time), 2.5f32.to_ne_bytes());

        let color: &[f32] = bytemuck::cast_slice(u.field_bytes(SceneField::Color));
        assert_eq!(color, &[0.0, 1.0, 0.4, 1.0]);
    }
}
