//! GPU types and helpers shared by the overlay renderers.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{CanvasSize, Rect};
use crate::render::RenderCtx;

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

/// Physical surface size, used by the vertex shaders to reach NDC.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct SurfaceUniform {
    pub size: [f32; 2],
    pub _pad: [f32; 2],
}

impl SurfaceUniform {
    pub(super) fn from_ctx(ctx: &RenderCtx<'_>) -> Self {
        Self {
            size: [
                ctx.surface_size.width.max(1) as f32,
                ctx.surface_size.height.max(1) as f32,
            ],
            _pad: [0.0; 2],
        }
    }

    pub(super) fn create_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<Self>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub(super) fn min_binding_size() -> Option<wgpu::BufferSize> {
        wgpu::BufferSize::new(std::mem::size_of::<SurfaceUniform>() as u64)
    }

    pub(super) fn layout_entry() -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: Self::min_binding_size(),
            },
            count: None,
        }
    }
}

/// Unit-square corners; instances stretch them in the vertex shader.
const QUAD_CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

fn quad_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Builds an alpha-blended, depth-less overlay pipeline.
pub(super) fn overlay_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    shader: &wgpu::ShaderModule,
    bind_group_layout: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'static>,
) -> wgpu::RenderPipeline {
    let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[quad_layout(), instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Converts a logical clip rect into a physical scissor `(x, y, w, h)`.
///
/// `None` clip covers the whole surface. Returns `None` when the result has
/// zero area; the caller skips that draw.
fn clip_to_scissor(
    clip: Option<Rect>,
    surface: CanvasSize,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let (sw, sh) = (surface.width, surface.height);

    let (x, y, w, h) = match clip {
        None => (0, 0, sw, sh),
        Some(r) => {
            let x = ((r.origin.x * scale).max(0.0) as u32).min(sw);
            let y = ((r.origin.y * scale).max(0.0) as u32).min(sh);
            let x2 = (((r.origin.x + r.size.x) * scale).max(0.0) as u32).min(sw);
            let y2 = (((r.origin.y + r.size.y) * scale).max(0.0) as u32).min(sh);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

/// Splits instances into consecutive runs sharing the same clip rect.
fn clip_runs(clips: &[Option<Rect>]) -> Vec<(Range<u32>, Option<Rect>)> {
    let mut runs = Vec::new();
    let mut start = 0usize;
    while start < clips.len() {
        let clip = clips[start];
        let mut end = start + 1;
        while end < clips.len() && clips[end] == clip {
            end += 1;
        }
        runs.push((start as u32..end as u32, clip));
        start = end;
    }
    runs
}

/// The unit quad every overlay instance is stretched from.
pub(super) struct QuadBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
}

impl QuadBuffers {
    pub(super) fn new(device: &wgpu::Device, label: &str) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vertices, indices }
    }
}

/// Per-instance vertex buffer that grows to the largest batch seen so far.
#[derive(Default)]
pub(super) struct InstanceBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
}

impl InstanceBuffer {
    /// Uploads `instances`, reallocating when they no longer fit.
    pub(super) fn upload<T: Pod>(&mut self, ctx: &RenderCtx<'_>, label: &str, instances: &[T]) -> &wgpu::Buffer {
        let buffer = match self.buffer.take() {
            Some(buffer) if instances.len() <= self.capacity => buffer,
            _ => {
                self.capacity = instances.len().next_power_of_two().max(64);
                ctx.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(label),
                    size: (self.capacity * std::mem::size_of::<T>()) as u64,
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                })
            }
        };
        ctx.queue.write_buffer(&buffer, 0, bytemuck::cast_slice(instances));
        self.buffer.insert(buffer)
    }
}

/// Draws `clips.len()` instances, one scissored draw per run of equal clips.
/// Runs whose scissor is empty are skipped.
pub(super) fn draw_clipped(
    pass: &mut wgpu::RenderPass<'_>,
    ctx: &RenderCtx<'_>,
    quad: &QuadBuffers,
    instances: &wgpu::Buffer,
    clips: &[Option<Rect>],
) {
    pass.set_vertex_buffer(0, quad.vertices.slice(..));
    pass.set_vertex_buffer(1, instances.slice(..));
    pass.set_index_buffer(quad.indices.slice(..), wgpu::IndexFormat::Uint16);

    for (range, clip) in clip_runs(clips) {
        if let Some((x, y, w, h)) = clip_to_scissor(clip, ctx.surface_size, ctx.scale_factor) {
            pass.set_scissor_rect(x, y, w, h);
            pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: CanvasSize = CanvasSize { width: 800, height: 600 };

    #[test]
    fn no_clip_is_full_surface() {
        assert_eq!(clip_to_scissor(None, SURFACE, 1.0), Some((0, 0, 800, 600)));
    }

    #[test]
    fn clip_is_scaled_and_clamped() {
        let clip = Some(Rect::new(10.0, 10.0, 500.0, 20.0));
        assert_eq!(clip_to_scissor(clip, SURFACE, 2.0), Some((20, 20, 780, 40)));
    }

    #[test]
    fn zero_area_clip_is_skipped() {
        assert_eq!(clip_to_scissor(Some(Rect::default()), SURFACE, 1.0), None);
    }

    #[test]
    fn runs_group_consecutive_clips() {
        let a = Some(Rect::new(0.0, 0.0, 1.0, 1.0));
        let runs = clip_runs(&[None, None, a, a, None]);
        assert_eq!(runs, vec![(0..2, None), (2..4, a), (4..5, None)]);
    }
}
