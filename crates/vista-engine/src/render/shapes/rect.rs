use bytemuck::{Pod, Zeroable};

use crate::coords::Rect;
use crate::draw::{DrawCmd, DrawList};
use crate::render::{RenderCtx, RenderTarget};

use super::common::{draw_clipped, overlay_pipeline, InstanceBuffer, QuadBuffers, SurfaceUniform};

/// Pipeline state tied to one surface format.
struct RectGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    surface_ubo: wgpu::Buffer,
    quad: QuadBuffers,
}

impl RectGpu {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vista rect shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rect.wgsl").into()),
        });
        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vista rect bgl"),
            entries: &[SurfaceUniform::layout_entry()],
        });
        let pipeline = overlay_pipeline(ctx, "vista rect pipeline", &shader, &bgl, RectInstance::layout());
        let surface_ubo = SurfaceUniform::create_buffer(ctx.device, "vista rect surface ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vista rect bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: surface_ubo.as_entire_binding() }],
        });

        Self {
            format: ctx.surface_format,
            pipeline,
            bind_group,
            surface_ubo,
            quad: QuadBuffers::new(ctx.device, "vista rect quad"),
        }
    }
}

/// Draws the list's filled rectangles as instanced quads.
///
/// Nothing is allocated on the GPU until the first non-empty frame, and the
/// pipeline is rebuilt when the surface format changes.
#[derive(Default)]
pub struct RectRenderer {
    gpu: Option<RectGpu>,
    instances: InstanceBuffer,
    batch: Vec<RectInstance>,
    clips: Vec<Option<Rect>>,
}

impl RectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &mut DrawList) {
        self.batch.clear();
        self.clips.clear();
        for item in draw_list.iter_in_paint_order() {
            if let DrawCmd::Fill(fill) = &item.cmd {
                self.batch.push(RectInstance::new(fill.rect, fill.color.to_array(), ctx.scale_factor));
                self.clips.push(item.clip_rect);
            }
        }
        if self.batch.is_empty() {
            return;
        }

        if self.gpu.as_ref().is_none_or(|g| g.format != ctx.surface_format) {
            self.gpu = Some(RectGpu::new(ctx));
        }
        let Some(gpu) = self.gpu.as_ref() else { return };

        ctx.queue.write_buffer(&gpu.surface_ubo, 0, bytemuck::bytes_of(&SurfaceUniform::from_ctx(ctx)));
        let instances = self.instances.upload(ctx, "vista rect instances", &self.batch);

        let mut pass = target.begin_overlay_pass("vista rect pass");
        pass.set_pipeline(&gpu.pipeline);
        pass.set_bind_group(0, &gpu.bind_group, &[]);
        draw_clipped(&mut pass, ctx, &gpu.quad, instances, &self.clips);
    }
}

/// One rectangle in physical pixels.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![1 => Float32x2, 2 => Float32x2, 3 => Float32x4];

    fn new(rect: Rect, color: [f32; 4], scale: f32) -> Self {
        Self {
            origin: (rect.origin * scale).to_array(),
            size: (rect.size * scale).to_array(),
            color,
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
