use crate::coords::{CanvasSize, Vec2};

/// What an overlay renderer needs from the GPU for one frame.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Physical pixels.
    pub surface_size: CanvasSize,
    /// Physical pixels per logical pixel; always positive.
    pub scale_factor: f32,
}

impl<'a> RenderCtx<'a> {
    /// A non-positive or NaN `scale_factor` is treated as 1.
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        surface_size: CanvasSize,
        scale_factor: f32,
    ) -> Self {
        let scale_factor = sanitize_scale(scale_factor);
        Self { device, queue, surface_format, surface_size, scale_factor }
    }

    pub fn logical_size(&self) -> Vec2 {
        let physical = Vec2::new(self.surface_size.width as f32, self.surface_size.height as f32);
        physical / self.scale_factor
    }
}

fn sanitize_scale(scale: f32) -> f32 {
    if scale > 0.0 { scale } else { 1.0 }
}

/// The frame's encoder and surface view. Scenes draw into it first and the
/// overlay last.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }

    /// A pass without depth that keeps what the scenes drew underneath.
    pub fn begin_overlay_pass(&mut self, label: &str) -> wgpu::RenderPass<'_> {
        let color = wgpu::RenderPassColorAttachment {
            view: self.color_view,
            depth_slice: None,
            resolve_target: None,
            ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
        };
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(color)],
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_scale_falls_back_to_one() {
        assert_eq!(sanitize_scale(2.0), 2.0);
        assert_eq!(sanitize_scale(0.0), 1.0);
        assert_eq!(sanitize_scale(-1.5), 1.0);
        assert_eq!(sanitize_scale(f32::NAN), 1.0);
    }
}
