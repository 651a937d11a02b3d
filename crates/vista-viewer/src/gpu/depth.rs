use vista_engine::coords::CanvasSize;

/// Depth attachment covering the whole output surface.
///
/// Each scene owns one and clears it every pass; only its viewport region is
/// ever touched.
pub struct DepthBuffer {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    size: CanvasSize,
}

impl DepthBuffer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, size: CanvasSize) -> Self {
        // Zero-sized textures are invalid; a minimized window keeps a 1x1 buffer.
        let width = size.width.max(1);
        let height = size.height.max(1);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("scene depth"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("scene depth view"),
            aspect: wgpu::TextureAspect::DepthOnly,
            ..Default::default()
        });

        Self {
            _texture: texture,
            view,
            size: CanvasSize::new(width, height),
        }
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }
}
