use vista_engine::paint::Color;

/// Background behind every scene.
pub const CLEAR_COLOR: Color = Color::from_premul(0.05, 0.05, 0.05, 1.0);

/// What a scene pass does with the shared color target before drawing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ClearPolicy {
    /// Wipe the whole target. Only the first scene of a frame may do this.
    Clear(Color),
    /// Keep what earlier scenes drew.
    Load,
}

impl ClearPolicy {
    /// Policy for the scene at `index` in draw order.
    pub fn for_draw_index(index: usize) -> Self {
        if index == 0 {
            ClearPolicy::Clear(CLEAR_COLOR)
        } else {
            ClearPolicy::Load
        }
    }

    /// Clear the frame needs before the overlay when no scene will issue
    /// one.
    pub fn background(scene_count: usize) -> Option<Self> {
        (scene_count == 0).then_some(ClearPolicy::Clear(CLEAR_COLOR))
    }

    pub fn load_op(self) -> wgpu::LoadOp<wgpu::Color> {
        match self {
            ClearPolicy::Clear(color) => wgpu::LoadOp::Clear(color.to_wgpu()),
            ClearPolicy::Load => wgpu::LoadOp::Load,
        }
    }
}

/// Encodes a pass that only applies `policy` to `view`.
pub fn clear_target(encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, policy: ClearPolicy) {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("vista background clear"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            depth_slice: None,
            resolve_target: None,
            ops: wgpu::Operations { load: policy.load_op(), store: wgpu::StoreOp::Store },
        })],
        ..Default::default()
    });
}
