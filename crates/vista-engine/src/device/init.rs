/// How the device and window surface are set up.
///
/// Defaults suit the viewer: vsync on, sRGB output and a 24-bit depth
/// format shared by every scene's depth buffer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Waits for vblank when set; otherwise presents as fast as the
    /// platform allows.
    pub vsync: bool,
    pub prefer_srgb: bool,
    /// Used when the surface supports it, else its first supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
    pub depth_format: wgpu::TextureFormat,
    pub power_preference: wgpu::PowerPreference,
    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,
    /// Frames the CPU may queue ahead of presentation. A hint.
    pub max_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            vsync: true,
            prefer_srgb: true,
            alpha_mode: None,
            depth_format: wgpu::TextureFormat::Depth24Plus,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            max_frame_latency: 2,
        }
    }
}

impl GpuInit {
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_depth_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.depth_format = format;
        self
    }

    /// `Fifo` is the only mode every surface supports; the `Auto*` modes fall
    /// back to it where needed.
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync { wgpu::PresentMode::AutoVsync } else { wgpu::PresentMode::AutoNoVsync }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_selects_present_mode() {
        let init = GpuInit::default();
        assert_eq!(init.present_mode(), wgpu::PresentMode::AutoVsync);
        assert_eq!(init.with_vsync(false).present_mode(), wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn default_depth_format_has_no_stencil() {
        let format = GpuInit::default().depth_format;
        assert!(format.has_depth_aspect());
        assert!(!format.has_stencil_aspect());
    }

    #[test]
    fn limits_are_borrowed_alongside_surface_settings() {
        let init = GpuInit::default();
        let limits = init.required_limits.clone();
        assert_eq!(limits, wgpu::Limits::default());
        assert_eq!(init.present_mode(), wgpu::PresentMode::AutoVsync);
    }
}
