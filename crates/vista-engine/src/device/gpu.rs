use std::sync::mpsc::Receiver;

use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::window::Window;

use super::{events, surface, GpuEvent, GpuInit, SurfaceErrorAction};
use crate::coords::CanvasSize;

/// The acquired surface texture and the one encoder all of a frame's passes
/// record into. Acquiring the next frame waits until this is submitted.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Owns the wgpu device, queue and window surface.
///
/// Everything else (scenes, overlay renderers) borrows the device and queue
/// from here and owns only its own GPU objects.
pub struct Gpu<'w> {
    /// Surface bound to the window; the window must outlive it.
    surface: wgpu::Surface<'w>,
    adapter_info: wgpu::AdapterInfo,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_format: wgpu::TextureFormat,
    /// Physical pixels; may be zero while minimized.
    size: CanvasSize,
    events: Receiver<GpuEvent>,
}

impl<'w> Gpu<'w> {
    /// Creates the device and configures a surface for `window`.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = CanvasSize::from(window.inner_size());
        anyhow::ensure!(size.is_valid(), "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let adapter_info = adapter.get_info();
        log::info!("adapter: {} ({:?})", adapter_info.name, adapter_info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("vista device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let events = events::install(&device);

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, init.prefer_srgb)
            .context("surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode(),
            alpha_mode: surface::choose_alpha_mode(&caps, init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: init.max_frame_latency,
        };
        surface.configure(&device, &config);
        log::debug!("surface configured: {:?} {}x{}", format, size.width, size.height);

        Ok(Self {
            surface,
            adapter_info,
            device,
            queue,
            config,
            depth_format: init.depth_format,
            size,
            events,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn depth_format(&self) -> wgpu::TextureFormat {
        self.depth_format
    }

    /// Current drawable size in physical pixels.
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface after a resize. Zero sizes are recorded but
    /// leave the surface untouched.
    pub fn resize(&mut self, new_size: CanvasSize) {
        self.size = new_size;
        if surface::apply_size(&mut self.config, new_size) {
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Acquires the next surface texture and creates the frame's encoder.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("vista frame encoder"),
            });

        Ok(GpuFrame { surface_texture, view, encoder })
    }

    /// Finishes the encoder, submits once and presents.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame { surface_texture, view, encoder } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = surface::classify_surface_error(&err);
        match action {
            SurfaceErrorAction::Reconfigured => {
                if self.size.is_valid() {
                    self.surface.configure(&self.device, &self.config);
                }
                log::debug!("surface {err}; reconfigured");
            }
            SurfaceErrorAction::SkipFrame => log::debug!("surface {err}; frame skipped"),
            SurfaceErrorAction::Fatal => log::error!("surface {err}"),
        }
        action
    }

    /// Drains device events reported since the last call.
    pub fn poll_events(&self) -> Vec<GpuEvent> {
        self.events.try_iter().collect()
    }
}
