//! A scene draws one mesh with its own orbit camera into one viewport of the
//! shared output surface.
//!
//! Scenes never own the device, queue or surface. Those are lent at
//! construction ([`SceneInit`]) and per call. Everything else a scene draws
//! with (pipeline, buffers, texture, depth buffer) is its own.

mod clear;
mod view;

pub use clear::{clear_target, ClearPolicy, CLEAR_COLOR};
pub use view::{projection_for, PendingUploads, SceneView, FOV_Y_DEGREES, Z_FAR, Z_NEAR};

use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use vista_engine::coords::{CanvasSize, ViewportRect};

use crate::camera::CameraController;
use crate::config::{MeshSource, SceneDesc, ViewerConfig};
use crate::geometry::{load_obj, Mesh, PointBuffer};
use crate::gpu::{
    bind_group_layout, create_sampler, load_shader_module, scene_pipeline, DepthBuffer,
    LightingUniforms, SceneField, SceneTexture,
};

/// Borrowed GPU context a scene is created with.
pub struct SceneInit<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub color_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
    /// Full output surface, physical pixels.
    pub output_size: CanvasSize,
    pub viewport: ViewportRect,
}

pub struct Scene {
    name: String,
    view: SceneView,

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    /// `None` for a mesh without triangles.
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    depth: DepthBuffer,
    depth_format: wgpu::TextureFormat,

    _texture: SceneTexture,
    _sampler: wgpu::Sampler,
}

impl Scene {
    /// Loads the scene's mesh, texture and shader and creates its GPU objects.
    pub fn on_init(init: &SceneInit<'_>, desc: &SceneDesc, config: &ViewerConfig) -> Result<Self> {
        let mesh = load_mesh(desc, config)
            .with_context(|| format!("scene `{}`: failed to load mesh", desc.name))?;

        let texture = match &desc.texture {
            Some(path) => SceneTexture::from_path(init.device, init.queue, &config.resource(path))
                .with_context(|| format!("scene `{}`", desc.name))?,
            None => SceneTexture::white(init.device, init.queue),
        };
        let sampler = create_sampler(init.device);

        let shader = load_shader_module(init.device, &config.resource(&desc.shader))
            .with_context(|| format!("scene `{}`", desc.name))?;

        let view = SceneView::new(init.viewport, desc.camera);

        let uniform_buffer = init.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene uniforms"),
            contents: bytemuck::bytes_of(view.uniforms()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lighting_buffer = init.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene lighting"),
            contents: bytemuck::bytes_of(view.lighting()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let vertex_buffer = if mesh.is_empty() {
            log::warn!("scene `{}`: mesh has no triangles", desc.name);
            None
        } else {
            Some(init.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("scene vertices"),
                contents: mesh.as_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            }))
        };

        let bgl = bind_group_layout(init.device);
        let bind_group = init.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: lighting_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline =
            scene_pipeline(init.device, &shader, &bgl, init.color_format, init.depth_format);
        let depth = DepthBuffer::new(init.device, init.depth_format, init.output_size);

        log::info!(
            "scene `{}`: {} vertices, viewport {:?}",
            desc.name,
            mesh.vertex_count(),
            init.viewport
        );

        let mut scene = Self {
            name: desc.name.clone(),
            view,
            pipeline,
            bind_group,
            uniform_buffer,
            lighting_buffer,
            vertex_buffer,
            vertex_count: mesh.vertex_count(),
            depth,
            depth_format: init.depth_format,
            _texture: texture,
            _sampler: sampler,
        };
        // Everything was uploaded with the initial buffer contents.
        scene.view.take_pending();
        Ok(scene)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> &SceneView {
        &self.view
    }

    pub fn camera(&self) -> &CameraController {
        self.view.camera()
    }

    pub fn viewport(&self) -> ViewportRect {
        self.view.viewport()
    }

    /// Lighting for editing; the change is uploaded next frame.
    pub fn lighting_mut(&mut self) -> &mut LightingUniforms {
        self.view.lighting_mut()
    }

    pub fn lighting(&self) -> &LightingUniforms {
        self.view.lighting()
    }

    pub fn set_inertia_enabled(&mut self, enabled: bool) {
        self.view.set_inertia_enabled(enabled);
    }

    /// Adopts a new output size and viewport.
    pub fn on_resize(&mut self, device: &wgpu::Device, output_size: CanvasSize, viewport: ViewportRect) {
        if output_size.is_valid() && self.depth.size() != output_size {
            self.depth = DepthBuffer::new(device, self.depth_format, output_size);
        }
        self.view.set_viewport(viewport);
    }

    pub fn hit_test(&self, x: f32, y: f32) -> bool {
        self.view.hit_test(x, y)
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.view.on_pointer_down(x, y)
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.view.on_pointer_move(x, y)
    }

    pub fn on_pointer_up(&mut self) {
        self.view.on_pointer_up();
    }

    pub fn on_scroll(&mut self, x: f32, y: f32, delta_y: f32) -> bool {
        self.view.on_scroll(x, y, delta_y)
    }

    /// Updates uniforms and encodes this scene's pass into `encoder`.
    ///
    /// `output_size` is the size of `output_view`; the viewport is clamped to
    /// it. The depth buffer is always cleared.
    pub fn on_frame(
        &mut self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        output_size: CanvasSize,
        clear: ClearPolicy,
        time: f32,
    ) {
        self.view.tick();
        self.view.set_time(time);
        self.upload(queue);

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: clear.load_op(),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        // Clamp to both attachments.
        let bounds = CanvasSize::new(
            output_size.width.min(self.depth.size().width),
            output_size.height.min(self.depth.size().height),
        );
        let vp = self.view.viewport().clamped_to(bounds.width, bounds.height);
        let Some(vertex_buffer) = self.vertex_buffer.as_ref() else { return };
        if vp.is_empty() {
            return;
        }

        pass.set_viewport(
            vp.x as f32,
            vp.y as f32,
            vp.width as f32,
            vp.height as f32,
            0.0,
            1.0,
        );
        pass.set_scissor_rect(vp.x, vp.y, vp.width, vp.height);
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }

    fn upload(&mut self, queue: &wgpu::Queue) {
        let pending = self.view.take_pending();
        for field in SceneView::dirty_fields(pending) {
            self.view.uniforms().write_field(queue, &self.uniform_buffer, field);
        }
        self.view
            .uniforms()
            .write_field(queue, &self.uniform_buffer, SceneField::Time);

        if pending.lighting {
            queue.write_buffer(&self.lighting_buffer, 0, bytemuck::bytes_of(self.view.lighting()));
        }
    }
}

/// Reads the mesh named by `desc` from the resource directory.
pub fn load_mesh(desc: &SceneDesc, config: &ViewerConfig) -> Result<Mesh> {
    let mesh = match &desc.mesh {
        MeshSource::Obj(path) => load_obj(config.resource(path))?,
        MeshSource::Text { path, dimensions } => {
            PointBuffer::load(config.resource(path), *dimensions)?.to_mesh()
        }
    };
    Ok(mesh)
}

/// Draw-order helper: one clear followed by loads.
pub fn clear_policies(count: usize) -> impl Iterator<Item = ClearPolicy> {
    (0..count).map(ClearPolicy::for_draw_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_frame_clears_exactly_once() {
        for count in 0..4 {
            let clears = clear_policies(count)
                .chain(ClearPolicy::background(count))
                .filter(|p| matches!(p, ClearPolicy::Clear(_)))
                .count();
            assert_eq!(clears, 1, "{count} scenes");
        }
        assert_eq!(clear_policies(0).count(), 0);
    }

    #[test]
    fn bundled_scene_meshes_load() {
        let config = ViewerConfig::new().resource_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/resources"));
        let counts: Vec<(String, u32)> = config
            .scenes
            .iter()
            .map(|desc| (desc.name.clone(), load_mesh(desc, &config).unwrap().vertex_count()))
            .collect();

        assert_eq!(
            counts,
            vec![
                ("cube".to_string(), 36),
                ("pyramid".to_string(), 18),
                ("logo".to_string(), 9),
            ]
        );
    }

    #[test]
    fn bundled_resources_exist() {
        let config = ViewerConfig::new().resource_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/resources"));
        for desc in &config.scenes {
            let shader = std::fs::read_to_string(config.resource(&desc.shader)).unwrap();
            assert!(shader.contains("fn vs_main") && shader.contains("fn fs_main"));
            if let Some(texture) = &desc.texture {
                let image = image::open(config.resource(texture)).unwrap();
                assert_eq!((image.width(), image.height()), (64, 64));
            }
        }
    }

    #[test]
    fn missing_mesh_names_the_file() {
        let config = ViewerConfig::new().resource_dir("/nowhere");
        let desc = SceneDesc::new("ghost", MeshSource::Obj("ghost.obj".into()));
        let err = load_mesh(&desc, &config).unwrap_err();
        assert!(format!("{err:#}").contains("ghost.obj"), "{err:#}");
    }
}
