use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::coords::Rect;
use crate::draw::{DrawCmd, DrawList, TextRun};
use crate::render::{RenderCtx, RenderTarget};
use crate::text::FontSystem;

use super::common::{draw_clipped, overlay_pipeline, InstanceBuffer, QuadBuffers, SurfaceUniform};

/// Side length of the square glyph atlas in texels.
const ATLAS_SIZE: u32 = 1024;
/// Empty texels around every glyph so linear filtering never bleeds.
const GAP: u32 = 1;

/// Places glyph bitmaps in rows ("shelves") from the top-left of the atlas.
/// Once a glyph does not fit below the last shelf the packer refuses all
/// further requests.
#[derive(Debug)]
struct ShelfPacker {
    x: u32,
    shelf_top: u32,
    shelf_height: u32,
    exhausted: bool,
}

impl Default for ShelfPacker {
    fn default() -> Self {
        Self { x: GAP, shelf_top: GAP, shelf_height: 0, exhausted: false }
    }
}

impl ShelfPacker {
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.exhausted {
            return None;
        }
        if self.x + w + GAP > ATLAS_SIZE {
            self.shelf_top += self.shelf_height + GAP;
            self.shelf_height = 0;
            self.x = GAP;
        }
        if self.shelf_top + h + GAP > ATLAS_SIZE {
            self.exhausted = true;
            return None;
        }
        let at = (self.x, self.shelf_top);
        self.x += w + GAP;
        self.shelf_height = self.shelf_height.max(h);
        Some(at)
    }
}

/// Texture coordinates of one cached glyph.
#[derive(Debug, Copy, Clone, PartialEq)]
struct AtlasSlot {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

impl AtlasSlot {
    fn at(x: u32, y: u32, w: u32, h: u32) -> Self {
        let texel = 1.0 / ATLAS_SIZE as f32;
        Self {
            uv_min: [x as f32 * texel, y as f32 * texel],
            uv_max: [(x + w) as f32 * texel, (y + h) as f32 * texel],
        }
    }
}

/// Single-channel coverage atlas. Glyphs are rasterized once, at physical
/// size, and kept for the renderer's lifetime.
struct GlyphAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    packer: ShelfPacker,
    // `None` marks glyphs that did not fit, so they are not retried.
    slots: HashMap<GlyphRasterConfig, Option<AtlasSlot>>,
}

impl GlyphAtlas {
    fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("vista glyph atlas"),
            size: wgpu::Extent3d { width: ATLAS_SIZE, height: ATLAS_SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&Default::default());
        Self { texture, view, packer: ShelfPacker::default(), slots: HashMap::new() }
    }

    fn slot(&mut self, queue: &wgpu::Queue, font: &fontdue::Font, key: GlyphRasterConfig) -> Option<AtlasSlot> {
        if let Some(cached) = self.slots.get(&key) {
            return *cached;
        }
        let (metrics, coverage) = font.rasterize_config(key);
        let slot = self.upload(queue, &coverage, metrics.width as u32, metrics.height as u32);
        self.slots.insert(key, slot);
        slot
    }

    fn upload(&mut self, queue: &wgpu::Queue, coverage: &[u8], w: u32, h: u32) -> Option<AtlasSlot> {
        if w == 0 || h == 0 {
            return None;
        }
        let was_exhausted = self.packer.exhausted;
        let Some((x, y)) = self.packer.allocate(w, h) else {
            if !was_exhausted {
                log::warn!("glyph atlas full ({ATLAS_SIZE}x{ATLAS_SIZE}); further glyphs are skipped");
            }
            return None;
        };

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            coverage,
            wgpu::TexelCopyBufferLayout { offset: 0, bytes_per_row: Some(w), rows_per_image: Some(h) },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );
        Some(AtlasSlot::at(x, y, w, h))
    }
}

/// Pipeline state tied to one surface format.
struct TextGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    surface_ubo: wgpu::Buffer,
    quad: QuadBuffers,
}

impl TextGpu {
    fn new(ctx: &RenderCtx<'_>, atlas: &GlyphAtlas) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vista text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let fragment_entry = |binding, ty| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty,
            count: None,
        };
        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vista text bgl"),
            entries: &[
                SurfaceUniform::layout_entry(),
                fragment_entry(1, wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                }),
                fragment_entry(2, wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering)),
            ],
        });
        let pipeline = overlay_pipeline(ctx, "vista text pipeline", &shader, &bgl, GlyphInstance::layout());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("vista text sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let surface_ubo = SurfaceUniform::create_buffer(ctx.device, "vista text surface ubo");
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vista text bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: surface_ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(&atlas.view) },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&sampler) },
            ],
        });

        Self {
            format: ctx.surface_format,
            pipeline,
            bind_group,
            surface_ubo,
            quad: QuadBuffers::new(ctx.device, "vista text quad"),
        }
    }
}

/// Draws the list's text runs, laid out with fontdue at physical size.
pub struct TextRenderer {
    // Survives surface format changes; only `gpu` is rebuilt.
    atlas: Option<GlyphAtlas>,
    gpu: Option<TextGpu>,
    instances: InstanceBuffer,
    layout: Layout<()>,
    batch: Vec<GlyphInstance>,
    clips: Vec<Option<Rect>>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            atlas: None,
            gpu: None,
            instances: InstanceBuffer::default(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            batch: Vec::new(),
            clips: Vec::new(),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.batch.clear();
        self.clips.clear();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Text(run) = &item.cmd else { continue };
            let Some(font) = fonts.get(run.font) else {
                log::warn!("text run uses unknown {:?}", run.font);
                continue;
            };
            let atlas = self.atlas.get_or_insert_with(|| GlyphAtlas::new(ctx.device));
            let before = self.batch.len();
            layout_run(&mut self.layout, atlas, ctx, font, run, &mut self.batch);
            let added = self.batch.len() - before;
            self.clips.extend(std::iter::repeat_n(item.clip_rect, added));
        }
        if self.batch.is_empty() {
            return;
        }

        let Some(atlas) = self.atlas.as_ref() else { return };
        if self.gpu.as_ref().is_none_or(|g| g.format != ctx.surface_format) {
            self.gpu = Some(TextGpu::new(ctx, atlas));
        }
        let Some(gpu) = self.gpu.as_ref() else { return };

        ctx.queue.write_buffer(&gpu.surface_ubo, 0, bytemuck::bytes_of(&SurfaceUniform::from_ctx(ctx)));
        let instances = self.instances.upload(ctx, "vista text instances", &self.batch);

        let mut pass = target.begin_overlay_pass("vista text pass");
        pass.set_pipeline(&gpu.pipeline);
        pass.set_bind_group(0, &gpu.bind_group, &[]);
        draw_clipped(&mut pass, ctx, &gpu.quad, instances, &self.clips);
    }
}

/// Lays out one run and appends a quad per visible glyph.
fn layout_run(
    layout: &mut Layout<()>,
    atlas: &mut GlyphAtlas,
    ctx: &RenderCtx<'_>,
    font: &fontdue::Font,
    run: &TextRun,
    out: &mut Vec<GlyphInstance>,
) {
    let scale = ctx.scale_factor;
    // Whole physical pixels keep glyph edges crisp.
    let origin = (run.origin * scale).round();
    layout.reset(&LayoutSettings { x: origin.x, y: origin.y, ..LayoutSettings::default() });
    layout.append(&[font], &TextStyle::new(&run.text, run.size * scale, 0));

    let color = run.color.to_array();
    for glyph in layout.glyphs() {
        if !glyph.char_data.rasterize() || glyph.width == 0 || glyph.height == 0 {
            continue;
        }
        let Some(slot) = atlas.slot(ctx.queue, font, glyph.key) else { continue };
        out.push(GlyphInstance {
            dst_min: [glyph.x, glyph.y],
            dst_max: [glyph.x + glyph.width as f32, glyph.y + glyph.height as f32],
            uv_min: slot.uv_min,
            uv_max: slot.uv_max,
            color,
        });
    }
}

/// Destination and atlas rectangles of one glyph quad, physical pixels.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, 2 => Float32x2, 3 => Float32x2, 4 => Float32x2, 5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_share_a_shelf_until_it_is_full() {
        let mut packer = ShelfPacker::default();
        assert_eq!(packer.allocate(10, 12), Some((1, 1)));
        assert_eq!(packer.allocate(10, 8), Some((12, 1)));

        packer.allocate(ATLAS_SIZE - 40, 30);
        // The tallest glyph on the first shelf was 30 texels.
        assert_eq!(packer.allocate(30, 5), Some((1, 32)));
    }

    #[test]
    fn exhausted_packer_refuses_everything() {
        let mut packer = ShelfPacker::default();
        assert_eq!(packer.allocate(10, ATLAS_SIZE), None);
        assert!(packer.exhausted);
        assert_eq!(packer.allocate(1, 1), None);
    }

    #[test]
    fn slot_uvs_cover_the_glyph_texels() {
        let slot = AtlasSlot::at(512, 256, 256, 128);
        assert_eq!(slot.uv_min, [0.5, 0.25]);
        assert_eq!(slot.uv_max, [0.75, 0.375]);
    }

    #[test]
    fn glyph_instance_matches_shader_layout() {
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 48);
        assert_eq!(GlyphInstance::ATTRS[4].offset, 32);
    }
}
