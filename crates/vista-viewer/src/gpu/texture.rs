use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::RgbaImage;

/// Sampled texture and its view. The texture is kept alive with the view.
pub struct SceneTexture {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl SceneTexture {
    /// Decodes an image file and uploads it with a full mip chain.
    pub fn from_path(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?
            .to_rgba8();
        log::debug!("texture {}: {}x{}", path.display(), image.width(), image.height());
        Ok(Self::from_mips(device, queue, &mip_chain(image), "scene texture"))
    }

    /// 1x1 opaque white, used when a scene has no texture.
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let pixel = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        Self::from_mips(device, queue, &[pixel], "white texture")
    }

    fn from_mips(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mips: &[RgbaImage],
        label: &str,
    ) -> Self {
        let (width, height) = mips.first().map(|m| m.dimensions()).unwrap_or((1, 1));

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: mips.len().max(1) as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in mips.iter().enumerate() {
            let (w, h) = mip.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                mip.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * w),
                    rows_per_image: Some(h),
                },
                wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { _texture: texture, view }
    }
}

/// Repeat addressing, trilinear filtering.
pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("scene sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        lod_min_clamp: 0.0,
        lod_max_clamp: 8.0,
        compare: None,
        anisotropy_clamp: 1,
        border_color: None,
    })
}

/// Number of levels down to 1x1 for a `width` x `height` image.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Base image followed by successively halved levels, down to 1x1.
pub fn mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height());
    let mut mips = Vec::with_capacity(levels as usize);
    mips.push(base);

    for _ in 1..levels {
        let Some(prev) = mips.last() else { break };
        let w = (prev.width() / 2).max(1);
        let h = (prev.height() / 2).max(1);
        let next = image::imageops::resize(prev, w, h, FilterType::Triangle);
        mips.push(next);
    }
    mips
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_count_reaches_one_pixel() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(300, 20), 9);
    }

    #[test]
    fn mip_chain_halves_each_level() {
        let base = RgbaImage::from_pixel(8, 2, image::Rgba([10, 20, 30, 255]));
        let mips = mip_chain(base);
        let dims: Vec<(u32, u32)> = mips.iter().map(|m| m.dimensions()).collect();
        assert_eq!(dims, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
        // Uniform color survives filtering.
        assert_eq!(mips[3].get_pixel(0, 0).0, [10, 20, 30, 255]);
    }
}
