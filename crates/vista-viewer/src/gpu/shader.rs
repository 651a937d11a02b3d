use std::path::Path;

use anyhow::{Context, Result};

/// Reads a WGSL file and compiles it into a shader module.
///
/// Compilation errors surface through the device's uncaptured-error channel.
pub fn load_shader_module(device: &wgpu::Device, path: &Path) -> Result<wgpu::ShaderModule> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read shader {}", path.display()))?;

    let label = path.file_name().and_then(|n| n.to_str()).unwrap_or("scene shader");
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    }))
}
