//! GPU objects owned by a scene: uniforms, textures, depth buffer, pipeline.

mod depth;
mod pipeline;
mod shader;
mod texture;
mod uniforms;

pub use depth::DepthBuffer;
pub use pipeline::{bind_group_layout, scene_blend, scene_pipeline};
pub use shader::load_shader_module;
pub use texture::{create_sampler, mip_chain, mip_level_count, SceneTexture};
pub use uniforms::{LightingUniforms, SceneField, SceneUniforms};
