//! Mesh loading: the line-based text format and Wavefront OBJ, both producing
//! a flat [`Mesh`] of [`VertexAttributes`] drawn without an index buffer.

mod error;
mod obj;
mod text_format;
mod vertex;

pub use error::GeometryError;
pub use obj::{load_obj, read_obj};
pub use text_format::PointBuffer;
pub use vertex::VertexAttributes;

use glam::Vec3;

/// Non-indexed triangle list. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<VertexAttributes>,
}

impl Mesh {
    pub fn from_vertices(vertices: Vec<VertexAttributes>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[VertexAttributes] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Raw bytes for the vertex buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Unit normal of the counter-clockwise triangle `a b c`; +Z when degenerate.
pub(crate) fn flat_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).try_normalize().unwrap_or(Vec3::Z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_normal_follows_winding() {
        let n = flat_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(n, Vec3::Z);
        let n = flat_normal(Vec3::ZERO, Vec3::Y, Vec3::X);
        assert_eq!(n, -Vec3::Z);
    }

    #[test]
    fn degenerate_triangle_faces_up() {
        assert_eq!(flat_normal(Vec3::ONE, Vec3::ONE, Vec3::ONE), Vec3::Z);
    }

    #[test]
    fn mesh_bytes_match_vertex_size() {
        let mesh = Mesh::from_vertices(vec![VertexAttributes::default(); 3]);
        assert_eq!(mesh.as_bytes().len(), 3 * 44);
        assert_eq!(mesh.vertex_count(), 3);
    }
}
