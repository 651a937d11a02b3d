//! Line-based mesh format.
//!
//! ```text
//! # comment
//! [points]
//! -0.5 -0.5  1.0 0.4 0.4
//! ...
//! [indices]
//! 0 1 2
//! ```
//!
//! Point rows hold `x y [z] r g b`, index rows three corner indices.

use std::path::Path;

use glam::Vec3;

use super::{flat_normal, GeometryError, Mesh, VertexAttributes};

/// Points and triangle indices as read from a text mesh.
///
/// Only built by the parser, so every index names an existing point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBuffer {
    /// 2 or 3.
    dimensions: u32,
    /// `dimensions + 3` floats per point.
    points: Vec<f32>,
    /// Corner indices, three per triangle.
    indices: Vec<u16>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Section {
    Points,
    Indices,
}

impl PointBuffer {
    pub fn load(path: impl AsRef<Path>, dimensions: u32) -> Result<Self, GeometryError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| GeometryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&src, dimensions)
    }

    pub fn parse_str(src: &str, dimensions: u32) -> Result<Self, GeometryError> {
        if !(2..=3).contains(&dimensions) {
            return Err(GeometryError::InvalidDimensions(dimensions));
        }
        let stride = dimensions as usize + 3;

        let mut section = None;
        let mut points = Vec::new();
        let mut indices = Vec::new();
        // (line, index) pairs, checked once every point is known.
        let mut referenced = Vec::new();

        for (n, raw) in src.lines().enumerate() {
            let line_no = n + 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw).trim_end();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = Some(match name {
                    "points" => Section::Points,
                    "indices" => Section::Indices,
                    other => {
                        return Err(GeometryError::UnknownSection {
                            line: line_no,
                            name: other.to_string(),
                        });
                    }
                });
                continue;
            }

            match section {
                None => return Err(GeometryError::MissingSection { line: line_no }),
                Some(Section::Points) => {
                    let start = points.len();
                    for token in line.split_whitespace() {
                        let v: f32 = token.parse().map_err(|_| GeometryError::InvalidNumber {
                            line: line_no,
                            token: token.to_string(),
                        })?;
                        points.push(v);
                    }
                    let found = points.len() - start;
                    if found != stride {
                        return Err(GeometryError::PointArity {
                            line: line_no,
                            expected: stride,
                            found,
                        });
                    }
                }
                Some(Section::Indices) => {
                    let tokens: Vec<&str> = line.split_whitespace().collect();
                    if tokens.len() != 3 {
                        return Err(GeometryError::IndexArity {
                            line: line_no,
                            found: tokens.len(),
                        });
                    }
                    for token in tokens {
                        let index = parse_index(token, line_no)?;
                        indices.push(index);
                        referenced.push((line_no, index));
                    }
                }
            }
        }

        let point_count = points.len() / stride;
        if let Some(&(line, index)) = referenced.iter().find(|(_, i)| *i as usize >= point_count) {
            return Err(GeometryError::MissingPoint { line, index, point_count });
        }

        Ok(Self { dimensions, points, indices })
    }

    pub fn dimensions(&self) -> u32 {
        self.dimensions
    }

    pub fn points(&self) -> &[f32] {
        &self.points
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.dimensions as usize + 3
    }

    pub fn point_count(&self) -> usize {
        self.points.len() / self.stride()
    }

    fn position(&self, i: usize) -> Vec3 {
        let p = &self.points[i * self.stride()..];
        if self.dimensions == 2 {
            Vec3::new(p[0], p[1], 0.0)
        } else {
            Vec3::new(p[0], p[1], p[2])
        }
    }

    fn color(&self, i: usize) -> [f32; 3] {
        let base = i * self.stride() + self.dimensions as usize;
        [self.points[base], self.points[base + 1], self.points[base + 2]]
    }

    /// Expands the indexed triangles into a flat vertex list.
    ///
    /// 2D points lie in the z = 0 plane facing +Z; 3D triangles get their flat
    /// face normal. UVs are zero.
    pub fn to_mesh(&self) -> Mesh {
        let mut vertices = Vec::with_capacity(self.indices.len());

        for tri in self.indices.chunks_exact(3) {
            let corners = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let normal = if self.dimensions == 2 {
                Vec3::Z
            } else {
                flat_normal(
                    self.position(corners[0]),
                    self.position(corners[1]),
                    self.position(corners[2]),
                )
            };

            for i in corners {
                vertices.push(VertexAttributes {
                    position: self.position(i).to_array(),
                    normal: normal.to_array(),
                    color: self.color(i),
                    uv: [0.0, 0.0],
                });
            }
        }

        Mesh::from_vertices(vertices)
    }
}

fn parse_index(token: &str, line: usize) -> Result<u16, GeometryError> {
    let wide: i64 = token.parse().map_err(|_| GeometryError::InvalidNumber {
        line,
        token: token.to_string(),
    })?;
    u16::try_from(wide).map_err(|_| GeometryError::IndexOutOfRange {
        line,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_2D: &str = "\
# a single triangle
[points]
-0.5 -0.5   1.0 0.0 0.0
 0.5 -0.5   0.0 1.0 0.0
 0.0  0.5   0.0 0.0 1.0

[indices]
0 1 2
";

    #[test]
    fn parses_three_points_and_one_triangle() {
        let buf = PointBuffer::parse_str(TRIANGLE_2D, 2).unwrap();
        assert_eq!(buf.points().len(), 3 * (2 + 3));
        assert_eq!(buf.indices(), [0, 1, 2]);
        assert_eq!(buf.point_count(), 3);
    }

    #[test]
    fn parses_3d_points() {
        let src = "[points]\n0 0 0 1 1 1\n1 0 0 1 1 1\n0 1 0 1 1 1\n[indices]\n0 1 2\n";
        let buf = PointBuffer::parse_str(src, 3).unwrap();
        assert_eq!(buf.points().len(), 3 * (3 + 3));
        assert_eq!(buf.indices().len(), 3);
    }

    #[test]
    fn strips_carriage_returns() {
        let src = TRIANGLE_2D.replace('\n', "\r\n");
        let buf = PointBuffer::parse_str(&src, 2).unwrap();
        assert_eq!(buf.indices(), [0, 1, 2]);
    }

    #[test]
    fn rejects_wrong_value_count_for_dimensions() {
        // 2D rows parsed as 3D.
        let err = PointBuffer::parse_str(TRIANGLE_2D, 3).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::PointArity { line: 3, expected: 6, found: 5 }
        ));
    }

    #[test]
    fn rejects_unsupported_dimensions() {
        assert!(matches!(
            PointBuffer::parse_str(TRIANGLE_2D, 4),
            Err(GeometryError::InvalidDimensions(4))
        ));
        assert!(matches!(
            PointBuffer::parse_str(TRIANGLE_2D, 1),
            Err(GeometryError::InvalidDimensions(1))
        ));
    }

    #[test]
    fn rejects_short_index_rows() {
        let src = "[points]\n0 0 1 1 1\n[indices]\n0 0\n";
        assert!(matches!(
            PointBuffer::parse_str(src, 2),
            Err(GeometryError::IndexArity { line: 4, found: 2 })
        ));
    }

    #[test]
    fn rejects_indices_outside_u16() {
        let src = "[points]\n0 0 1 1 1\n[indices]\n0 0 70000\n";
        assert!(matches!(
            PointBuffer::parse_str(src, 2),
            Err(GeometryError::IndexOutOfRange { line: 4, .. })
        ));
        let src = "[points]\n0 0 1 1 1\n[indices]\n0 -1 0\n";
        assert!(matches!(
            PointBuffer::parse_str(src, 2),
            Err(GeometryError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_reference_to_missing_point() {
        let src = "[points]\n0 0 1 1 1\n0 1 1 1 1\n[indices]\n0 1 2\n";
        assert!(matches!(
            PointBuffer::parse_str(src, 2),
            Err(GeometryError::MissingPoint { line: 5, index: 2, point_count: 2 })
        ));
    }

    #[test]
    fn rejects_garbage_numbers() {
        let src = "[points]\n0 zero 1 1 1\n";
        let err = PointBuffer::parse_str(src, 2).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidNumber { line: 2, ref token } if token == "zero"));
    }

    #[test]
    fn rejects_data_before_header_and_unknown_headers() {
        assert!(matches!(
            PointBuffer::parse_str("0 0 1 1 1\n", 2),
            Err(GeometryError::MissingSection { line: 1 })
        ));
        assert!(matches!(
            PointBuffer::parse_str("# hi\n[normals]\n", 2),
            Err(GeometryError::UnknownSection { line: 2, .. })
        ));
    }

    #[test]
    fn error_messages_carry_line_numbers() {
        let err = PointBuffer::parse_str("\n\n[points]\n1 2\n", 2).unwrap_err();
        assert!(err.to_string().starts_with("line 4:"), "{err}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PointBuffer::load("/definitely/not/here.txt", 2).unwrap_err();
        assert!(matches!(err, GeometryError::Io { .. }));
    }

    #[test]
    fn parsed_indices_all_name_points() {
        let src = "[points]\n0 0 1 1 1\n1 0 1 1 1\n0 1 1 1 1\n1 1 1 1 1\n[indices]\n0 1 2\n1 3 2\n";
        let buf = PointBuffer::parse_str(src, 2).unwrap();
        assert_eq!(buf.dimensions(), 2);
        assert!(buf.indices().iter().all(|&i| (i as usize) < buf.point_count()));
        assert_eq!(buf.to_mesh().vertex_count(), 6);
    }

    #[test]
    fn to_mesh_expands_indices() {
        let buf = PointBuffer::parse_str(TRIANGLE_2D, 2).unwrap();
        let mesh = buf.to_mesh();
        assert_eq!(mesh.vertex_count(), 3);

        let v = mesh.vertices();
        assert_eq!(v[1].position, [0.5, -0.5, 0.0]);
        assert_eq!(v[1].color, [0.0, 1.0, 0.0]);
        assert_eq!(v[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(v[2].uv, [0.0, 0.0]);
    }

    #[test]
    fn to_mesh_uses_face_normal_for_3d() {
        let src = "[points]\n0 0 0 1 1 1\n1 0 0 1 1 1\n0 1 0 1 1 1\n[indices]\n0 1 2\n";
        let mesh = PointBuffer::parse_str(src, 3).unwrap().to_mesh();
        for v in mesh.vertices() {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }
}
