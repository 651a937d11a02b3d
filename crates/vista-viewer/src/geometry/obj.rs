use std::io::BufRead;
use std::path::Path;

use glam::Vec3;

use super::{flat_normal, GeometryError, Mesh, VertexAttributes};

/// Loads a Wavefront OBJ file into a flat, non-indexed mesh.
///
/// Positions and normals are remapped from Y-up to Z-up as `(x, -z, y)` and
/// texture coordinates flipped to a top-left origin. Material problems are
/// logged and otherwise ignored.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, GeometryError> {
    let path = path.as_ref();
    let (models, materials) =
        tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS).map_err(|source| GeometryError::Obj {
            path: path.to_path_buf(),
            source,
        })?;

    if let Err(err) = materials {
        log::warn!("{}: materials not loaded: {err}", path.display());
    }

    let mesh = mesh_from_models(&models);
    log::debug!(
        "{}: {} model(s), {} vertices",
        path.display(),
        models.len(),
        mesh.vertex_count()
    );
    Ok(mesh)
}

/// Parses OBJ source from a reader. `mtllib` references are not followed.
pub fn read_obj(mut reader: impl BufRead) -> Result<Mesh, tobj::LoadError> {
    let (models, _) = tobj::load_obj_buf(&mut reader, &tobj::GPU_LOAD_OPTIONS, |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    Ok(mesh_from_models(&models))
}

/// Y-up OBJ space to the viewer's Z-up space.
#[inline]
fn remap(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, -z, y)
}

/// Three consecutive floats for vertex `i`, if the attribute array covers it.
/// tobj leaves normal, color and UV arrays short when only some faces carry
/// them.
#[inline]
fn triple(data: &[f32], i: usize) -> Option<[f32; 3]> {
    let s = data.get(i * 3..i * 3 + 3)?;
    Some([s[0], s[1], s[2]])
}

#[inline]
fn pair(data: &[f32], i: usize) -> Option<[f32; 2]> {
    let s = data.get(i * 2..i * 2 + 2)?;
    Some([s[0], s[1]])
}

fn mesh_from_models(models: &[tobj::Model]) -> Mesh {
    let total = models.iter().map(|m| m.mesh.indices.len()).sum();
    let mut vertices = Vec::with_capacity(total);

    for model in models {
        let mesh = &model.mesh;

        for chunk in mesh.indices.chunks_exact(3) {
            let tri = [chunk[0] as usize, chunk[1] as usize, chunk[2] as usize];
            let Some(corners) = tri
                .iter()
                .map(|&i| triple(&mesh.positions, i).map(|[x, y, z]| remap(x, y, z)))
                .collect::<Option<Vec<_>>>()
            else {
                log::warn!("{}: skipping face with a missing position", model.name);
                continue;
            };
            let face_normal = flat_normal(corners[0], corners[1], corners[2]);

            for (corner, &i) in tri.iter().enumerate() {
                let normal = triple(&mesh.normals, i)
                    .map(|[x, y, z]| remap(x, y, z))
                    .unwrap_or(face_normal);
                let color = triple(&mesh.vertex_color, i).unwrap_or([1.0, 1.0, 1.0]);
                let uv = pair(&mesh.texcoords, i).map_or([0.0, 0.0], |[u, v]| [u, 1.0 - v]);

                vertices.push(VertexAttributes {
                    position: corners[corner].to_array(),
                    normal: normal.to_array(),
                    color,
                    uv,
                });
            }
        }
    }

    Mesh::from_vertices(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
o quad
v 0 0 0
v 1 0 0
v 1 2 0
v 0 2 -3
vt 0 0
vt 1 0
vt 1 1
vt 0 0.25
vn 0 1 0
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn triangulates_and_expands() {
        let mesh = read_obj(QUAD.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
    }

    #[test]
    fn remaps_y_up_to_z_up() {
        let mesh = read_obj(QUAD.as_bytes()).unwrap();
        let v = mesh.vertices();
        // v 1 2 0 -> (1, -0, 2)
        assert!(v.iter().any(|v| v.position == [1.0, 0.0, 2.0]));
        // v 0 2 -3 -> (0, 3, 2)
        assert!(v.iter().any(|v| v.position == [0.0, 3.0, 2.0]));
        // vn 0 1 0 -> (0, 0, 1)
        for v in v {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn flips_v_and_defaults_color_to_white() {
        let mesh = read_obj(QUAD.as_bytes()).unwrap();
        let corner = mesh
            .vertices()
            .iter()
            .find(|v| v.position == [0.0, 3.0, 2.0])
            .copied()
            .unwrap();
        assert_eq!(corner.uv, [0.0, 0.75]);
        assert_eq!(corner.color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn missing_normals_fall_back_to_face_normal() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 0 -1\nf 1 2 3\n";
        let mesh = read_obj(src.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);

        let n = Vec3::from_array(mesh.vertices()[0].normal);
        assert!((n.length() - 1.0).abs() < 1e-5);
        // Triangle lies in the remapped z = 0 plane.
        assert!(n.x.abs() < 1e-5 && n.y.abs() < 1e-5);
    }

    #[test]
    fn faces_without_uvs_mix_with_textured_faces() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\nf 2 4 3\n";
        let mesh = read_obj(src.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
    }

    #[test]
    fn faces_without_normals_mix_with_shaded_faces() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\nf 2 4 3\n";
        let mesh = read_obj(src.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        for v in mesh.vertices() {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_obj("/definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, GeometryError::Obj { .. }));
    }
}
