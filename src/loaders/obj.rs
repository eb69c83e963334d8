use crate::error::Result;
use crate::loaders::assemble;
use crate::primitives::Shape;
use std::io::BufRead;
use std::path::Path;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        // Quads and larger faces are fanned into triangles.
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

/// Load every model of an OBJ file as an indexed shape.
///
/// Materials are ignored.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Vec<Shape>> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let shapes = to_shapes(models);
    tracing::info!("Loaded {} shapes from {}", shapes.len(), path.display());
    Ok(shapes)
}

/// Load OBJ data from a reader. `mtllib` statements are skipped.
pub fn load_obj_buf(reader: &mut impl BufRead) -> Result<Vec<Shape>> {
    let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    Ok(to_shapes(models))
}

fn to_shapes(models: Vec<tobj::Model>) -> Vec<Shape> {
    models
        .into_iter()
        .filter(|model| !model.mesh.indices.is_empty())
        .map(|model| {
            let mesh = model.mesh;
            let vertices: Vec<[f32; 3]> = mesh
                .positions
                .chunks_exact(3)
                .map(|p| [p[0], p[1], p[2]])
                .collect();
            // OBJ puts v = 0 at the bottom of the image.
            let uvs = (!mesh.texcoords.is_empty()).then(|| {
                mesh.texcoords
                    .chunks_exact(2)
                    .map(|t| [t[0], 1.0 - t[1]])
                    .collect()
            });
            let normals = (!mesh.normals.is_empty()).then(|| {
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| [n[0], n[1], n[2]])
                    .collect()
            });
            tracing::debug!(
                "OBJ model `{}`: {} vertices, {} triangles",
                model.name,
                vertices.len(),
                mesh.indices.len() / 3
            );
            assemble(vertices, uvs, normals, Some(mesh.indices))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD: &str = "\
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
";

    #[test]
    fn test_quad_face_is_fanned_into_two_triangles() {
        let shapes = load_obj_buf(&mut Cursor::new(QUAD)).unwrap();
        assert_eq!(shapes.len(), 1);
        let quad = &shapes[0];
        assert_eq!(quad.vertices.len(), 4);
        assert_eq!(quad.indices.as_deref(), Some(&[0, 1, 2, 0, 2, 3][..]));
        assert!(quad.validate().is_ok());
    }

    #[test]
    fn test_texcoords_are_flipped_and_normals_derived() {
        let shapes = load_obj_buf(&mut Cursor::new(QUAD)).unwrap();
        let quad = &shapes[0];
        assert_eq!(quad.uvs[0], [0.0, 1.0]);
        assert_eq!(quad.uvs[2], [1.0, 0.0]);
        assert_eq!(quad.normals[0], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_file_is_an_obj_error() {
        assert!(matches!(
            load_obj("does/not/exist.obj"),
            Err(crate::Error::Obj(_))
        ));
    }
}
