use crate::error::Result;
use crate::loaders::assemble;
use crate::primitives::Shape;
use gltf::mesh::util::ReadTexCoords;
use gltf::mesh::Mode;
use std::path::Path;

/// Load every triangle primitive of a glTF or GLB file.
///
/// Node transforms, materials, skins and animations are ignored.
pub fn load_gltf(path: impl AsRef<Path>) -> Result<Vec<Shape>> {
    let path = path.as_ref();
    let (document, buffers, _images) = gltf::import(path)?;
    let shapes = read_shapes(&document, &buffers);
    tracing::info!("Loaded {} shapes from {}", shapes.len(), path.display());
    Ok(shapes)
}

/// Load a self-contained glTF (GLB or embedded buffers) from memory.
pub fn load_gltf_slice(bytes: &[u8]) -> Result<Vec<Shape>> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;
    Ok(read_shapes(&document, &buffers))
}

fn read_shapes(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Vec<Shape> {
    let get_buf = |b: gltf::Buffer| -> Option<&[u8]> { buffers.get(b.index()).map(|d| &d.0[..]) };

    let mut shapes = Vec::new();
    for mesh in document.meshes() {
        for prim in mesh.primitives() {
            if prim.mode() != Mode::Triangles {
                tracing::warn!(
                    "Skipping {:?} primitive of mesh `{}`",
                    prim.mode(),
                    mesh.name().unwrap_or("unnamed")
                );
                continue;
            }

            let reader = prim.reader(get_buf);
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let vertices: Vec<[f32; 3]> = positions.collect();
            let normals = reader.read_normals().map(|it| it.collect());
            let uvs = reader.read_tex_coords(0).map(|tc| match tc {
                ReadTexCoords::F32(i) => i.collect(),
                ReadTexCoords::U16(i) => i
                    .map(|v| [v[0] as f32 / 65535.0, v[1] as f32 / 65535.0])
                    .collect(),
                ReadTexCoords::U8(i) => i
                    .map(|v| [v[0] as f32 / 255.0, v[1] as f32 / 255.0])
                    .collect(),
            });
            let indices = reader.read_indices().map(|ind| ind.into_u32().collect());

            shapes.push(assemble(vertices, uvs, normals, indices));
        }
    }
    shapes
}
