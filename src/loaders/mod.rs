//! Model and image loaders
//!
//! OBJ and glTF files become [`Shape`]s ready for
//! [`Renderer::add_object`](crate::Renderer::add_object); images decode to
//! RGBA8 for the texture calls.

mod gltf_model;
mod image_file;
mod obj;

pub use gltf_model::{load_gltf, load_gltf_slice};
pub use image_file::{decode_image, load_image};
pub use obj::{load_obj, load_obj_buf};

use crate::primitives::Shape;
use glam::Vec3;

/// Area-weighted vertex normals for an indexed triangle list.
pub(crate) fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from(positions[a]);
        // Unnormalized cross product, so larger faces weigh more.
        let face = (Vec3::from(positions[b]) - pa).cross(Vec3::from(positions[c]) - pa);
        for i in [a, b, c] {
            normals[i] += face;
        }
    }
    normals
        .into_iter()
        .map(|n| n.normalize_or_zero().to_array())
        .collect()
}

/// Build a shape from loader output, deriving normals when the file has none.
pub(crate) fn assemble(
    vertices: Vec<[f32; 3]>,
    uvs: Option<Vec<[f32; 2]>>,
    normals: Option<Vec<[f32; 3]>>,
    indices: Option<Vec<u32>>,
) -> Shape {
    let count = vertices.len();
    let normals = match (normals, &indices) {
        (Some(normals), _) if normals.len() == count => normals,
        (_, Some(indices)) => smooth_normals(&vertices, indices),
        (_, None) => {
            let sequential: Vec<u32> = (0..count as u32).collect();
            smooth_normals(&vertices, &sequential)
        }
    };
    Shape {
        uvs: uvs
            .filter(|uvs| uvs.len() == count)
            .unwrap_or_else(|| vec![[0.0; 2]; count]),
        normals,
        vertices,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_normals_of_flat_quad_face_up() {
        let positions = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        let normals = smooth_normals(&positions, &[0, 1, 2, 0, 2, 3]);
        for n in normals {
            assert_eq!(n, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_assemble_fills_missing_streams() {
        let shape = assemble(vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], None, None, None);
        assert_eq!(shape.uvs.len(), 3);
        assert_eq!(shape.normals[0], [0.0, 0.0, 1.0]);
        assert!(shape.validate().is_ok());
    }
}
