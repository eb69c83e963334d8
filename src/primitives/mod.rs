//! Procedural geometry
//!
//! Generators return a [`Shape`]: parallel position, uv and normal streams
//! plus an optional index list. Indexed shapes carry deduplicated vertices;
//! non-indexed shapes are already a flat triangle list.

mod shapes;

pub use shapes::{cone, cube, cylinder, hemisphere, rect, reg_polygon, sphere, torus, tube};

use crate::error::{Error, Result};

/// Smallest subdivision count any generator accepts.
pub const MIN_SEGMENTS: u32 = 3;

/// CPU-side geometry ready to be uploaded as an object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub vertices: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Option<Vec<u32>>,
}

impl Shape {
    /// Shape with positions only; uvs and normals are zero-filled.
    pub fn from_vertices(vertices: Vec<[f32; 3]>) -> Self {
        let n = vertices.len();
        Self {
            vertices,
            uvs: vec![[0.0; 2]; n],
            normals: vec![[0.0; 3]; n],
            indices: None,
        }
    }

    /// Attach an index list.
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Whether this shape is drawn through an index list.
    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of elements a draw call covers.
    pub fn draw_count(&self) -> usize {
        self.indices
            .as_ref()
            .map_or(self.vertices.len(), |indices| indices.len())
    }

    /// Check that the streams agree and describe at least one triangle.
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(Error::invalid(format!(
                "degenerate geometry: {n} vertices, need at least 3"
            )));
        }
        if self.uvs.len() != n {
            return Err(Error::invalid(format!(
                "{} uvs for {n} vertices",
                self.uvs.len()
            )));
        }
        if self.normals.len() != n {
            return Err(Error::invalid(format!(
                "{} normals for {n} vertices",
                self.normals.len()
            )));
        }
        if let Some(indices) = &self.indices {
            if indices.is_empty() {
                return Err(Error::invalid("empty index list"));
            }
            if let Some(bad) = indices.iter().find(|&&i| i as usize >= n) {
                return Err(Error::invalid(format!(
                    "index {bad} out of range for {n} vertices"
                )));
            }
        }
        Ok(())
    }

    /// [`validate`](Self::validate), then check that the vertices (or
    /// indices) form whole triangles.
    pub fn validate_triangle_list(&self) -> Result<()> {
        self.validate()?;
        let (what, count) = match &self.indices {
            Some(indices) => ("indices", indices.len()),
            None => ("vertices", self.vertices.len()),
        };
        if count % 3 != 0 {
            return Err(Error::invalid(format!(
                "{count} {what} do not form whole triangles"
            )));
        }
        Ok(())
    }

    /// Expand an indexed shape into a flat triangle list.
    ///
    /// The shape is validated first, so malformed streams come back as
    /// [`Error::InvalidArgument`].
    pub fn unindexed(&self) -> Result<Shape> {
        self.validate()?;
        let Some(indices) = &self.indices else {
            return Ok(self.clone());
        };
        let mut out = Shape::default();
        for &i in indices {
            let i = i as usize;
            out.vertices.push(self.vertices[i]);
            out.uvs.push(self.uvs[i]);
            out.normals.push(self.normals[i]);
        }
        Ok(out)
    }
}

pub(crate) fn check_segments(name: &str, value: u32) -> Result<()> {
    if value < MIN_SEGMENTS {
        return Err(Error::invalid(format!(
            "{name} must be at least {MIN_SEGMENTS}, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn check_size(name: &str, value: f32) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(Error::invalid(format!(
            "{name} must be positive, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_degenerate() {
        let shape = Shape::from_vertices(vec![[0.0; 3], [1.0, 0.0, 0.0]]);
        assert!(matches!(shape.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_validate_rejects_mismatched_streams() {
        let mut shape = Shape::from_vertices(vec![[0.0; 3]; 3]);
        shape.uvs.pop();
        assert!(shape.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let shape = Shape::from_vertices(vec![[0.0; 3]; 3]).with_indices(vec![0, 1, 3]);
        assert!(shape.validate().is_err());
    }

    #[test]
    fn test_triangle_list_needs_whole_triangles() {
        let loose = Shape::from_vertices(vec![[0.0; 3]; 4]);
        assert!(loose.validate().is_ok());
        assert!(matches!(
            loose.validate_triangle_list(),
            Err(Error::InvalidArgument(_))
        ));

        let short = Shape::from_vertices(vec![[0.0; 3]; 3]).with_indices(vec![0, 1]);
        assert!(short.validate_triangle_list().is_err());

        let whole = Shape::from_vertices(vec![[0.0; 3]; 4]).with_indices(vec![0, 1, 2, 0, 2, 3]);
        assert!(whole.validate_triangle_list().is_ok());
    }

    #[test]
    fn test_unindexed_rejects_out_of_range_index() {
        let shape = Shape::from_vertices(vec![[0.0; 3]; 3]).with_indices(vec![0, 1, 7]);
        assert!(matches!(shape.unindexed(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_unindexed_expands_triangles() {
        let shape = Shape::from_vertices(vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ])
        .with_indices(vec![0, 1, 2, 0, 2, 3]);

        let flat = shape.unindexed().unwrap();
        assert!(!flat.is_indexed());
        assert_eq!(flat.vertex_count(), 6);
        assert_eq!(flat.vertices[5], [0.0, 1.0, 0.0]);
        assert_eq!(shape.draw_count(), flat.draw_count());
    }
}
