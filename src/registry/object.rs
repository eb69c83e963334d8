//! Render objects
//!
//! A render object owns the vertex streams of one shape and the transform
//! that feeds its slot in the pipeline's uniform buffer.

use crate::camera::Camera;
use crate::context::WgpuContext;
use crate::core::buffer::{IndexBuffer, VertexBuffer};
use crate::error::Result;
use crate::math;
use crate::primitives::Shape;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Translation, axis-angle rotation and scale of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Vec3,
    /// Rotation axis; need not be normalized but must be non-zero.
    pub rotate_axis: Vec3,
    /// Rotation angle in degrees.
    pub rotate_deg: f32,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Vec3::ZERO,
            rotate_axis: Vec3::Y,
            rotate_deg: 0.0,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Model matrix `T * R * S`.
    pub fn matrix(&self) -> Result<Mat4> {
        let rotation = math::rotate(self.rotate_axis, self.rotate_deg.to_radians())?;
        Ok(math::multiply(
            math::multiply(math::translate(self.translate), rotation),
            math::scale(self.scale),
        ))
    }
}

/// Per-object uniform block, laid out as three `mat4x4<f32>`.
///
/// Matches `ObjectUniform` at `@group(0) @binding(0)` in the bundled shaders.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    /// Projection * view * model.
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model matrix.
    pub normal: [[f32; 4]; 4],
}

impl ObjectUniform {
    /// Size of the block in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Compute the block for `transform` seen through `camera` on a
    /// `width` x `height` canvas.
    pub fn compute(transform: &Transform, camera: &Camera, width: u32, height: u32) -> Result<Self> {
        let model = transform.matrix()?;
        let view_projection = camera.view_projection(width, height)?;
        let mvp = math::multiply(view_projection, model);

        // A zero scale collapses the model; fall back to identity normals.
        let normal = if model.determinant().abs() > f32::EPSILON {
            model.inverse().transpose()
        } else {
            Mat4::IDENTITY
        };

        Ok(Self {
            mvp: mvp.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal: normal.to_cols_array_2d(),
        })
    }

    pub fn mvp(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.mvp)
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

/// Everything needed to register an object with a pipeline.
#[derive(Debug, Clone)]
pub struct ObjectDesc {
    pub shape: Shape,
    pub instance_count: u32,
    pub transform: Transform,
    pub visible: bool,
}

impl ObjectDesc {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            instance_count: 1,
            transform: Transform::default(),
            visible: true,
        }
    }

    /// Build from raw streams. Missing UV or normal streams are zero-filled.
    pub fn from_streams(
        vertices: Vec<[f32; 3]>,
        uvs: Option<Vec<[f32; 2]>>,
        normals: Option<Vec<[f32; 3]>>,
        indices: Option<Vec<u32>>,
    ) -> Self {
        let count = vertices.len();
        let shape = Shape {
            vertices,
            uvs: uvs.unwrap_or_else(|| vec![[0.0; 2]; count]),
            normals: normals.unwrap_or_else(|| vec![[0.0; 3]; count]),
            indices,
        };
        Self::new(shape)
    }

    pub fn instances(mut self, count: u32) -> Self {
        self.instance_count = count;
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Register the object without drawing it until made visible.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl From<Shape> for ObjectDesc {
    fn from(shape: Shape) -> Self {
        Self::new(shape)
    }
}

/// Partial update applied by [`Renderer::update_object`](crate::Renderer::update_object).
///
/// Unset fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ObjectUpdate {
    pub translate: Option<Vec3>,
    pub rotate_axis: Option<Vec3>,
    pub rotate_deg: Option<f32>,
    pub scale: Option<Vec3>,
    pub visible: Option<bool>,
    pub instance_count: Option<u32>,
}

impl ObjectUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(mut self, translate: impl Into<Vec3>) -> Self {
        self.translate = Some(translate.into());
        self
    }

    /// Rotate by `degrees` around `axis`.
    pub fn rotate(mut self, axis: impl Into<Vec3>, degrees: f32) -> Self {
        self.rotate_axis = Some(axis.into());
        self.rotate_deg = Some(degrees);
        self
    }

    pub fn rotate_deg(mut self, degrees: f32) -> Self {
        self.rotate_deg = Some(degrees);
        self
    }

    pub fn scale(mut self, scale: impl Into<Vec3>) -> Self {
        self.scale = Some(scale.into());
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn instances(mut self, count: u32) -> Self {
        self.instance_count = Some(count);
        self
    }

    /// Apply the set fields on top of `transform`.
    pub fn apply_to(&self, transform: &Transform) -> Transform {
        Transform {
            translate: self.translate.unwrap_or(transform.translate),
            rotate_axis: self.rotate_axis.unwrap_or(transform.rotate_axis),
            rotate_deg: self.rotate_deg.unwrap_or(transform.rotate_deg),
            scale: self.scale.unwrap_or(transform.scale),
        }
    }
}

/// GPU side of a registered object.
pub(crate) struct RenderObject {
    positions: VertexBuffer,
    uvs: VertexBuffer,
    normals: VertexBuffer,
    indices: Option<IndexBuffer>,
    pub(crate) transform: Transform,
    pub(crate) visible: bool,
    pub(crate) instance_count: u32,
}

impl RenderObject {
    /// Upload an already validated shape.
    pub(crate) fn upload(ctx: &WgpuContext, desc: &ObjectDesc, label: &str) -> Self {
        let shape = &desc.shape;
        Self {
            positions: VertexBuffer::new(ctx, &shape.vertices, Some(&format!("{label} positions"))),
            uvs: VertexBuffer::new(ctx, &shape.uvs, Some(&format!("{label} uvs"))),
            normals: VertexBuffer::new(ctx, &shape.normals, Some(&format!("{label} normals"))),
            indices: shape
                .indices
                .as_deref()
                .map(|indices| IndexBuffer::new(ctx, indices, Some(&format!("{label} indices")))),
            transform: desc.transform,
            visible: desc.visible,
            instance_count: desc.instance_count,
        }
    }

    /// Vertices (or indices) issued per instance.
    pub(crate) fn draw_count(&self) -> u32 {
        self.indices
            .as_ref()
            .map_or(self.positions.count(), IndexBuffer::count)
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.positions.slice());
        pass.set_vertex_buffer(1, self.uvs.slice());
        pass.set_vertex_buffer(2, self.normals.slice());

        let instances = 0..self.instance_count;
        match &self.indices {
            Some(indices) => {
                pass.set_index_buffer(indices.slice(), IndexBuffer::FORMAT);
                pass.draw_indexed(0..indices.count(), 0, instances);
            }
            None => pass.draw(0..self.positions.count(), instances),
        }
    }

    pub(crate) fn destroy(&self) {
        self.positions.destroy();
        self.uvs.destroy();
        self.normals.destroy();
        if let Some(indices) = &self.indices {
            indices.destroy();
        }
    }
}
