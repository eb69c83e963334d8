//! Camera values
//!
//! A camera is passed to every transform update and never retained by the
//! renderer. Projections are resolved against the canvas size at call time.

use crate::error::Result;
use crate::math;
use glam::{Mat4, Vec3};

/// Projection mode for a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Pixel-space orthographic box centered on the view axis.
    Orthographic,
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in degrees.
        fov_y: f32,
    },
}

/// An orthographic or perspective camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position.
    pub translate: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Projection mode.
    pub projection: Projection,
}

impl Camera {
    /// Orthographic camera; one world unit maps to one canvas pixel.
    pub fn orthographic(translate: Vec3, look_at: Vec3, up: Vec3, near: f32, far: f32) -> Self {
        Self {
            translate,
            look_at,
            up,
            near,
            far,
            projection: Projection::Orthographic,
        }
    }

    /// Perspective camera with a vertical field of view in degrees.
    pub fn perspective(
        translate: Vec3,
        look_at: Vec3,
        up: Vec3,
        fov_y: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            translate,
            look_at,
            up,
            near,
            far,
            projection: Projection::Perspective { fov_y },
        }
    }

    /// View matrix.
    pub fn view_matrix(&self) -> Result<Mat4> {
        math::look_at(self.translate, self.look_at, self.up)
    }

    /// Projection matrix for a canvas of `width` x `height` pixels.
    pub fn projection_matrix(&self, width: u32, height: u32) -> Result<Mat4> {
        let (w, h) = (width as f32, height as f32);
        match self.projection {
            Projection::Orthographic => math::ortho(
                -w / 2.0,
                w / 2.0,
                h / 2.0,
                -h / 2.0,
                self.near,
                self.far,
            ),
            Projection::Perspective { fov_y } => {
                math::perspective(fov_y, w / h, self.near, self.far)
            }
        }
    }

    /// Combined `projection * view`.
    pub fn view_projection(&self, width: u32, height: u32) -> Result<Mat4> {
        Ok(math::multiply(
            self.projection_matrix(width, height)?,
            self.view_matrix()?,
        ))
    }
}

impl Default for Camera {
    /// Orthographic camera on +Z looking at the origin.
    fn default() -> Self {
        Self::orthographic(Vec3::new(0.0, 0.0, 500.0), Vec3::ZERO, Vec3::Y, 1.0, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_maps_canvas_edge_to_clip_edge() {
        let camera = Camera::default();
        let vp = camera.view_projection(512, 256).unwrap();
        let edge = vp.project_point3(Vec3::new(256.0, 128.0, 0.0));
        assert!((edge.x - 1.0).abs() < 1e-5);
        assert!((edge.y - 1.0).abs() < 1e-5);
        assert!(edge.z > 0.0 && edge.z < 1.0);
    }

    #[test]
    fn test_perspective_uses_canvas_aspect() {
        let camera = Camera::perspective(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y, 60.0, 0.1, 100.0);
        let square = camera.projection_matrix(512, 512).unwrap();
        let wide = camera.projection_matrix(1024, 512).unwrap();
        assert!((square.x_axis.x / wide.x_axis.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_camera_is_rejected() {
        let camera = Camera::orthographic(Vec3::ZERO, Vec3::ZERO, Vec3::Y, 1.0, 10.0);
        assert!(camera.view_matrix().is_err());
    }
}
