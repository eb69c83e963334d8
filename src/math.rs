//! Matrix and vector helpers
//!
//! Closed-form 4x4 builders over `glam`. Matrices are column-major and
//! `multiply(a, b)` applies `b` first. Projections target the WebGPU clip
//! space (right-handed view, depth in `0..=1`).

use crate::error::{Error, Result};
use glam::{Mat4, Vec3};

/// The identity matrix.
pub fn identity() -> Mat4 {
    Mat4::IDENTITY
}

/// Translation by `v`.
pub fn translate(v: Vec3) -> Mat4 {
    Mat4::from_translation(v)
}

/// Rotation of `radians` about `axis`. The axis is normalized here.
pub fn rotate(axis: Vec3, radians: f32) -> Result<Mat4> {
    let axis = normalize(axis)?;
    Ok(Mat4::from_axis_angle(axis, radians))
}

/// Non-uniform scale by `v`.
pub fn scale(v: Vec3) -> Mat4 {
    Mat4::from_scale(v)
}

/// Composition `a ∘ b`.
pub fn multiply(a: Mat4, b: Mat4) -> Mat4 {
    a * b
}

/// Perspective projection with a vertical field of view in degrees.
pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Result<Mat4> {
    if !(fov_y_degrees > 0.0 && fov_y_degrees < 180.0) {
        return Err(Error::invalid(format!(
            "field of view must be in (0, 180) degrees, got {fov_y_degrees}"
        )));
    }
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(Error::invalid(format!("aspect must be positive, got {aspect}")));
    }
    if !(near > 0.0 && far > 0.0) {
        return Err(Error::invalid(format!(
            "perspective planes must be positive, got near={near} far={far}"
        )));
    }
    check_depth_range(near, far)?;
    Ok(Mat4::perspective_rh(
        fov_y_degrees.to_radians(),
        aspect,
        near,
        far,
    ))
}

/// Orthographic projection of the box `left..right`, `bottom..top`, `near..far`.
pub fn ortho(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Result<Mat4> {
    if ![left, right, top, bottom].iter().all(|v| v.is_finite()) {
        return Err(Error::invalid(format!(
            "orthographic bounds must be finite: left={left} right={right} top={top} bottom={bottom}"
        )));
    }
    if left == right || top == bottom {
        return Err(Error::invalid(format!(
            "orthographic box is flat: left={left} right={right} top={top} bottom={bottom}"
        )));
    }
    check_depth_range(near, far)?;
    Ok(Mat4::orthographic_rh(left, right, bottom, top, near, far))
}

/// View matrix for an eye at `eye` looking at `target`.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Result<Mat4> {
    let dir = normalize(target - eye)
        .map_err(|_| Error::invalid("eye and look-at target coincide"))?;
    let up = normalize(up)?;
    if dir.cross(up).length_squared() <= f32::EPSILON {
        return Err(Error::invalid("up vector is parallel to the view direction"));
    }
    Ok(Mat4::look_at_rh(eye, target, up))
}

pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.dot(b)
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(b)
}

/// Unit vector along `v`. Zero-length and non-finite vectors are rejected.
pub fn normalize(v: Vec3) -> Result<Vec3> {
    v.try_normalize()
        .ok_or_else(|| Error::invalid(format!("cannot normalize {v}")))
}

/// Element-wise comparison within `eps`.
pub fn approx_eq(a: Mat4, b: Mat4, eps: f32) -> bool {
    a.abs_diff_eq(b, eps)
}

fn check_depth_range(near: f32, far: f32) -> Result<()> {
    if !(near.is_finite() && far.is_finite()) || near == far {
        return Err(Error::invalid(format!(
            "degenerate depth range near={near} far={far}"
        )));
    }
    Ok(())
}
