//! Shape generators
//!
//! Rings are laid out at `(cos a, _, -sin a)` so that increasing angles wind
//! counter-clockwise when seen from +Y; every face is counter-clockwise from
//! outside.

use super::{check_segments, check_size, Shape};
use crate::error::{Error, Result};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Unit direction on the XZ ring at angle `a`.
fn ring(a: f32) -> [f32; 2] {
    [a.cos(), -a.sin()]
}

fn angle(i: u32, n: u32) -> f32 {
    TAU * i as f32 / n as f32
}

impl Shape {
    fn push(&mut self, position: [f32; 3], uv: [f32; 2], normal: [f32; 3]) {
        self.vertices.push(position);
        self.uvs.push(uv);
        self.normals.push(normal);
    }

    fn push_triangle(&mut self, corners: [([f32; 3], [f32; 2], [f32; 3]); 3]) {
        for (p, uv, n) in corners {
            self.push(p, uv, n);
        }
    }

    /// Two triangles `(0, 1, 2)` and `(0, 2, 3)`.
    fn push_quad(&mut self, corners: [([f32; 3], [f32; 2], [f32; 3]); 4]) {
        let [a, b, c, d] = corners;
        self.push_triangle([a, b, c]);
        self.push_triangle([a, c, d]);
    }
}

/// Axis-aligned rectangle in the XY plane facing +Z.
pub fn rect(width: f32, height: f32) -> Result<Shape> {
    check_size("width", width)?;
    check_size("height", height)?;

    let (hw, hh) = (width / 2.0, height / 2.0);
    let n = [0.0, 0.0, 1.0];
    let mut shape = Shape::default();
    shape.push_quad([
        ([-hw, -hh, 0.0], [0.0, 1.0], n),
        ([hw, -hh, 0.0], [1.0, 1.0], n),
        ([hw, hh, 0.0], [1.0, 0.0], n),
        ([-hw, hh, 0.0], [0.0, 0.0], n),
    ]);
    Ok(shape)
}

/// Regular polygon in the XY plane facing +Z.
///
/// Emitted as `sides` triangles `(rim_i, rim_i+1, center)`, starting at
/// `(radius, 0, 0)`.
pub fn reg_polygon(radius: f32, sides: u32) -> Result<Shape> {
    check_size("radius", radius)?;
    check_segments("sides", sides)?;

    let n = [0.0, 0.0, 1.0];
    let rim = |i: u32| {
        let a = angle(i, sides);
        let (s, c) = a.sin_cos();
        ([radius * c, radius * s, 0.0], [0.5 + 0.5 * c, 0.5 - 0.5 * s], n)
    };

    let mut shape = Shape::default();
    for i in 0..sides {
        shape.push_triangle([rim(i), rim(i + 1), ([0.0; 3], [0.5, 0.5], n)]);
    }
    Ok(shape)
}

/// Cube of edge `size` centered on the origin.
pub fn cube(size: f32) -> Result<Shape> {
    check_size("size", size)?;

    let h = size / 2.0;
    // (normal, u axis, v axis) with u x v == normal.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    let mut shape = Shape::default();
    for (n, u, v) in faces {
        let corner = |su: f32, sv: f32| {
            [
                h * (n[0] + su * u[0] + sv * v[0]),
                h * (n[1] + su * u[1] + sv * v[1]),
                h * (n[2] + su * u[2] + sv * v[2]),
            ]
        };
        shape.push_quad([
            (corner(-1.0, -1.0), [0.0, 1.0], n),
            (corner(1.0, -1.0), [1.0, 1.0], n),
            (corner(1.0, 1.0), [1.0, 0.0], n),
            (corner(-1.0, 1.0), [0.0, 0.0], n),
        ]);
    }
    Ok(shape)
}

/// Outward (or inward) facing wall between `y0` and `y1`.
fn push_wall(shape: &mut Shape, radius: f32, y0: f32, y1: f32, sides: u32, inward: bool) {
    for i in 0..sides {
        let [c0, s0] = ring(angle(i, sides));
        let [c1, s1] = ring(angle(i + 1, sides));
        let (u0, u1) = (i as f32 / sides as f32, (i + 1) as f32 / sides as f32);
        let sign = if inward { -1.0 } else { 1.0 };
        let n0 = [sign * c0, 0.0, sign * s0];
        let n1 = [sign * c1, 0.0, sign * s1];

        let b0 = ([radius * c0, y0, radius * s0], [u0, 1.0], n0);
        let b1 = ([radius * c1, y0, radius * s1], [u1, 1.0], n1);
        let t1 = ([radius * c1, y1, radius * s1], [u1, 0.0], n1);
        let t0 = ([radius * c0, y1, radius * s0], [u0, 0.0], n0);

        if inward {
            shape.push_quad([b1, b0, t0, t1]);
        } else {
            shape.push_quad([b0, b1, t1, t0]);
        }
    }
}

/// Flat disc at height `y` facing +Y (`up`) or -Y.
fn push_cap(shape: &mut Shape, radius: f32, y: f32, sides: u32, up: bool) {
    let n = if up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
    let center = ([0.0, y, 0.0], [0.5, 0.5], n);
    for i in 0..sides {
        let rim = |k: u32| {
            let [c, s] = ring(angle(k, sides));
            ([radius * c, y, radius * s], [0.5 + 0.5 * c, 0.5 + 0.5 * s], n)
        };
        if up {
            shape.push_triangle([center, rim(i), rim(i + 1)]);
        } else {
            shape.push_triangle([center, rim(i + 1), rim(i)]);
        }
    }
}

/// Closed cylinder along Y centered on the origin.
pub fn cylinder(radius: f32, height: f32, sides: u32) -> Result<Shape> {
    check_size("radius", radius)?;
    check_size("height", height)?;
    check_segments("sides", sides)?;

    let h = height / 2.0;
    let mut shape = Shape::default();
    push_wall(&mut shape, radius, -h, h, sides, false);
    push_cap(&mut shape, radius, h, sides, true);
    push_cap(&mut shape, radius, -h, sides, false);
    Ok(shape)
}

/// Hollow cylinder along Y with flat annular ends.
pub fn tube(outer_radius: f32, inner_radius: f32, height: f32, sides: u32) -> Result<Shape> {
    check_size("outer radius", outer_radius)?;
    check_size("inner radius", inner_radius)?;
    check_size("height", height)?;
    check_segments("sides", sides)?;
    if inner_radius >= outer_radius {
        return Err(Error::invalid(format!(
            "inner radius {inner_radius} must be smaller than outer radius {outer_radius}"
        )));
    }

    let h = height / 2.0;
    let mut shape = Shape::default();
    push_wall(&mut shape, outer_radius, -h, h, sides, false);
    push_wall(&mut shape, inner_radius, -h, h, sides, true);

    let t = inner_radius / outer_radius;
    for (y, up) in [(h, true), (-h, false)] {
        let n = if up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
        for i in 0..sides {
            let point = |k: u32, r: f32, uv_scale: f32| {
                let [c, s] = ring(angle(k, sides));
                (
                    [r * c, y, r * s],
                    [0.5 + 0.5 * uv_scale * c, 0.5 + 0.5 * uv_scale * s],
                    n,
                )
            };
            let in0 = point(i, inner_radius, t);
            let out0 = point(i, outer_radius, 1.0);
            let out1 = point(i + 1, outer_radius, 1.0);
            let in1 = point(i + 1, inner_radius, t);
            if up {
                shape.push_quad([in0, out0, out1, in1]);
            } else {
                shape.push_quad([in0, in1, out1, out0]);
            }
        }
    }
    Ok(shape)
}

/// Cone along Y with its base at `-height / 2` and apex at `+height / 2`.
pub fn cone(radius: f32, height: f32, sides: u32) -> Result<Shape> {
    check_size("radius", radius)?;
    check_size("height", height)?;
    check_segments("sides", sides)?;

    let h = height / 2.0;
    let slant = (height * height + radius * radius).sqrt();
    let (nr, ny) = (height / slant, radius / slant);
    let normal = |a: f32| {
        let [c, s] = ring(a);
        [nr * c, ny, nr * s]
    };

    let mut shape = Shape::default();
    for i in 0..sides {
        let (a0, a1) = (angle(i, sides), angle(i + 1, sides));
        let [c0, s0] = ring(a0);
        let [c1, s1] = ring(a1);
        let (u0, u1) = (i as f32 / sides as f32, (i + 1) as f32 / sides as f32);
        shape.push_triangle([
            ([radius * c0, -h, radius * s0], [u0, 1.0], normal(a0)),
            ([radius * c1, -h, radius * s1], [u1, 1.0], normal(a1)),
            ([0.0, h, 0.0], [(u0 + u1) / 2.0, 0.0], normal((a0 + a1) / 2.0)),
        ]);
    }
    push_cap(&mut shape, radius, -h, sides, false);
    Ok(shape)
}

/// Latitude/longitude grid from the pole (`phi = 0`) down to `phi_end`.
fn push_grid(shape: &mut Shape, radius: f32, slices: u32, stacks: u32, phi_end: f32) -> Vec<u32> {
    let base = shape.vertices.len() as u32;
    for stack in 0..=stacks {
        let phi = phi_end * stack as f32 / stacks as f32;
        let (ring_r, y) = phi.sin_cos();
        for slice in 0..=slices {
            let [c, s] = ring(angle(slice, slices));
            let n = [ring_r * c, y, ring_r * s];
            shape.push(
                [radius * n[0], radius * n[1], radius * n[2]],
                [slice as f32 / slices as f32, stack as f32 / stacks as f32],
                n,
            );
        }
    }

    let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);
    for stack in 0..stacks {
        for slice in 0..slices {
            let current = base + stack * (slices + 1) + slice;
            let next = current + slices + 1;
            indices.extend_from_slice(&[current, next, current + 1]);
            indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }
    indices
}

/// UV sphere centered on the origin.
pub fn sphere(radius: f32, slices: u32, stacks: u32) -> Result<Shape> {
    check_size("radius", radius)?;
    check_segments("slices", slices)?;
    check_segments("stacks", stacks)?;

    let mut shape = Shape::default();
    let indices = push_grid(&mut shape, radius, slices, stacks, PI);
    Ok(shape.with_indices(indices))
}

/// Upper half sphere closed by a disc at `y = 0`.
pub fn hemisphere(radius: f32, slices: u32, stacks: u32) -> Result<Shape> {
    check_size("radius", radius)?;
    check_segments("slices", slices)?;
    check_segments("stacks", stacks)?;

    let mut shape = Shape::default();
    let mut indices = push_grid(&mut shape, radius, slices, stacks, FRAC_PI_2);

    let n = [0.0, -1.0, 0.0];
    let center = shape.vertices.len() as u32;
    shape.push([0.0; 3], [0.5, 0.5], n);
    for slice in 0..=slices {
        let [c, s] = ring(angle(slice, slices));
        shape.push([radius * c, 0.0, radius * s], [0.5 + 0.5 * c, 0.5 + 0.5 * s], n);
    }
    for slice in 0..slices {
        let rim = center + 1 + slice;
        indices.extend_from_slice(&[center, rim + 1, rim]);
    }
    Ok(shape.with_indices(indices))
}

/// Torus around the Y axis.
///
/// `slices` subdivide the main ring, `sides` the tube cross-section.
pub fn torus(major_radius: f32, minor_radius: f32, slices: u32, sides: u32) -> Result<Shape> {
    check_size("major radius", major_radius)?;
    check_size("minor radius", minor_radius)?;
    check_segments("slices", slices)?;
    check_segments("sides", sides)?;
    if minor_radius >= major_radius {
        return Err(Error::invalid(format!(
            "minor radius {minor_radius} must be smaller than major radius {major_radius}"
        )));
    }

    let mut shape = Shape::default();
    for i in 0..=slices {
        let [c, s] = ring(angle(i, slices));
        for j in 0..=sides {
            let (sv, cv) = angle(j, sides).sin_cos();
            let n = [cv * c, sv, cv * s];
            shape.push(
                [
                    major_radius * c + minor_radius * n[0],
                    minor_radius * n[1],
                    major_radius * s + minor_radius * n[2],
                ],
                [i as f32 / slices as f32, j as f32 / sides as f32],
                n,
            );
        }
    }

    let mut indices = Vec::with_capacity((slices * sides * 6) as usize);
    for i in 0..slices {
        for j in 0..sides {
            let a = i * (sides + 1) + j;
            let b = a + sides + 1;
            indices.extend_from_slice(&[a, b, a + 1]);
            indices.extend_from_slice(&[a + 1, b, b + 1]);
        }
    }
    Ok(shape.with_indices(indices))
}
