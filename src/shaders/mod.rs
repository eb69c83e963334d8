//! Built-in WGSL programs
//!
//! All of them read positions, uvs and normals at locations 0, 1 and 2 and
//! take the per-object uniform from `@group(0) @binding(0)`.

/// Diffuse-lit flat color.
pub const BASIC: &str = include_str!("basic.wgsl");

/// Solid color from a caller uniform `vec4<f32>` at `@group(1) @binding(0)`.
pub const TINTED: &str = include_str!("tinted.wgsl");

/// Texture sampled with the object's uvs (sampler at binding 1, texture at 2).
pub const TEXTURED: &str = include_str!("textured.wgsl");
