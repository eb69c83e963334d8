//! easel
//!
//! A thin convenience layer over wgpu for drawing primitives without writing
//! GPU setup by hand.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **context** - Adapter, device and queue acquisition
//! 2. **math** - Matrix builders and vector helpers over glam
//! 3. **primitives** - Procedural meshes (rect, polygon, cube, cylinder, tube, cone, sphere, hemisphere, torus)
//! 4. **loaders** - OBJ and glTF models, image decoding
//! 5. **core** - GPU building blocks (buffers, textures, pipelines, render states)
//! 6. **registry** - [`Renderer`]: pipelines with packed per-object uniforms, objects, textures, frames
//! 7. **camera** - Orthographic and perspective cameras
//! 8. **window** - Window host driving a surface-backed renderer (feature = "window")

pub mod camera;
pub mod context;
pub mod core;
pub mod error;
pub mod loaders;
pub mod math;
pub mod primitives;
pub mod registry;
pub mod shaders;

#[cfg(feature = "window")]
pub mod window;

pub use glam;

// Re-export commonly used types
pub use camera::{Camera, Projection};
pub use context::WgpuContext;
pub use error::{Error, Result};
pub use primitives::Shape;

pub use core::{BlendState, CullState, DepthState};

pub use registry::{
    ObjectDesc, ObjectHandle, ObjectUniform, ObjectUpdate, PipelineHandle, PipelineOptions,
    Renderer, RendererSettings, RendererState, TextureHandle, Transform,
};

#[cfg(feature = "window")]
pub use window::{Event, FrameAction, FrameInput, WindowSettings};
