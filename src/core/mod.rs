//! Core rendering abstractions
//!
//! Mid-level wrappers over wgpu buffers, textures and pipelines.

pub mod buffer;
pub mod pipeline;
pub mod readback;
pub mod render_states;
pub mod render_target;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use buffer::{DynamicUniformBuffer, IndexBuffer, RawUniformBuffer, VertexBuffer};
pub use pipeline::PipelineBuilder;
pub use readback::read_texture_rgba8;
pub use render_states::{BlendState, CullState, DepthState};
pub use render_target::RenderTarget;
pub use shader::validate_wgsl;
pub use texture::{DepthTexture, MultisampleTexture, Texture2D};
