//! Error types
//!
//! Every fallible operation in the crate returns [`Result`].

use thiserror::Error;

/// Errors reported by the registry, the geometry generators and the loaders.
#[derive(Debug, Error)]
pub enum Error {
    /// No adapter, device or surface could be acquired.
    #[error("GPU initialization failed: {0}")]
    Initialization(String),

    /// WGSL source failed to parse or validate.
    #[error("shader `{label}` failed to compile: {message}")]
    Compile { label: String, message: String },

    /// An argument was rejected before any GPU work was issued.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A handle does not refer to a live resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// A pipeline has no free object slots left.
    #[error("pipeline {pipeline} is full ({capacity} objects)")]
    CapacityExceeded { pipeline: u32, capacity: u32 },

    /// The renderer has been destroyed.
    #[error("renderer has been destroyed")]
    Disposed,

    /// The surface could not provide a frame.
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    /// A staging buffer could not be mapped for readback.
    #[error("buffer mapping failed: {0}")]
    Map(#[from] wgpu::BufferAsyncError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Obj(#[from] tobj::LoadError),

    #[error(transparent)]
    Gltf(#[from] gltf::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}
