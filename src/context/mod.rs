//! WgpuContext - Device and Queue wrapper
//!
//! Owns the adapter, device and queue every other module allocates from.

use crate::error::{Error, Result};
use std::sync::Arc;

/// Core wgpu context containing adapter, device and queue.
#[derive(Clone)]
pub struct WgpuContext {
    /// The adapter the device was requested from.
    pub adapter: Arc<wgpu::Adapter>,
    /// The wgpu device for creating GPU resources.
    pub device: Arc<wgpu::Device>,
    /// The wgpu queue for submitting commands.
    pub queue: Arc<wgpu::Queue>,
}

impl WgpuContext {
    /// Create a new context from an existing adapter, device and queue.
    pub fn new(adapter: wgpu::Adapter, device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            adapter: Arc::new(adapter),
            device: Arc::new(device),
            queue: Arc::new(queue),
        }
    }

    /// Create a new context asynchronously with its own instance.
    pub async fn new_async() -> Result<Self> {
        let instance = default_instance();
        Self::request(&instance, None).await
    }

    /// Request an adapter and device from `instance`.
    ///
    /// Pass the surface that will be presented to so the adapter can drive it.
    pub async fn request(
        instance: &wgpu::Instance,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| Error::Initialization(e.to_string()))?;

        let info = adapter.get_info();
        tracing::info!("Using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("easel device"),
                required_features: wgpu::Features::empty(),
                required_limits: adapter.limits(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .map_err(|e| Error::Initialization(e.to_string()))?;

        Ok(Self::new(adapter, device, queue))
    }

    /// Create a new context synchronously (blocks).
    pub fn new_blocking() -> Result<Self> {
        pollster::block_on(Self::new_async())
    }

    /// Minimum stride between dynamic uniform offsets, as reported by the device.
    pub fn uniform_alignment(&self) -> u64 {
        self.device.limits().min_uniform_buffer_offset_alignment as u64
    }

    /// Submit command buffers to the queue.
    pub fn submit<I: IntoIterator<Item = wgpu::CommandBuffer>>(&self, command_buffers: I) {
        self.queue.submit(command_buffers);
    }

    /// Create a command encoder.
    pub fn create_encoder(&self, label: Option<&str>) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label })
    }
}

/// Instance with every backend enabled.
pub fn default_instance() -> wgpu::Instance {
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}

impl std::fmt::Debug for WgpuContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuContext")
            .field("adapter", &self.adapter.get_info().name)
            .finish()
    }
}
