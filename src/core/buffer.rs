//! GPU buffer abstractions
//!
//! Typed wrappers for vertex streams, index lists and uniform storage.

use crate::context::WgpuContext;
use bytemuck::Pod;
use std::num::NonZeroU64;
use wgpu::util::DeviceExt;

/// A GPU buffer holding one vertex stream.
pub struct VertexBuffer {
    pub(crate) buffer: wgpu::Buffer,
    pub(crate) count: u32,
}

impl VertexBuffer {
    /// Upload a slice of vertex attributes.
    pub fn new<V: Pod>(ctx: &WgpuContext, data: &[V], label: Option<&str>) -> Self {
        let buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label,
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::VERTEX,
            });
        Self {
            buffer,
            count: data.len() as u32,
        }
    }

    /// Get the number of elements.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Create a buffer slice for the entire buffer.
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    /// Release the GPU allocation now rather than on drop.
    pub fn destroy(&self) {
        self.buffer.destroy();
    }
}

/// A GPU buffer containing `u32` indices.
pub struct IndexBuffer {
    pub(crate) buffer: wgpu::Buffer,
    pub(crate) count: u32,
}

impl IndexBuffer {
    /// Format of every index buffer this crate creates.
    pub const FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

    /// Create a new index buffer from u32 indices.
    pub fn new(ctx: &WgpuContext, indices: &[u32], label: Option<&str>) -> Self {
        let buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label,
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            buffer,
            count: indices.len() as u32,
        }
    }

    /// Get the number of indices.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Create a buffer slice for the entire buffer.
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    pub fn destroy(&self) {
        self.buffer.destroy();
    }
}

/// A uniform buffer split into fixed-stride slots addressed by dynamic offset.
///
/// A CPU mirror of every slot is kept so the last written value can be
/// inspected without a GPU readback.
pub struct DynamicUniformBuffer {
    pub(crate) buffer: wgpu::Buffer,
    mirror: Vec<u8>,
    element_size: u64,
    stride: u64,
    capacity: u32,
}

impl DynamicUniformBuffer {
    /// Allocate `capacity` slots for elements of `element_size` bytes, each
    /// slot rounded up to `alignment`.
    pub fn new(
        ctx: &WgpuContext,
        element_size: u64,
        alignment: u64,
        capacity: u32,
        label: Option<&str>,
    ) -> Self {
        let stride = slot_stride(element_size, alignment);
        let size = stride * capacity as u64;
        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label,
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            mirror: vec![0; size as usize],
            element_size,
            stride,
            capacity,
        }
    }

    /// Write `data` into `slot` and queue the upload.
    pub fn write<T: Pod>(&mut self, ctx: &WgpuContext, slot: u32, data: &T) {
        debug_assert!(slot < self.capacity);
        debug_assert_eq!(std::mem::size_of::<T>() as u64, self.element_size);
        let offset = self.offset(slot);
        let bytes = bytemuck::bytes_of(data);
        self.mirror[offset as usize..offset as usize + bytes.len()].copy_from_slice(bytes);
        ctx.queue.write_buffer(&self.buffer, offset, bytes);
    }

    /// Last value written to `slot`.
    pub fn read<T: Pod>(&self, slot: u32) -> T {
        let offset = self.offset(slot) as usize;
        bytemuck::pod_read_unaligned(&self.mirror[offset..offset + std::mem::size_of::<T>()])
    }

    /// Byte offset of `slot`, as passed to `set_bind_group`.
    pub fn offset(&self, slot: u32) -> u64 {
        self.stride * slot as u64
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Total allocation in bytes.
    pub fn size(&self) -> u64 {
        self.stride * self.capacity as u64
    }

    /// Binding covering a single slot; the dynamic offset selects which.
    pub fn binding(&self) -> wgpu::BindingResource<'_> {
        wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: &self.buffer,
            offset: 0,
            size: NonZeroU64::new(self.element_size),
        })
    }

    pub fn destroy(&self) {
        self.buffer.destroy();
    }
}

/// Raw uniform buffer without type information (caller-defined blocks).
pub struct RawUniformBuffer {
    pub(crate) buffer: wgpu::Buffer,
    pub(crate) size: u64,
}

impl RawUniformBuffer {
    /// Create a new raw uniform buffer with specified size.
    pub fn new(ctx: &WgpuContext, size: u64, label: Option<&str>) -> Self {
        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label,
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self { buffer, size }
    }

    /// Write raw bytes at the start of the buffer.
    pub fn write_bytes(&self, ctx: &WgpuContext, bytes: &[u8]) {
        ctx.queue.write_buffer(&self.buffer, 0, bytes);
    }

    /// Get the raw wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Get the buffer size.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn destroy(&self) {
        self.buffer.destroy();
    }
}

/// Per-slot stride: `element_size` rounded up to `alignment`.
pub fn slot_stride(element_size: u64, alignment: u64) -> u64 {
    wgpu::util::align_to(element_size, alignment.max(1))
}
