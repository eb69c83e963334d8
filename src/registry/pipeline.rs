//! Registered pipelines
//!
//! Each pipeline owns one dynamic uniform buffer sliced into `max_objects`
//! slots, the bind groups addressing it and the objects drawn with it.

use crate::context::WgpuContext;
use crate::core::buffer::{slot_stride, DynamicUniformBuffer, RawUniformBuffer};
use crate::core::pipeline::PipelineBuilder;
use crate::core::shader::validate_wgsl;
use crate::core::texture::Texture2D;
use crate::error::{Error, Result};
use crate::registry::object::{ObjectUniform, RenderObject};
use crate::registry::settings::PipelineOptions;
use crate::registry::slots::SlotArena;
use crate::registry::TextureHandle;
use std::num::NonZeroU64;

/// Attachment formats every pipeline of a renderer is built against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TargetFormat {
    pub color_format: wgpu::TextureFormat,
    pub sample_count: u32,
    pub depth: bool,
}

/// Caller-defined uniform block at `@group(1) @binding(0)`.
struct UserUniform {
    buffer: RawUniformBuffer,
    bind_group: wgpu::BindGroup,
}

pub(crate) struct Pipeline {
    pub(crate) label: String,
    pub(crate) topology: wgpu::PrimitiveTopology,
    render_pipeline: wgpu::RenderPipeline,
    object_layout: wgpu::BindGroupLayout,
    object_bind_group: wgpu::BindGroup,
    pub(crate) uniforms: DynamicUniformBuffer,
    pub(crate) texture: Option<TextureHandle>,
    user: Option<UserUniform>,
    pub(crate) objects: SlotArena<RenderObject>,
}

impl Pipeline {
    /// Check arguments and shader, then allocate.
    ///
    /// Nothing touches the device unless every check passes.
    pub(crate) fn new(
        ctx: &WgpuContext,
        shader: &str,
        max_objects: u32,
        options: &PipelineOptions,
        texture: Option<(TextureHandle, &Texture2D)>,
        target: TargetFormat,
    ) -> Result<Self> {
        let label = options.label.as_str();

        if max_objects == 0 {
            return Err(Error::invalid(format!(
                "pipeline `{label}` needs room for at least one object"
            )));
        }
        if let Some(size) = options.uniform_size {
            if size == 0 || size % 16 != 0 {
                return Err(Error::invalid(format!(
                    "uniform block of pipeline `{label}` must be a non-zero multiple of 16 bytes, got {size}"
                )));
            }
        }

        let alignment = ctx.uniform_alignment();
        let required = slot_stride(ObjectUniform::SIZE, alignment) * max_objects as u64;
        let limit = ctx.device.limits().max_buffer_size;
        if required > limit {
            return Err(Error::invalid(format!(
                "{max_objects} objects need {required} bytes of uniforms, device allows {limit}"
            )));
        }

        validate_wgsl(label, shader, &options.vertex_entry, &options.fragment_entry)?;

        let object_layout = create_object_layout(ctx, label, texture.is_some());
        let uniforms = DynamicUniformBuffer::new(
            ctx,
            ObjectUniform::SIZE,
            alignment,
            max_objects,
            Some(&format!("{label} object uniforms")),
        );
        let object_bind_group = create_object_bind_group(
            ctx,
            label,
            &object_layout,
            &uniforms,
            texture.map(|(_, t)| t),
        );

        let (user_layout, user) = match options.uniform_size {
            Some(size) => {
                let layout = create_user_layout(ctx, label, size);
                let buffer = RawUniformBuffer::new(ctx, size, Some(&format!("{label} user uniform")));
                let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("{label} user bind group")),
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.buffer().as_entire_binding(),
                    }],
                });
                (Some(layout), Some(UserUniform { buffer, bind_group }))
            }
            None => (None, None),
        };

        let mut builder = PipelineBuilder::new(ctx)
            .label(label)
            .shader(shader)
            .vertex_entry(&options.vertex_entry)
            .fragment_entry(&options.fragment_entry)
            .bind_group_layout(&object_layout)
            .color_format(target.color_format)
            .depth(target.depth.then_some(options.depth))
            .blend(options.blend)
            .cull(options.cull)
            .topology(options.topology)
            .sample_count(target.sample_count);
        if let Some(layout) = &user_layout {
            builder = builder.bind_group_layout(layout);
        }
        let render_pipeline = builder.build()?;

        tracing::info!(
            "Registered pipeline `{}` with {} object slots ({} byte stride)",
            label,
            max_objects,
            uniforms.stride()
        );

        Ok(Self {
            label: label.to_string(),
            topology: options.topology,
            render_pipeline,
            object_layout,
            object_bind_group,
            uniforms,
            texture: texture.map(|(handle, _)| handle),
            user,
            objects: SlotArena::bounded(max_objects),
        })
    }

    pub(crate) fn capacity(&self) -> u32 {
        self.uniforms.capacity()
    }

    /// Point the object bind group at a replacement texture.
    pub(crate) fn rebind_texture(&mut self, ctx: &WgpuContext, handle: TextureHandle, texture: &Texture2D) {
        self.object_bind_group = create_object_bind_group(
            ctx,
            &self.label,
            &self.object_layout,
            &self.uniforms,
            Some(texture),
        );
        self.texture = Some(handle);
    }

    /// Overwrite the caller uniform block.
    pub(crate) fn write_user_uniform(&self, ctx: &WgpuContext, bytes: &[u8]) -> Result<()> {
        let user = self.user.as_ref().ok_or_else(|| {
            Error::invalid(format!("pipeline `{}` has no uniform block", self.label))
        })?;
        if bytes.len() as u64 != user.buffer.size() {
            return Err(Error::invalid(format!(
                "uniform block of pipeline `{}` is {} bytes, got {}",
                self.label,
                user.buffer.size(),
                bytes.len()
            )));
        }
        user.buffer.write_bytes(ctx, bytes);
        Ok(())
    }

    /// Record draws for every visible object, in insertion order.
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.render_pipeline);
        if let Some(user) = &self.user {
            pass.set_bind_group(1, &user.bind_group, &[]);
        }

        for (key, object) in self.objects.iter() {
            if !object.visible || object.instance_count == 0 {
                continue;
            }
            let offset = self.uniforms.offset(key.index) as wgpu::DynamicOffset;
            pass.set_bind_group(0, &self.object_bind_group, &[offset]);
            object.draw(pass);
        }
    }

    /// Release every object's buffers.
    pub(crate) fn destroy_objects(&mut self) {
        for object in self.objects.drain() {
            object.destroy();
        }
    }

    /// Release the buffers shared by all objects.
    pub(crate) fn destroy_shared(&self) {
        self.uniforms.destroy();
        if let Some(user) = &self.user {
            user.buffer.destroy();
        }
    }
}

fn create_object_layout(ctx: &WgpuContext, label: &str, textured: bool) -> wgpu::BindGroupLayout {
    let mut entries = vec![wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: true,
            min_binding_size: NonZeroU64::new(ObjectUniform::SIZE),
        },
        count: None,
    }];

    if textured {
        entries.push(wgpu::BindGroupLayoutEntry {
            binding: 1,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        });
        entries.push(wgpu::BindGroupLayoutEntry {
            binding: 2,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        });
    }

    ctx.device
        .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} object layout")),
            entries: &entries,
        })
}

fn create_object_bind_group(
    ctx: &WgpuContext,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    uniforms: &DynamicUniformBuffer,
    texture: Option<&Texture2D>,
) -> wgpu::BindGroup {
    let mut entries = vec![wgpu::BindGroupEntry {
        binding: 0,
        resource: uniforms.binding(),
    }];
    if let Some(texture) = texture {
        entries.push(wgpu::BindGroupEntry {
            binding: 1,
            resource: wgpu::BindingResource::Sampler(texture.sampler()),
        });
        entries.push(wgpu::BindGroupEntry {
            binding: 2,
            resource: wgpu::BindingResource::TextureView(texture.view()),
        });
    }

    ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label} object bind group")),
        layout,
        entries: &entries,
    })
}

fn create_user_layout(ctx: &WgpuContext, label: &str, size: u64) -> wgpu::BindGroupLayout {
    ctx.device
        .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} user layout")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(size),
                },
                count: None,
            }],
        })
}
