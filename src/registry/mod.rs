//! Resource registry
//!
//! [`Renderer`] owns every GPU resource created on behalf of the caller:
//! pipelines with their packed per-object uniform buffers, the objects drawn
//! through them, textures and the frame attachments. Callers only ever hold
//! `Copy` handles.
//!
//! ```no_run
//! use easel::{primitives, shaders, Camera, ObjectUpdate, PipelineOptions, Renderer, RendererSettings, WgpuContext};
//!
//! # fn main() -> easel::Result<()> {
//! let ctx = WgpuContext::new_blocking()?;
//! let mut renderer = Renderer::new(ctx, RendererSettings::default())?;
//! let pipeline = renderer.add_pipeline(shaders::BASIC, 8, PipelineOptions::default())?;
//! let cube = renderer.add_object(pipeline, primitives::cube(100.0)?)?;
//! renderer.update_object(cube, ObjectUpdate::new().rotate([1.0, 1.0, 0.0], 30.0), Some(&Camera::default()))?;
//! renderer.render(&[pipeline], None)?;
//! let pixels = renderer.read_pixels(None)?;
//! # Ok(())
//! # }
//! ```

mod object;
mod pipeline;
mod settings;
mod slots;

pub use object::{ObjectDesc, ObjectUniform, ObjectUpdate, Transform};
pub use settings::{PipelineOptions, RendererSettings};

use crate::camera::Camera;
use crate::context::WgpuContext;
use crate::core::readback::read_texture_rgba8;
use crate::core::render_target::RenderTarget;
use crate::core::texture::{is_rgba8_format, DepthTexture, MultisampleTexture, Texture2D};
use crate::error::{Error, Result};
use crate::loaders;
use crate::math;
use object::RenderObject;
use pipeline::{Pipeline, TargetFormat};
use slots::{SlotArena, SlotKey};
use std::path::Path;

/// Format of off-screen canvases unless overridden.
pub const DEFAULT_COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Handle to a registered pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineHandle(u32);

impl PipelineHandle {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Handle to an object registered with a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    pipeline: PipelineHandle,
    key: SlotKey,
}

impl ObjectHandle {
    pub fn pipeline(self) -> PipelineHandle {
        self.pipeline
    }

    /// Uniform slot of the object within its pipeline.
    pub fn slot(self) -> u32 {
        self.key.index
    }
}

/// Handle to a registered texture.
///
/// Resizing a texture issues a new handle; the previous one stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(SlotKey);

/// Lifecycle of a [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    /// Created, no pipeline registered yet.
    Initialized,
    /// At least one pipeline registered.
    Ready,
    /// Frame attachments are being recreated.
    Resizing,
    /// Every resource has been released.
    Destroyed,
}

struct SurfaceTarget {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl SurfaceTarget {
    fn acquire(&self, ctx: &WgpuContext) -> Result<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&ctx.device, &self.config);
                Ok(self.surface.get_current_texture()?)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn resize(&mut self, ctx: &WgpuContext, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&ctx.device, &self.config);
    }
}

/// Attachments recreated whenever the canvas changes size.
struct FrameTargets {
    /// Color target used when there is no surface.
    offscreen: Option<Texture2D>,
    msaa: Option<MultisampleTexture>,
    depth: Option<DepthTexture>,
}

impl FrameTargets {
    fn new(ctx: &WgpuContext, width: u32, height: u32, format: TargetFormat, offscreen: bool) -> Self {
        Self {
            offscreen: offscreen.then(|| {
                Texture2D::new(ctx, width, height, format.color_format, Some("offscreen canvas"))
            }),
            msaa: (format.sample_count > 1).then(|| {
                MultisampleTexture::new(ctx, width, height, format.color_format, format.sample_count)
            }),
            depth: format
                .depth
                .then(|| DepthTexture::new(ctx, width, height, format.sample_count)),
        }
    }

    fn destroy(&self) {
        if let Some(texture) = &self.offscreen {
            texture.destroy();
        }
        if let Some(texture) = &self.msaa {
            texture.destroy();
        }
        if let Some(texture) = &self.depth {
            texture.destroy();
        }
    }
}

/// Registry of pipelines, objects and textures drawing into one canvas.
///
/// The canvas is either a window surface or an internal off-screen texture.
pub struct Renderer {
    ctx: WgpuContext,
    surface: Option<SurfaceTarget>,
    format: TargetFormat,
    clear_color: [f32; 4],
    size: (u32, u32),
    frame: FrameTargets,
    pipelines: Vec<Pipeline>,
    textures: SlotArena<Texture2D>,
    state: RendererState,
}

impl Renderer {
    /// Create a renderer drawing into an off-screen canvas.
    pub fn new(ctx: WgpuContext, settings: RendererSettings) -> Result<Self> {
        let color_format = settings.color_format.unwrap_or(DEFAULT_COLOR_FORMAT);
        Self::build(ctx, None, color_format, settings)
    }

    /// Create a renderer presenting to `surface`.
    ///
    /// The surface must be compatible with the context's adapter. The color
    /// format falls back to the surface's preferred sRGB format when the
    /// requested one is unsupported.
    pub fn with_surface(
        ctx: WgpuContext,
        surface: wgpu::Surface<'static>,
        settings: RendererSettings,
    ) -> Result<Self> {
        let (width, height) = settings.size;
        let caps = surface.get_capabilities(&ctx.adapter);
        let format = settings
            .color_format
            .filter(|format| caps.formats.contains(format))
            .or_else(|| {
                caps.formats
                    .iter()
                    .copied()
                    .find(|&f| f.is_srgb() && is_rgba8_format(f))
            })
            .or_else(|| caps.formats.iter().copied().find(|&f| is_rgba8_format(f)))
            .ok_or_else(|| {
                Error::Initialization("surface offers no 8-bit RGBA format".to_string())
            })?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: if settings.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        Self::build(ctx, Some(SurfaceTarget { surface, config }), format, settings)
    }

    fn build(
        ctx: WgpuContext,
        surface: Option<SurfaceTarget>,
        color_format: wgpu::TextureFormat,
        settings: RendererSettings,
    ) -> Result<Self> {
        let (width, height) = settings.size;
        check_color_format(color_format)?;
        check_canvas_size(&ctx, width, height)?;
        check_sample_count(&ctx, color_format, settings.sample_count)?;

        if let Some(surface) = &surface {
            surface.surface.configure(&ctx.device, &surface.config);
        }

        let format = TargetFormat {
            color_format,
            sample_count: settings.sample_count,
            depth: settings.depth,
        };
        let frame = FrameTargets::new(&ctx, width, height, format, surface.is_none());

        tracing::info!(
            "Created {} renderer {}x{} ({:?}, {}x MSAA)",
            if surface.is_some() { "surface" } else { "offscreen" },
            width,
            height,
            color_format,
            settings.sample_count
        );

        Ok(Self {
            ctx,
            surface,
            format,
            clear_color: settings.clear_color,
            size: (width, height),
            frame,
            pipelines: Vec::new(),
            textures: SlotArena::unbounded(),
            state: RendererState::Initialized,
        })
    }

    /// Register a pipeline with room for `max_objects` objects.
    ///
    /// The shader is validated before anything is allocated; a failure
    /// comes back as [`Error::Compile`] and leaves the registry unchanged.
    pub fn add_pipeline(
        &mut self,
        shader: &str,
        max_objects: u32,
        options: PipelineOptions,
    ) -> Result<PipelineHandle> {
        self.ensure_live()?;

        let texture = match options.texture {
            Some(handle) => Some((handle, self.texture(handle)?)),
            None => None,
        };

        let pipeline = Pipeline::new(&self.ctx, shader, max_objects, &options, texture, self.format)?;
        let handle = PipelineHandle(self.pipelines.len() as u32);
        self.pipelines.push(pipeline);

        if self.state == RendererState::Initialized {
            self.state = RendererState::Ready;
        }
        Ok(handle)
    }

    /// Upload a shape and give it the next free slot of `pipeline`.
    ///
    /// Geometry and capacity are checked before any buffer is created.
    pub fn add_object(
        &mut self,
        pipeline: PipelineHandle,
        desc: impl Into<ObjectDesc>,
    ) -> Result<ObjectHandle> {
        self.ensure_live()?;
        let desc = desc.into();
        let (width, height) = self.size;

        let entry = self
            .pipelines
            .get_mut(pipeline.0 as usize)
            .ok_or_else(|| unknown_pipeline(pipeline))?;

        match entry.topology {
            wgpu::PrimitiveTopology::TriangleList => desc.shape.validate_triangle_list()?,
            _ => desc.shape.validate()?,
        }
        let capacity = entry.capacity();
        let capacity_exceeded = || Error::CapacityExceeded {
            pipeline: pipeline.0,
            capacity,
        };
        if entry.objects.is_full() {
            return Err(capacity_exceeded());
        }
        let uniform = ObjectUniform::compute(&desc.transform, &Camera::default(), width, height)?;

        let object = RenderObject::upload(&self.ctx, &desc, &entry.label);
        let draw_count = object.draw_count();
        let key = entry.objects.insert(object).map_err(|object| {
            object.destroy();
            capacity_exceeded()
        })?;
        entry.uniforms.write(&self.ctx, key.index, &uniform);

        tracing::debug!(
            "Added object to `{}` in slot {} ({} {})",
            entry.label,
            key.index,
            draw_count,
            if desc.shape.is_indexed() { "indices" } else { "vertices" }
        );

        Ok(ObjectHandle { pipeline, key })
    }

    /// Merge `update` into the object's transform and rewrite its uniform slot.
    ///
    /// Invisible objects keep their stored transform current but skip the
    /// matrix computation and the upload. `camera` defaults to
    /// [`Camera::default`].
    pub fn update_object(
        &mut self,
        handle: ObjectHandle,
        update: ObjectUpdate,
        camera: Option<&Camera>,
    ) -> Result<()> {
        self.ensure_live()?;
        let (width, height) = self.size;

        let entry = self
            .pipelines
            .get_mut(handle.pipeline.0 as usize)
            .ok_or_else(|| unknown_pipeline(handle.pipeline))?;
        let object = entry
            .objects
            .get_mut(handle.key)
            .ok_or_else(|| unknown_object(handle))?;

        if let Some(axis) = update.rotate_axis {
            math::normalize(axis)?;
        }
        let transform = update.apply_to(&object.transform);
        let visible = update.visible.unwrap_or(object.visible);

        let uniform = if visible {
            let camera = camera.copied().unwrap_or_default();
            Some(ObjectUniform::compute(&transform, &camera, width, height)?)
        } else {
            None
        };

        object.transform = transform;
        object.visible = visible;
        if let Some(count) = update.instance_count {
            object.instance_count = count;
        }

        if let Some(uniform) = uniform {
            entry.uniforms.write(&self.ctx, handle.key.index, &uniform);
        }
        Ok(())
    }

    /// Destroy an object's buffers and free its slot for reuse.
    pub fn remove_object(&mut self, handle: ObjectHandle) -> Result<()> {
        self.ensure_live()?;
        let entry = self
            .pipelines
            .get_mut(handle.pipeline.0 as usize)
            .ok_or_else(|| unknown_pipeline(handle.pipeline))?;
        let object = entry
            .objects
            .remove(handle.key)
            .ok_or_else(|| unknown_object(handle))?;
        object.destroy();
        tracing::debug!("Removed object from `{}` slot {}", entry.label, handle.key.index);
        Ok(())
    }

    /// Draw `pipelines` in order into one frame.
    ///
    /// Objects are drawn in insertion order with no sorting. `target` selects
    /// a texture of canvas size; without it the frame goes to the surface,
    /// or to the internal off-screen canvas.
    pub fn render(&mut self, pipelines: &[PipelineHandle], target: Option<TextureHandle>) -> Result<()> {
        self.ensure_live()?;
        for &handle in pipelines {
            self.pipeline(handle)?;
        }

        let target_texture = match target {
            Some(handle) => {
                let texture = self.texture(handle)?;
                if texture.size() != self.size {
                    return Err(Error::invalid(format!(
                        "render target is {:?}, canvas is {:?}",
                        texture.size(),
                        self.size
                    )));
                }
                if texture.format() != self.format.color_format {
                    return Err(Error::invalid(format!(
                        "render target is {:?}, pipelines target {:?}",
                        texture.format(),
                        self.format.color_format
                    )));
                }
                if pipelines
                    .iter()
                    .any(|p| self.pipelines[p.0 as usize].texture == Some(handle))
                {
                    return Err(Error::invalid(
                        "render target is sampled by a pipeline drawn into it",
                    ));
                }
                Some(texture)
            }
            None => None,
        };

        let surface_frame = match (target_texture, &self.surface) {
            (None, Some(surface)) => Some(surface.acquire(&self.ctx)?),
            _ => None,
        };
        let surface_view = surface_frame
            .as_ref()
            .map(|frame| frame.texture.create_view(&wgpu::TextureViewDescriptor::default()));

        let view = match (target_texture, &surface_view, &self.frame.offscreen) {
            (Some(texture), _, _) => texture.view(),
            (None, Some(view), _) => view,
            (None, None, Some(offscreen)) => offscreen.view(),
            (None, None, None) => {
                return Err(Error::Initialization("renderer has no color target".to_string()))
            }
        };
        let depth_view = self.frame.depth.as_ref().map(DepthTexture::view);
        let render_target = match &self.frame.msaa {
            Some(msaa) => RenderTarget::multisampled(msaa.view(), view, depth_view),
            None => RenderTarget::direct(view, depth_view),
        };

        let mut encoder = self.ctx.create_encoder(Some("frame encoder"));
        {
            let mut pass = render_target.begin_render_pass(&mut encoder, self.clear_color.map(f64::from));
            for handle in pipelines {
                self.pipelines[handle.0 as usize].draw(&mut pass);
            }
        }
        self.ctx.submit([encoder.finish()]);

        if let Some(frame) = surface_frame {
            frame.present();
        }
        Ok(())
    }

    /// Recreate the frame attachments for a new canvas size.
    ///
    /// Object buffers are untouched; projections computed by later updates
    /// use the new size.
    pub fn resize_canvas(&mut self, width: u32, height: u32) -> Result<()> {
        self.ensure_live()?;
        check_canvas_size(&self.ctx, width, height)?;

        let previous = self.state;
        self.state = RendererState::Resizing;

        self.frame.destroy();
        self.frame = FrameTargets::new(&self.ctx, width, height, self.format, self.surface.is_none());
        if let Some(surface) = &mut self.surface {
            surface.resize(&self.ctx, width, height);
        }
        self.size = (width, height);

        self.state = previous;
        tracing::info!("Resized canvas to {}x{}", width, height);
        Ok(())
    }

    /// Release every GPU resource and the device.
    ///
    /// Objects go first, then the buffers pipelines share, then textures.
    /// Any later call, including a second `destroy`, returns [`Error::Disposed`].
    pub fn destroy(&mut self) -> Result<()> {
        self.ensure_live()?;

        for pipeline in &mut self.pipelines {
            pipeline.destroy_objects();
        }
        for pipeline in self.pipelines.drain(..) {
            pipeline.destroy_shared();
        }
        for texture in self.textures.drain() {
            texture.destroy();
        }
        self.frame.destroy();
        self.surface = None;
        self.ctx.device.destroy();

        self.state = RendererState::Destroyed;
        tracing::info!("Renderer destroyed");
        Ok(())
    }

    /// Create an empty texture in the canvas color format.
    pub fn add_texture(&mut self, width: u32, height: u32) -> Result<TextureHandle> {
        self.ensure_live()?;
        check_texture_size(&self.ctx, width, height)?;
        let texture = Texture2D::new(&self.ctx, width, height, self.format.color_format, Some("texture"));
        self.insert_texture(texture)
    }

    /// Create a texture from tightly packed RGBA8 pixels.
    pub fn add_texture_rgba(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<TextureHandle> {
        self.ensure_live()?;
        check_texture_size(&self.ctx, width, height)?;
        check_pixels(width, height, pixels)?;
        let texture = Texture2D::new(&self.ctx, width, height, self.format.color_format, Some("texture"));
        texture.write_rgba8(&self.ctx, pixels);
        self.insert_texture(texture)
    }

    /// Create a texture from a decoded image.
    pub fn add_texture_image(&mut self, image: &image::DynamicImage) -> Result<TextureHandle> {
        let rgba = image.to_rgba8();
        self.add_texture_rgba(rgba.width(), rgba.height(), rgba.as_raw())
    }

    /// Decode an image file into a new texture.
    pub fn load_texture(&mut self, path: impl AsRef<Path>) -> Result<TextureHandle> {
        self.ensure_live()?;
        let rgba = loaders::load_image(path)?;
        self.add_texture_rgba(rgba.width(), rgba.height(), rgba.as_raw())
    }

    /// Decode an encoded image (PNG, JPEG, ...) into a new texture.
    pub fn load_texture_bytes(&mut self, bytes: &[u8]) -> Result<TextureHandle> {
        self.ensure_live()?;
        let rgba = loaders::decode_image(bytes)?;
        self.add_texture_rgba(rgba.width(), rgba.height(), rgba.as_raw())
    }

    /// Overwrite a texture with RGBA8 pixels covering its full size.
    pub fn write_texture(&mut self, handle: TextureHandle, pixels: &[u8]) -> Result<()> {
        self.ensure_live()?;
        let texture = self.texture(handle)?;
        let (width, height) = texture.size();
        check_pixels(width, height, pixels)?;
        texture.write_rgba8(&self.ctx, pixels);
        Ok(())
    }

    /// Replace a texture with an empty one of a new size.
    ///
    /// Pipelines sampling it are rebound to the replacement. The returned
    /// handle supersedes `handle`, which no longer resolves.
    pub fn resize_texture(&mut self, handle: TextureHandle, width: u32, height: u32) -> Result<TextureHandle> {
        self.ensure_live()?;
        self.texture(handle)?;
        check_texture_size(&self.ctx, width, height)?;

        let fresh = Texture2D::new(&self.ctx, width, height, self.format.color_format, Some("texture"));
        let (key, old) = self
            .textures
            .replace(handle.0, fresh)
            .ok_or_else(|| unknown_texture(handle))?;
        old.destroy();

        let resized = TextureHandle(key);
        let texture = self.textures.get(key).ok_or_else(|| unknown_texture(resized))?;
        for pipeline in &mut self.pipelines {
            if pipeline.texture == Some(handle) {
                pipeline.rebind_texture(&self.ctx, resized, texture);
                tracing::warn!(
                    "Texture resized to {}x{}, rebuilt bind group of `{}`",
                    width,
                    height,
                    pipeline.label
                );
            }
        }
        Ok(resized)
    }

    /// Write the caller uniform block of `pipeline`.
    ///
    /// `bytes` must match the size given in [`PipelineOptions::uniform_size`].
    pub fn write_pipeline_uniform(&mut self, pipeline: PipelineHandle, bytes: &[u8]) -> Result<()> {
        self.ensure_live()?;
        self.pipeline(pipeline)?.write_user_uniform(&self.ctx, bytes)
    }

    pub fn set_clear_color(&mut self, color: [f32; 4]) -> Result<()> {
        self.ensure_live()?;
        self.clear_color = color;
        Ok(())
    }

    /// Read back a rendered texture as RGBA8, or the off-screen canvas when
    /// `target` is `None`. Blocks until the GPU is done.
    pub fn read_pixels(&self, target: Option<TextureHandle>) -> Result<Vec<u8>> {
        self.ensure_live()?;
        let texture = match target {
            Some(handle) => self.texture(handle)?,
            None => self.frame.offscreen.as_ref().ok_or_else(|| {
                Error::invalid("surface frames cannot be read back, render into a texture instead")
            })?,
        };
        read_texture_rgba8(&self.ctx, texture)
    }

    /// The uniform block last written for `handle`.
    pub fn object_uniform(&self, handle: ObjectHandle) -> Result<ObjectUniform> {
        self.ensure_live()?;
        let entry = self.pipeline(handle.pipeline)?;
        entry
            .objects
            .get(handle.key)
            .ok_or_else(|| unknown_object(handle))?;
        Ok(entry.uniforms.read(handle.key.index))
    }

    /// Number of live objects in `pipeline`.
    pub fn object_count(&self, pipeline: PipelineHandle) -> Result<usize> {
        self.ensure_live()?;
        Ok(self.pipeline(pipeline)?.objects.len())
    }

    /// Byte distance between consecutive uniform slots of `pipeline`.
    pub fn uniform_stride(&self, pipeline: PipelineHandle) -> Result<u64> {
        self.ensure_live()?;
        Ok(self.pipeline(pipeline)?.uniforms.stride())
    }

    /// Canvas size in pixels. Still answers after `destroy`.
    pub fn canvas_size(&self) -> (u32, u32) {
        self.size
    }

    /// Current lifecycle state; the one way to observe
    /// [`RendererState::Destroyed`].
    pub fn state(&self) -> RendererState {
        self.state
    }

    /// Color format of the canvas. Still answers after `destroy`.
    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.format.color_format
    }

    /// The device and queue, unless the renderer has been destroyed.
    pub fn context(&self) -> Result<&WgpuContext> {
        self.ensure_live()?;
        Ok(&self.ctx)
    }

    fn ensure_live(&self) -> Result<()> {
        if self.state == RendererState::Destroyed {
            Err(Error::Disposed)
        } else {
            Ok(())
        }
    }

    fn pipeline(&self, handle: PipelineHandle) -> Result<&Pipeline> {
        self.pipelines
            .get(handle.0 as usize)
            .ok_or_else(|| unknown_pipeline(handle))
    }

    fn texture(&self, handle: TextureHandle) -> Result<&Texture2D> {
        self.textures
            .get(handle.0)
            .ok_or_else(|| unknown_texture(handle))
    }

    fn insert_texture(&mut self, texture: Texture2D) -> Result<TextureHandle> {
        let (width, height) = texture.size();
        let key = self.textures.insert(texture).map_err(|texture| {
            texture.destroy();
            Error::invalid("texture table is full")
        })?;
        tracing::debug!("Added texture {} ({}x{})", key.index, width, height);
        Ok(TextureHandle(key))
    }
}

fn unknown_pipeline(handle: PipelineHandle) -> Error {
    Error::not_found(format!("pipeline {}", handle.0))
}

fn unknown_object(handle: ObjectHandle) -> Error {
    Error::not_found(format!(
        "object in slot {} of pipeline {}",
        handle.key.index, handle.pipeline.0
    ))
}

fn unknown_texture(handle: TextureHandle) -> Error {
    Error::not_found(format!(
        "texture {} (generation {})",
        handle.0.index, handle.0.generation
    ))
}

fn check_canvas_size(ctx: &WgpuContext, width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid(format!("canvas must not be empty, got {width}x{height}")));
    }
    check_texture_size(ctx, width, height)
}

fn check_texture_size(ctx: &WgpuContext, width: u32, height: u32) -> Result<()> {
    let max = ctx.device.limits().max_texture_dimension_2d;
    if width == 0 || height == 0 || width > max || height > max {
        return Err(Error::invalid(format!(
            "texture size {width}x{height} outside 1..={max}"
        )));
    }
    Ok(())
}

fn check_color_format(format: wgpu::TextureFormat) -> Result<()> {
    if !is_rgba8_format(format) {
        return Err(Error::invalid(format!(
            "color format {format:?} is not an 8-bit RGBA or BGRA format"
        )));
    }
    Ok(())
}

fn check_sample_count(ctx: &WgpuContext, format: wgpu::TextureFormat, count: u32) -> Result<()> {
    if !matches!(count, 1 | 4) {
        return Err(Error::invalid(format!("sample count must be 1 or 4, got {count}")));
    }
    let flags = ctx.adapter.get_texture_format_features(format).flags;
    if !flags.sample_count_supported(count) {
        return Err(Error::invalid(format!(
            "{format:?} does not support {count}x multisampling on this adapter"
        )));
    }
    Ok(())
}

fn check_pixels(width: u32, height: u32, pixels: &[u8]) -> Result<()> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(Error::invalid(format!(
            "{width}x{height} RGBA8 needs {expected} bytes, got {}",
            pixels.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_pixels_requires_exact_length() {
        assert!(check_pixels(2, 2, &[0; 16]).is_ok());
        assert!(matches!(
            check_pixels(2, 2, &[0; 15]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_check_color_format_accepts_only_8bit_rgba() {
        assert!(check_color_format(wgpu::TextureFormat::Rgba8UnormSrgb).is_ok());
        assert!(check_color_format(wgpu::TextureFormat::Bgra8Unorm).is_ok());
        assert!(matches!(
            check_color_format(wgpu::TextureFormat::Rgba16Float),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_handles_expose_slot() {
        let handle = ObjectHandle {
            pipeline: PipelineHandle(3),
            key: SlotKey {
                index: 7,
                generation: 0,
            },
        };
        assert_eq!(handle.pipeline().index(), 3);
        assert_eq!(handle.slot(), 7);
    }
}
