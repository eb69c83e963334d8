//! Renderer and pipeline configuration

use crate::core::render_states::{BlendState, CullState, DepthState};
use crate::registry::TextureHandle;

/// Settings for creating a [`Renderer`](crate::Renderer).
#[derive(Debug, Clone)]
pub struct RendererSettings {
    /// Canvas size (width, height) in pixels.
    pub size: (u32, u32),
    /// MSAA sample count, 1 or 4.
    pub sample_count: u32,
    /// RGBA clear color.
    pub clear_color: [f32; 4],
    /// Color format; `None` picks the surface's sRGB format, or
    /// `Rgba8UnormSrgb` off-screen. Must be one of the `Rgba8` / `Bgra8`
    /// unorm formats, since textures are written and read as RGBA8.
    pub color_format: Option<wgpu::TextureFormat>,
    /// Whether a depth buffer is attached.
    pub depth: bool,
    /// Whether to wait for vertical sync when presenting.
    pub vsync: bool,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            size: (512, 512),
            sample_count: 4,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            color_format: None,
            depth: true,
            vsync: true,
        }
    }
}

impl RendererSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Set the MSAA sample count.
    pub fn sample_count(mut self, count: u32) -> Self {
        self.sample_count = count;
        self
    }

    /// Set the clear color.
    pub fn clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    /// Force a color format (`Rgba8` or `Bgra8`, linear or sRGB).
    pub fn color_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.color_format = Some(format);
        self
    }

    /// Enable or disable the depth buffer.
    pub fn depth(mut self, depth: bool) -> Self {
        self.depth = depth;
        self
    }

    /// Set whether to enable vsync.
    pub fn vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }
}

/// Options for [`Renderer::add_pipeline`](crate::Renderer::add_pipeline).
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub label: String,
    pub vertex_entry: String,
    pub fragment_entry: String,
    pub topology: wgpu::PrimitiveTopology,
    pub cull: CullState,
    pub blend: BlendState,
    pub depth: DepthState,
    /// Texture sampled at `@group(0) @binding(1..=2)`.
    pub texture: Option<TextureHandle>,
    /// Size in bytes of the caller uniform block at `@group(1) @binding(0)`.
    pub uniform_size: Option<u64>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            label: "pipeline".to_string(),
            vertex_entry: "vs_main".to_string(),
            fragment_entry: "fs_main".to_string(),
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull: CullState::None,
            blend: BlendState::Opaque,
            depth: DepthState::ReadWrite,
            texture: None,
            uniform_size: None,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn vertex_entry(mut self, entry: impl Into<String>) -> Self {
        self.vertex_entry = entry.into();
        self
    }

    pub fn fragment_entry(mut self, entry: impl Into<String>) -> Self {
        self.fragment_entry = entry.into();
        self
    }

    pub fn topology(mut self, topology: wgpu::PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    pub fn cull(mut self, cull: CullState) -> Self {
        self.cull = cull;
        self
    }

    pub fn blend(mut self, blend: BlendState) -> Self {
        self.blend = blend;
        self
    }

    pub fn depth(mut self, depth: DepthState) -> Self {
        self.depth = depth;
        self
    }

    /// Sample `texture` in the fragment stage.
    pub fn texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Reserve a caller uniform block of `size` bytes.
    pub fn uniform_size(mut self, size: u64) -> Self {
        self.uniform_size = Some(size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_settings_defaults() {
        let settings = RendererSettings::default();
        assert_eq!(settings.size, (512, 512));
        assert_eq!(settings.sample_count, 4);
        assert_eq!(settings.clear_color, [0.0, 0.0, 0.0, 1.0]);
        assert!(settings.color_format.is_none());
        assert!(settings.depth);
    }

    #[test]
    fn test_pipeline_options_builder() {
        let options = PipelineOptions::new()
            .label("overlay")
            .blend(BlendState::Alpha)
            .uniform_size(16);
        assert_eq!(options.label, "overlay");
        assert_eq!(options.vertex_entry, "vs_main");
        assert_eq!(options.blend, BlendState::Alpha);
        assert_eq!(options.uniform_size, Some(16));
        assert!(options.texture.is_none());
    }
}
