//! Window settings

use crate::registry::RendererSettings;

/// Settings for the window and the renderer behind it.
#[derive(Debug, Clone)]
pub struct WindowSettings {
    /// Window title.
    pub title: String,
    /// Initial inner size (width, height) in logical pixels.
    pub size: (u32, u32),
    /// Whether the window is resizable.
    pub resizable: bool,
    /// Renderer configuration; its size is replaced by the window's
    /// physical size.
    pub renderer: RendererSettings,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "easel".to_string(),
            size: (512, 512),
            resizable: true,
            renderer: RendererSettings::default(),
        }
    }
}

impl WindowSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Set whether the window is resizable.
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set the renderer configuration.
    pub fn renderer(mut self, renderer: RendererSettings) -> Self {
        self.renderer = renderer;
        self
    }
}
