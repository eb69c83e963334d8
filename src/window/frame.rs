//! Frame callback types

use crate::registry::Renderer;
use crate::window::event::Event;

/// What the frame callback gets each redraw.
pub struct FrameInput<'a> {
    /// The surface-backed renderer; call [`Renderer::render`] to present.
    pub renderer: &'a mut Renderer,
    /// Events received since the previous frame.
    pub events: Vec<Event>,
    /// Seconds since the loop started.
    pub elapsed_time: f64,
    /// Seconds since the previous frame.
    pub delta_time: f64,
}

impl FrameInput<'_> {
    pub fn width(&self) -> u32 {
        self.renderer.canvas_size().0
    }

    pub fn height(&self) -> u32 {
        self.renderer.canvas_size().1
    }
}

/// Whether the loop keeps running after a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameAction {
    #[default]
    Continue,
    Exit,
}
