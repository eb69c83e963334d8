//! Input events collected between frames

pub use winit::event::MouseButton;
pub use winit::keyboard::{Key, NamedKey};

/// Input event delivered with the next frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The canvas was resized; the renderer has already been updated.
    Resized { width: u32, height: u32 },
    KeyPressed(Key),
    KeyReleased(Key),
    /// Cursor position in physical pixels from the top-left corner.
    CursorMoved { x: f32, y: f32 },
    MousePressed(MouseButton),
    MouseReleased(MouseButton),
    /// Scroll amount, lines converted to pixels.
    Wheel { dx: f32, dy: f32 },
}

/// Pixels per scrolled line.
const LINE_HEIGHT: f32 = 20.0;

impl Event {
    /// Translate a winit window event, or `None` for events not forwarded.
    pub(crate) fn from_window_event(event: &winit::event::WindowEvent) -> Option<Self> {
        use winit::event::{ElementState, MouseScrollDelta, WindowEvent};

        match event {
            WindowEvent::KeyboardInput { event, .. } => Some(match event.state {
                ElementState::Pressed => Event::KeyPressed(event.logical_key.clone()),
                ElementState::Released => Event::KeyReleased(event.logical_key.clone()),
            }),
            WindowEvent::CursorMoved { position, .. } => Some(Event::CursorMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),
            WindowEvent::MouseInput { state, button, .. } => Some(match state {
                ElementState::Pressed => Event::MousePressed(*button),
                ElementState::Released => Event::MouseReleased(*button),
            }),
            WindowEvent::MouseWheel { delta, .. } => Some(match delta {
                MouseScrollDelta::LineDelta(x, y) => Event::Wheel {
                    dx: x * LINE_HEIGHT,
                    dy: y * LINE_HEIGHT,
                },
                MouseScrollDelta::PixelDelta(pos) => Event::Wheel {
                    dx: pos.x as f32,
                    dy: pos.y as f32,
                },
            }),
            _ => None,
        }
    }

    /// Whether this is a press of `key`.
    pub fn is_key_pressed(&self, key: &Key) -> bool {
        matches!(self, Event::KeyPressed(k) if k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_key_pressed_matches_only_presses() {
        let escape = Key::Named(NamedKey::Escape);
        assert!(Event::KeyPressed(escape.clone()).is_key_pressed(&escape));
        assert!(!Event::KeyReleased(escape.clone()).is_key_pressed(&escape));
        assert!(!Event::KeyPressed(Key::Character("q".into())).is_key_pressed(&escape));
    }
}
