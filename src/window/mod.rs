//! Window host
//!
//! Opens a winit window, builds a surface-backed [`Renderer`] for it and
//! drives a frame callback on every redraw. Window resizes are forwarded to
//! [`Renderer::resize_canvas`] before the callback sees them.
//!
//! ```no_run
//! use easel::window::{self, FrameAction, WindowSettings};
//! use easel::{primitives, shaders, ObjectUpdate, PipelineOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     window::run(
//!         WindowSettings::new().title("cube"),
//!         |renderer| {
//!             let pipeline = renderer.add_pipeline(shaders::BASIC, 1, PipelineOptions::default())?;
//!             let cube = renderer.add_object(pipeline, primitives::cube(150.0)?)?;
//!             Ok((pipeline, cube))
//!         },
//!         |(pipeline, cube), input| {
//!             let angle = input.elapsed_time as f32 * 45.0;
//!             input.renderer.update_object(*cube, ObjectUpdate::new().rotate([1.0, 1.0, 0.0], angle), None)?;
//!             input.renderer.render(&[*pipeline], None)?;
//!             Ok(FrameAction::Continue)
//!         },
//!     )
//! }
//! ```

pub mod event;
pub mod frame;
pub mod settings;

pub use event::{Event, Key, MouseButton, NamedKey};
pub use frame::{FrameAction, FrameInput};
pub use settings::WindowSettings;

use crate::context::{default_instance, WgpuContext};
use crate::error::Error;
use crate::registry::Renderer;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Run a window until it is closed or the callback asks to exit.
///
/// `setup` runs once the renderer exists and builds the state handed to
/// every `frame` call. The first error from either callback ends the loop
/// and is returned.
pub fn run<S, Setup, F>(settings: WindowSettings, setup: Setup, frame: F) -> anyhow::Result<()>
where
    Setup: FnOnce(&mut Renderer) -> anyhow::Result<S> + 'static,
    F: FnMut(&mut S, FrameInput<'_>) -> anyhow::Result<FrameAction> + 'static,
    S: 'static,
{
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        settings,
        setup: Some(setup),
        frame,
        running: None,
        events: Vec::new(),
        error: None,
        start_time: Instant::now(),
        last_frame_time: Instant::now(),
    };
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

struct Running<S> {
    window: Arc<Window>,
    renderer: Renderer,
    state: S,
}

struct App<S, Setup, F> {
    settings: WindowSettings,
    setup: Option<Setup>,
    frame: F,
    running: Option<Running<S>>,
    events: Vec<Event>,
    error: Option<anyhow::Error>,
    start_time: Instant,
    last_frame_time: Instant,
}

impl<S, Setup, F> App<S, Setup, F>
where
    Setup: FnOnce(&mut Renderer) -> anyhow::Result<S>,
{
    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running<S>> {
        let attributes = Window::default_attributes()
            .with_title(&self.settings.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.size.0,
                self.settings.size.1,
            ))
            .with_resizable(self.settings.resizable);
        let window = Arc::new(event_loop.create_window(attributes)?);

        let instance = default_instance();
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| Error::Initialization(e.to_string()))?;
        let ctx = pollster::block_on(WgpuContext::request(&instance, Some(&surface)))?;

        let size = window.inner_size();
        let renderer_settings = self
            .settings
            .renderer
            .clone()
            .size(size.width.max(1), size.height.max(1));
        let mut renderer = Renderer::with_surface(ctx, surface, renderer_settings)?;

        let setup = self
            .setup
            .take()
            .ok_or_else(|| anyhow::anyhow!("window host started twice"))?;
        let state = setup(&mut renderer)?;

        Ok(Running {
            window,
            renderer,
            state,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }
}

impl<S, Setup, F> ApplicationHandler for App<S, Setup, F>
where
    Setup: FnOnce(&mut Renderer) -> anyhow::Result<S>,
    F: FnMut(&mut S, FrameInput<'_>) -> anyhow::Result<FrameAction>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(running) => {
                self.running = Some(running);
                self.start_time = Instant::now();
                self.last_frame_time = self.start_time;
            }
            Err(error) => self.fail(event_loop, error),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(running) = &mut self.running else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                // Minimized windows report zero; keep the last canvas.
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Err(error) = running.renderer.resize_canvas(size.width, size.height) {
                    self.fail(event_loop, error.into());
                    return;
                }
                self.events.push(Event::Resized {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let input = FrameInput {
                    renderer: &mut running.renderer,
                    events: std::mem::take(&mut self.events),
                    elapsed_time: (now - self.start_time).as_secs_f64(),
                    delta_time: (now - self.last_frame_time).as_secs_f64(),
                };
                self.last_frame_time = now;

                match (self.frame)(&mut running.state, input) {
                    Ok(FrameAction::Continue) => {}
                    Ok(FrameAction::Exit) => event_loop.exit(),
                    Err(error) => self.fail(event_loop, error),
                }
            }
            other => {
                if let Some(event) = Event::from_window_event(&other) {
                    self.events.push(event);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            running.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut running) = self.running.take() {
            if let Err(error) = running.renderer.destroy() {
                tracing::warn!("Renderer teardown failed: {error}");
            }
        }
    }
}
