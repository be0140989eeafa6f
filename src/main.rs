//! Stagehand - windowed host for the application controller
//!
//! Creates the window and the wgpu backend, builds the [`App`] controller,
//! and routes winit events into it as window signals.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::Key,
    window::{Window, WindowId},
};

use stagehand::{
    App, AppConfig, Engine, Group, KeyInput, Lifecycle, Node, RenderError, SceneRef, Vec3,
    WindowSignal,
};
use stagehand_render::RenderContext;

/// Hooks that log the lifecycle milestones
struct LoggingLifecycle {
    frames: u64,
    elapsed_ms: f32,
}

impl LoggingLifecycle {
    fn new() -> Self {
        Self {
            frames: 0,
            elapsed_ms: 0.0,
        }
    }
}

impl Lifecycle for LoggingLifecycle {
    fn on_create(&mut self, scene: &SceneRef) {
        log::info!("Scene '{}' ready", scene.name());
    }

    fn on_render(&mut self, delta_ms: f32) {
        self.frames += 1;
        self.elapsed_ms += delta_ms;
        if self.elapsed_ms >= 1000.0 {
            log::debug!(
                "{} frames, last delta {:.2}ms",
                self.frames,
                delta_ms
            );
            self.elapsed_ms = 0.0;
        }
    }
}

/// Winit host driving the controller
struct Host {
    config: AppConfig,
    window: Option<Arc<Window>>,
    app: Option<App<RenderContext>>,
}

impl Host {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            app: None,
        }
    }
}

impl ApplicationHandler for Host {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.config.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("Failed to create window"),
        );

        let engine = pollster::block_on(RenderContext::new(
            window.clone(),
            self.config.engine.antialias,
            &self.config.engine.options,
        ));

        let mut app = App::with_hooks(
            engine,
            self.config.clone(),
            Box::new(LoggingLifecycle::new()),
        );

        // Seed the graph with a small demo set so find/replace have targets.
        let mut props = Group::new();
        props.initialize_group(app.scene().clone(), "props");
        props.add(Node::leaf("crate", Vec3::new(1.0, 0.0, 0.0)));
        props.add(Node::leaf("barrel", Vec3::new(-1.0, 0.0, 0.0)));
        app.add(Node::Group(props));

        window.request_redraw();
        self.window = Some(window);
        self.app = Some(app);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                app.handle_signal(WindowSignal::Resized {
                    width: size.width,
                    height: size.height,
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let Key::Character(text) = &event.logical_key {
                        if let Some(character) = text.chars().next() {
                            app.handle_signal(WindowSignal::KeyDown(KeyInput::from_char(
                                character,
                            )));
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if app.engine().render_loop_running() {
                    match app.tick() {
                        Ok(()) => {}
                        Err(RenderError::SurfaceLost) => {
                            let (width, height) = app.surface_size();
                            app.handle_signal(WindowSignal::Resized { width, height });
                        }
                        Err(RenderError::OutOfMemory) => {
                            log::error!("Render backend out of memory, exiting");
                            event_loop.exit();
                        }
                        Err(RenderError::Backend(message)) => {
                            log::warn!("Frame dropped: {}", message);
                        }
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Starting Stagehand");

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut host = Host::new(config);
    event_loop.run_app(&mut host).expect("Event loop error");
}
