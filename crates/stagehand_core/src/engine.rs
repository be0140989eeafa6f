//! Engine seam
//!
//! The controller consumes a rendering backend through the [`Engine`] trait.
//! Windowed rendering lives in the `stagehand_render` crate; the
//! [`HeadlessEngine`] here records every interaction so controller behavior
//! can be exercised without a display.

use crate::{Camera, Light, Scene, SceneRef, SceneSettings};

/// Interface the controller consumes from a rendering backend
pub trait Engine {
    /// Create a scene bound to this engine
    fn create_scene(&mut self, settings: SceneSettings) -> SceneRef;

    /// Toggle offline/caching support (the controller always turns this off)
    fn set_offline_support(&mut self, enabled: bool);

    /// Start scheduling render-loop ticks
    fn run_render_loop(&mut self);

    /// Stop scheduling render-loop ticks
    fn stop_render_loop(&mut self);

    /// Whether the render loop is currently scheduled
    fn render_loop_running(&self) -> bool;

    /// Render one frame of the given scene
    fn render(
        &mut self,
        scene: &SceneRef,
        cameras: &[Camera],
        lights: &[Light],
    ) -> Result<(), RenderError>;

    /// Elapsed time since the previous frame, in milliseconds
    fn delta_time_ms(&mut self) -> f32;

    /// Recompute render-target dimensions for a new surface size
    fn resize(&mut self, width: u32, height: u32);

    /// Current surface dimensions in pixels
    fn surface_size(&self) -> (u32, u32);

    /// Whether the debug overlay is visible
    fn debug_overlay_visible(&self) -> bool;

    /// Show the debug overlay
    fn show_debug_overlay(&mut self);

    /// Hide the debug overlay
    fn hide_debug_overlay(&mut self);
}

/// Error rendering a frame
#[derive(Debug)]
pub enum RenderError {
    /// The render surface was lost and must be reconfigured
    SurfaceLost,
    /// The backend ran out of memory
    OutOfMemory,
    /// Any other backend failure
    Backend(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "render surface lost"),
            RenderError::OutOfMemory => write!(f, "render backend out of memory"),
            RenderError::Backend(message) => write!(f, "render backend error: {}", message),
        }
    }
}

impl std::error::Error for RenderError {}

/// A rendering backend that records instead of drawing
///
/// Useful for tests and headless tooling: every call the controller makes is
/// counted so ordering and gating behavior can be asserted.
#[derive(Debug)]
pub struct HeadlessEngine {
    offline_support: bool,
    loop_running: bool,
    overlay_visible: bool,
    delta_ms: f32,
    surface_size: (u32, u32),
    scenes_created: u32,
    frames_rendered: u64,
    resize_calls: Vec<(u32, u32)>,
    last_rendered_scene: Option<SceneRef>,
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessEngine {
    /// Create a headless engine with a 1280x720 surface and a 16ms delta
    pub fn new() -> Self {
        Self {
            offline_support: true,
            loop_running: false,
            overlay_visible: false,
            delta_ms: 16.0,
            surface_size: (1280, 720),
            scenes_created: 0,
            frames_rendered: 0,
            resize_calls: Vec::new(),
            last_rendered_scene: None,
        }
    }

    /// Set the fixed frame delta reported by [`Engine::delta_time_ms`]
    pub fn with_delta_ms(mut self, delta_ms: f32) -> Self {
        self.delta_ms = delta_ms;
        self
    }

    /// Whether offline/caching support is enabled
    pub fn offline_support(&self) -> bool {
        self.offline_support
    }

    /// Number of scenes created through this engine
    pub fn scenes_created(&self) -> u32 {
        self.scenes_created
    }

    /// Number of frames rendered
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Sizes passed to [`Engine::resize`], in call order
    pub fn resize_calls(&self) -> &[(u32, u32)] {
        &self.resize_calls
    }

    /// The scene most recently rendered, if any
    pub fn last_rendered_scene(&self) -> Option<&SceneRef> {
        self.last_rendered_scene.as_ref()
    }
}

impl Engine for HeadlessEngine {
    fn create_scene(&mut self, settings: SceneSettings) -> SceneRef {
        self.scenes_created += 1;
        SceneRef::new(Scene::from_settings(settings))
    }

    fn set_offline_support(&mut self, enabled: bool) {
        self.offline_support = enabled;
    }

    fn run_render_loop(&mut self) {
        self.loop_running = true;
    }

    fn stop_render_loop(&mut self) {
        self.loop_running = false;
    }

    fn render_loop_running(&self) -> bool {
        self.loop_running
    }

    fn render(
        &mut self,
        scene: &SceneRef,
        _cameras: &[Camera],
        _lights: &[Light],
    ) -> Result<(), RenderError> {
        self.frames_rendered += 1;
        self.last_rendered_scene = Some(scene.clone());
        Ok(())
    }

    fn delta_time_ms(&mut self) -> f32 {
        self.delta_ms
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.surface_size = (width.max(1), height.max(1));
        self.resize_calls.push((width, height));
    }

    fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    fn debug_overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    fn show_debug_overlay(&mut self) {
        self.overlay_visible = true;
        log::debug!("debug overlay shown");
    }

    fn hide_debug_overlay(&mut self) {
        self.overlay_visible = false;
        log::debug!("debug overlay hidden");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_scene_counts() {
        let mut engine = HeadlessEngine::new();
        let a = engine.create_scene(SceneSettings::new("a"));
        let b = engine.create_scene(SceneSettings::new("b"));
        assert_eq!(engine.scenes_created(), 2);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_render_records_scene() {
        let mut engine = HeadlessEngine::new();
        let scene = engine.create_scene(SceneSettings::new("main"));
        engine.render(&scene, &[], &[]).unwrap();
        assert_eq!(engine.frames_rendered(), 1);
        assert!(engine.last_rendered_scene().unwrap().ptr_eq(&scene));
    }

    #[test]
    fn test_loop_state_transitions() {
        let mut engine = HeadlessEngine::new();
        assert!(!engine.render_loop_running());
        engine.run_render_loop();
        assert!(engine.render_loop_running());
        engine.stop_render_loop();
        assert!(!engine.render_loop_running());
    }

    #[test]
    fn test_resize_clamps_to_one() {
        let mut engine = HeadlessEngine::new();
        engine.resize(0, 0);
        assert_eq!(engine.surface_size(), (1, 1));
        assert_eq!(engine.resize_calls(), &[(0, 0)]);
    }

    #[test]
    fn test_overlay_toggles() {
        let mut engine = HeadlessEngine::new();
        assert!(!engine.debug_overlay_visible());
        engine.show_debug_overlay();
        assert!(engine.debug_overlay_visible());
        engine.hide_debug_overlay();
        assert!(!engine.debug_overlay_visible());
    }
}
