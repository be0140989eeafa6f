//! Application controller
//!
//! [`App`] is the root lifecycle controller for an interactive 3D scene. It
//! owns the engine backend, the active scene, the camera/light rig, and the
//! scene-graph root, and drives the per-frame tick. The host environment
//! (see `main.rs`) schedules ticks and delivers [`WindowSignal`]s; nothing in
//! here touches a window directly, so the whole controller runs against
//! [`HeadlessEngine`](stagehand_core::HeadlessEngine) in tests.

use glam::Vec3;
use stagehand_core::{
    Camera, CameraError, Engine, Group, Light, Node, NodeRole, RenderError, SceneRef,
    SceneSettings,
};

use crate::config::{AppConfig, CameraOptions, LightsConfig};
use crate::input::{KeyInput, WindowSignal};

/// Name of the scene-graph root group
const ROOT_GROUP_NAME: &str = "application-root";

/// Override points for specializing consumers
///
/// Both hooks default to no-ops. Install an implementation with
/// [`App::with_hooks`].
pub trait Lifecycle {
    /// Invoked exactly once, on the first tick, before the first render
    fn on_create(&mut self, _scene: &SceneRef) {}

    /// Invoked once per rendered frame with the engine-reported frame delta
    /// in milliseconds
    fn on_render(&mut self, _delta_ms: f32) {}
}

/// The default hook installation; every callback is a no-op
pub struct NoopLifecycle;

impl Lifecycle for NoopLifecycle {}

/// Root lifecycle controller for an interactive 3D scene
pub struct App<E: Engine> {
    config: AppConfig,
    engine: E,
    scene: SceneRef,
    cameras: Vec<Camera>,
    lights: Vec<Light>,
    root: Group,
    hooks: Box<dyn Lifecycle>,
    initialized: bool,
}

impl<E: Engine> App<E> {
    /// Create a controller with no-op lifecycle hooks
    ///
    /// The engine backend is constructed by the host against the display
    /// surface, using `config.engine`.
    pub fn new(engine: E, config: AppConfig) -> Self {
        Self::with_hooks(engine, config, Box::new(NoopLifecycle))
    }

    /// Create a controller with the given lifecycle hooks
    pub fn with_hooks(mut engine: E, config: AppConfig, hooks: Box<dyn Lifecycle>) -> Self {
        engine.set_offline_support(false);

        let scene = engine.create_scene(
            SceneSettings::new("scene")
                .with_right_handed_system(config.scene.use_right_handed_system),
        );

        // The loop starts before any camera exists; ticks are dropped until
        // the camera list is non-empty.
        engine.run_render_loop();

        let mut app = Self {
            config,
            engine,
            scene: scene.clone(),
            cameras: Vec::new(),
            lights: Vec::new(),
            root: Group::new(),
            hooks,
            initialized: false,
        };

        if let Some(camera) = app.config.camera.clone() {
            app.add_camera(camera.kind.as_deref(), camera.options);
        }

        if let Some(lights) = app.config.lights.clone() {
            app.add_lights(Some(&lights));
        }

        app.root.set_parent(NodeRole::Application);
        app.root.initialize_group(scene.clone(), ROOT_GROUP_NAME);
        app.root.on_parented(&scene, NodeRole::Application);

        app
    }

    /// Constant name of the controller
    pub fn name(&self) -> &'static str {
        "root"
    }

    /// Role tag of the controller in the node hierarchy
    pub fn role(&self) -> NodeRole {
        NodeRole::Application
    }

    /// The merged, immutable configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The currently active scene
    pub fn scene(&self) -> &SceneRef {
        &self.scene
    }

    /// Cameras created so far, in creation order
    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    /// Lights created so far, in creation order
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// The scene-graph root group
    pub fn root(&self) -> &Group {
        &self.root
    }

    /// The engine backend
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the engine backend
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Current display-surface dimensions in pixels
    pub fn surface_size(&self) -> (u32, u32) {
        self.engine.surface_size()
    }

    /// Whether the one-time creation hook has run
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// Convenience method to add a typical camera
    ///
    /// `kind` defaults to `"freecamera"`. An unrecognized kind fails softly:
    /// the error is logged and the camera list is left untouched, including
    /// the control-attachment step.
    pub fn add_camera(&mut self, kind: Option<&str>, options: CameraOptions) {
        let kind = kind.unwrap_or("freecamera");
        let position = options
            .position
            .map(|p| p.to_vec3())
            .unwrap_or(Vec3::ZERO);

        match Self::create_camera(kind, position) {
            Ok(mut camera) => {
                if options.use_mouse_controls {
                    camera.attach_controls();
                }
                self.cameras.push(camera);
            }
            Err(err) => log::error!("Camera not added: {}", err),
        }
    }

    fn create_camera(kind: &str, position: Vec3) -> Result<Camera, CameraError> {
        match kind {
            "default" | "freecamera" => Ok(Camera::free("camera", position)),
            "arcrotate" => {
                let mut camera = Camera::arc_rotate("ArcRotateCamera", 0.0, 0.0, 0.0, Vec3::ZERO);
                camera.set_position(position);
                camera.attach_controls();
                Ok(camera)
            }
            other => Err(CameraError::UnsupportedKind(other.to_string())),
        }
    }

    /// Convenience method to add a typical light
    ///
    /// The option contents are ignored: this always creates one hemispheric
    /// light aimed along +Y with intensity 0.7.
    pub fn add_lights(&mut self, _options: Option<&LightsConfig>) {
        let light = Light::hemispheric("light1", Vec3::Y).with_intensity(0.7);
        self.lights.push(light);
    }

    /// Create a scene bound to the engine, with the configured handedness
    ///
    /// Useful for building a replacement scene before calling
    /// [`App::replace_all_scenes`].
    pub fn create_scene(&mut self, name: &str) -> SceneRef {
        self.engine.create_scene(
            SceneSettings::new(name)
                .with_right_handed_system(self.config.scene.use_right_handed_system),
        )
    }

    /// Render-engine tick
    ///
    /// Runs the one-time creation hook on the first invocation. Renders and
    /// runs the per-frame hook only while at least one camera exists; with
    /// zero cameras the tick is a silent no-op. Render failures propagate to
    /// the host.
    pub fn tick(&mut self) -> Result<(), RenderError> {
        if !self.initialized {
            self.hooks.on_create(&self.scene);
            self.initialized = true;
        }
        if self.initialized && !self.cameras.is_empty() {
            self.engine.render(&self.scene, &self.cameras, &self.lights)?;
            let delta_ms = self.engine.delta_time_ms();
            self.hooks.on_render(delta_ms);
        }
        Ok(())
    }

    /// Re-parent the existing scene-graph tree onto a new scene
    ///
    /// Stops the render loop, swaps the controller's and the root group's
    /// scene handles, restarts the loop, then walks the whole tree
    /// reassigning every group's scene handle. Leaves are untouched. Safe to
    /// call with the already-active scene; reassignment is pointer overwrite.
    pub fn replace_all_scenes(&mut self, scene: SceneRef) {
        self.engine.stop_render_loop();
        self.scene = scene.clone();
        self.root.set_scene(scene.clone());
        self.engine.run_render_loop();

        Self::reassign_scene(&scene, self.root.children_mut());
    }

    /// Pre-order, left-to-right reassignment over a children sequence
    fn reassign_scene(scene: &SceneRef, children: &mut [Node]) {
        for child in children {
            if let Node::Group(group) = child {
                group.set_scene(scene.clone());
            }
            let grandchildren = child.children_mut();
            if !grandchildren.is_empty() {
                Self::reassign_scene(scene, grandchildren);
            }
        }
    }

    /// Add a node under the scene-graph root
    pub fn add(&mut self, node: Node) {
        self.root.add(node);
    }

    /// Detach and return the first direct child of the root with this name
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        self.root.remove(name)
    }

    /// Detach all children of the root
    pub fn remove_all(&mut self) {
        self.root.remove_all();
    }

    /// Search the scene graph for a node by name
    pub fn find(&self, name: &str) -> Option<&Node> {
        self.root.find(name)
    }

    /// Handle a signal delivered by the host environment
    pub fn handle_signal(&mut self, signal: WindowSignal) {
        match signal {
            WindowSignal::Resized { width, height } => self.engine.resize(width, height),
            WindowSignal::KeyDown(key) => self.on_key_down(&key),
        }
    }

    fn on_key_down(&mut self, key: &KeyInput) {
        let Some(inspector) = self.config.inspector else {
            return;
        };
        if inspector.matches(key) {
            if self.engine.debug_overlay_visible() {
                self.engine.hide_debug_overlay();
            } else {
                self.engine.show_debug_overlay();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PositionConfig;
    use crate::input::InspectorKey;
    use stagehand_core::{CameraKind, HeadlessEngine};

    fn app_with(config: AppConfig) -> App<HeadlessEngine> {
        App::new(HeadlessEngine::new(), config)
    }

    fn position(x: f32, y: f32, z: f32) -> Option<PositionConfig> {
        Some(PositionConfig { x, y, z })
    }

    #[test]
    fn test_construction_disables_offline_support_and_starts_loop() {
        let app = app_with(AppConfig::default());
        assert!(!app.engine().offline_support());
        assert!(app.engine().render_loop_running());
        assert_eq!(app.engine().scenes_created(), 1);
        assert!(!app.initialized());
    }

    #[test]
    fn test_root_is_parented_to_application() {
        let app = app_with(AppConfig::default());
        assert_eq!(app.root().parent_role(), Some(NodeRole::Application));
        assert_eq!(app.root().name(), "application-root");
        assert!(app.root().scene().unwrap().ptr_eq(app.scene()));
        assert_eq!(app.name(), "root");
        assert_eq!(app.role(), NodeRole::Application);
    }

    #[test]
    fn test_tick_without_camera_never_renders() {
        let mut app = app_with(AppConfig::default());
        for _ in 0..10 {
            app.tick().unwrap();
        }
        assert!(app.initialized());
        assert_eq!(app.engine().frames_rendered(), 0);
    }

    #[test]
    fn test_tick_renders_active_scene_once_a_camera_exists() {
        let mut app = app_with(AppConfig::default());
        app.tick().unwrap();
        assert_eq!(app.engine().frames_rendered(), 0);

        app.add_camera(None, CameraOptions::default());
        app.tick().unwrap();
        app.tick().unwrap();
        assert_eq!(app.engine().frames_rendered(), 2);
        assert!(app
            .engine()
            .last_rendered_scene()
            .unwrap()
            .ptr_eq(app.scene()));
    }

    #[test]
    fn test_first_tick_with_camera_also_renders() {
        // Initialization and the first render happen in the same tick
        let mut app = app_with(AppConfig::default());
        app.add_camera(None, CameraOptions::default());
        app.tick().unwrap();
        assert!(app.initialized());
        assert_eq!(app.engine().frames_rendered(), 1);
    }

    #[test]
    fn test_add_camera_defaults_to_free_at_origin() {
        let mut app = app_with(AppConfig::default());
        app.add_camera(None, CameraOptions::default());
        assert_eq!(app.cameras().len(), 1);
        let camera = &app.cameras()[0];
        assert_eq!(*camera.kind(), CameraKind::Free);
        assert_eq!(camera.position(), Vec3::ZERO);
    }

    #[test]
    fn test_add_camera_copies_position() {
        let mut app = app_with(AppConfig::default());
        app.add_camera(
            Some("freecamera"),
            CameraOptions {
                position: position(4.0, 5.0, 6.0),
                use_mouse_controls: false,
            },
        );
        assert_eq!(app.cameras()[0].position(), Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_add_camera_default_alias() {
        let mut app = app_with(AppConfig::default());
        app.add_camera(Some("default"), CameraOptions::default());
        assert_eq!(app.cameras().len(), 1);
        assert_eq!(*app.cameras()[0].kind(), CameraKind::Free);
    }

    #[test]
    fn test_arcrotate_is_repositioned_with_controls() {
        let mut app = app_with(AppConfig::default());
        app.add_camera(
            Some("arcrotate"),
            CameraOptions {
                position: position(1.0, 2.0, 3.0),
                use_mouse_controls: false,
            },
        );
        let camera = &app.cameras()[0];
        assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
        assert!(camera.controls_attached());
        assert!(matches!(camera.kind(), CameraKind::ArcRotate { .. }));
    }

    #[test]
    fn test_unknown_camera_kind_fails_softly() {
        let mut app = app_with(AppConfig::default());
        app.add_camera(Some("fisheye"), CameraOptions::default());
        assert!(app.cameras().is_empty());
    }

    #[test]
    fn test_unknown_kind_with_mouse_controls_does_not_append() {
        // The control-attachment step is gated on successful creation
        let mut app = app_with(AppConfig::default());
        app.add_camera(
            Some("fisheye"),
            CameraOptions {
                position: position(1.0, 1.0, 1.0),
                use_mouse_controls: true,
            },
        );
        assert!(app.cameras().is_empty());
    }

    #[test]
    fn test_use_mouse_controls_attaches_on_free_camera() {
        let mut app = app_with(AppConfig::default());
        app.add_camera(
            None,
            CameraOptions {
                position: None,
                use_mouse_controls: true,
            },
        );
        assert!(app.cameras()[0].controls_attached());
    }

    #[test]
    fn test_configured_camera_and_lights_are_created_at_construction() {
        let config: AppConfig = toml::from_str(
            r#"
            [camera]
            type = "freecamera"
            [camera.options.position]
            x = 0.0
            y = 2.0
            z = -6.0
            [lights]
            "#,
        )
        .unwrap();

        let app = app_with(config);
        assert_eq!(app.cameras().len(), 1);
        assert_eq!(app.cameras()[0].position(), Vec3::new(0.0, 2.0, -6.0));
        assert_eq!(app.lights().len(), 1);
    }

    #[test]
    fn test_add_lights_tracks_fixed_hemispheric_light() {
        let mut app = app_with(AppConfig::default());
        app.add_lights(None);
        assert_eq!(app.lights().len(), 1);
        let light = &app.lights()[0];
        assert_eq!(light.name(), "light1");
        assert!((light.intensity() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_graph_delegation_targets_root() {
        let mut app = app_with(AppConfig::default());
        app.add(Node::leaf("ship", Vec3::ZERO));
        assert_eq!(app.root().child_count(), 1);
        assert!(app.find("ship").is_some());

        let removed = app.remove("ship").unwrap();
        assert_eq!(removed.name(), "ship");
        assert!(app.find("ship").is_none());

        app.add(Node::leaf("a", Vec3::ZERO));
        app.add(Node::leaf("b", Vec3::ZERO));
        app.remove_all();
        assert_eq!(app.root().child_count(), 0);
    }

    fn deep_tree_app() -> App<HeadlessEngine> {
        let mut app = app_with(AppConfig::default());
        let scene = app.scene().clone();

        let mut inner = Group::new();
        inner.initialize_group(scene.clone(), "inner");
        inner.add(Node::leaf("deep-leaf", Vec3::ZERO));

        let mut outer = Group::new();
        outer.initialize_group(scene.clone(), "outer");
        outer.add(Node::Group(inner));
        outer.add(Node::leaf("shallow-leaf", Vec3::ONE));

        app.add(Node::Group(outer));
        app.add(Node::leaf("top-leaf", Vec3::ZERO));
        app
    }

    fn assert_groups_on_scene(children: &[Node], scene: &SceneRef) {
        for child in children {
            if let Node::Group(group) = child {
                assert!(group.scene().unwrap().ptr_eq(scene), "group {}", group.name());
            }
            assert_groups_on_scene(child.children(), scene);
        }
    }

    #[test]
    fn test_replace_all_scenes_reassigns_every_group() {
        let mut app = deep_tree_app();
        let next = app.create_scene("next");

        app.replace_all_scenes(next.clone());

        assert!(app.scene().ptr_eq(&next));
        assert!(app.root().scene().unwrap().ptr_eq(&next));
        assert!(app.engine().render_loop_running());
        assert_groups_on_scene(app.root().children(), &next);

        // Leaves are untouched by the traversal
        assert!(app.find("deep-leaf").is_some());
        assert!(app.find("shallow-leaf").is_some());
        assert!(app.find("top-leaf").is_some());
    }

    #[test]
    fn test_replace_all_scenes_is_idempotent() {
        let mut app = deep_tree_app();
        let next = app.create_scene("next");

        app.replace_all_scenes(next.clone());
        app.replace_all_scenes(next.clone());

        assert!(app.scene().ptr_eq(&next));
        assert!(app.engine().render_loop_running());
        assert_groups_on_scene(app.root().children(), &next);
    }

    #[test]
    fn test_replace_all_scenes_then_tick_renders_new_scene() {
        let mut app = deep_tree_app();
        app.add_camera(None, CameraOptions::default());
        app.tick().unwrap();

        let next = app.create_scene("next");
        app.replace_all_scenes(next.clone());
        app.tick().unwrap();

        assert!(app.engine().last_rendered_scene().unwrap().ptr_eq(&next));
    }

    #[test]
    fn test_resize_signal_recomputes_once_per_event() {
        let mut app = app_with(AppConfig::default());
        app.handle_signal(WindowSignal::Resized {
            width: 800,
            height: 600,
        });
        app.handle_signal(WindowSignal::Resized {
            width: 1024,
            height: 768,
        });
        assert_eq!(app.engine().resize_calls(), &[(800, 600), (1024, 768)]);
        assert_eq!(app.surface_size(), (1024, 768));
    }

    #[test]
    fn test_inspector_key_toggles_overlay_case_insensitively() {
        let mut config = AppConfig::default();
        config.inspector = Some(InspectorKey::Char('i'));
        let mut app = app_with(config);

        app.handle_signal(WindowSignal::KeyDown(KeyInput::from_char('I')));
        assert!(app.engine().debug_overlay_visible());

        app.handle_signal(WindowSignal::KeyDown(KeyInput::from_char('i')));
        assert!(!app.engine().debug_overlay_visible());
    }

    #[test]
    fn test_other_keys_leave_overlay_unchanged() {
        let mut config = AppConfig::default();
        config.inspector = Some(InspectorKey::Char('i'));
        let mut app = app_with(config);

        app.handle_signal(WindowSignal::KeyDown(KeyInput::from_char('x')));
        assert!(!app.engine().debug_overlay_visible());
    }

    #[test]
    fn test_no_inspector_means_no_toggle() {
        let mut app = app_with(AppConfig::default());
        app.handle_signal(WindowSignal::KeyDown(KeyInput::from_char('i')));
        assert!(!app.engine().debug_overlay_visible());
    }

    #[test]
    fn test_inspector_numeric_code_match() {
        let mut config = AppConfig::default();
        config.inspector = Some(InspectorKey::Code(73));
        let mut app = app_with(config);

        app.handle_signal(WindowSignal::KeyDown(KeyInput::from_code(73)));
        assert!(app.engine().debug_overlay_visible());
    }
}
