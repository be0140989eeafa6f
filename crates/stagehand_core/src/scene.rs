//! Scene handles
//!
//! A [`Scene`] is the currently active render target: the collection of
//! cameras, lights, and renderables an engine draws each frame. Scene data is
//! immutable after construction; what changes at runtime is *which* scene a
//! node points at, so scenes travel as cheap shared handles ([`SceneRef`])
//! and reassignment is a pointer overwrite.

use std::ops::Deref;
use std::sync::Arc;

/// Settings an engine backend uses when constructing a scene
#[derive(Debug, Clone)]
pub struct SceneSettings {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Use a right-handed coordinate system
    pub use_right_handed_system: bool,
}

impl SceneSettings {
    /// Create settings with the default left-handed system
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            use_right_handed_system: false,
        }
    }

    /// Switch the scene to a right-handed coordinate system
    pub fn with_right_handed_system(mut self, enabled: bool) -> Self {
        self.use_right_handed_system = enabled;
        self
    }
}

/// An active scene bound to an engine
///
/// Construct scenes through [`Engine::create_scene`](crate::Engine::create_scene)
/// so the backend can account for them.
#[derive(Debug)]
pub struct Scene {
    name: String,
    use_right_handed_system: bool,
}

impl Scene {
    /// Build a scene from its settings
    pub fn from_settings(settings: SceneSettings) -> Self {
        Self {
            name: settings.name,
            use_right_handed_system: settings.use_right_handed_system,
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the scene uses a right-handed coordinate system
    pub fn use_right_handed_system(&self) -> bool {
        self.use_right_handed_system
    }
}

/// Shared handle to a [`Scene`]
///
/// Clones share the same underlying scene; identity is pointer identity.
#[derive(Debug, Clone)]
pub struct SceneRef(Arc<Scene>);

impl SceneRef {
    /// Wrap a scene in a shared handle
    pub fn new(scene: Scene) -> Self {
        Self(Arc::new(scene))
    }

    /// True when both handles point at the same scene
    pub fn ptr_eq(&self, other: &SceneRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SceneRef {
    type Target = Scene;

    fn deref(&self) -> &Scene {
        &self.0
    }
}
