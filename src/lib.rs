//! Stagehand - root lifecycle controller for an interactive 3D scene
//!
//! The [`App`] controller owns a rendering backend, the active scene, the
//! camera/light rig, and a hierarchical scene-graph root, and drives a
//! per-frame tick. The host environment (a winit event loop, or a test
//! harness) schedules ticks and delivers window signals.

pub mod app;
pub mod config;
pub mod input;

pub use app::{App, Lifecycle, NoopLifecycle};
pub use config::AppConfig;
pub use input::{InspectorKey, KeyInput, WindowSignal};

// Re-export the core types most hosts need
pub use stagehand_core::{
    Camera, CameraKind, Engine, Group, HeadlessEngine, Leaf, Light, LightKind, Node, NodeRole,
    RenderError, Scene, SceneRef, SceneSettings, Vec3,
};
