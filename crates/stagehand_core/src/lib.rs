//! Core types for the Stagehand scene controller
//!
//! This crate provides the foundational types the application controller is
//! built on:
//!
//! - [`Scene`] / [`SceneRef`] - The active render target and its shared handle
//! - [`NodeRole`] - Closed set of roles in the controller/node hierarchy
//! - [`Node`] / [`Group`] / [`Leaf`] - The hierarchical scene graph
//! - [`Camera`] / [`Light`] - Engine-native camera and light descriptions
//! - [`Engine`] - The interface consumed from a rendering backend
//! - [`HeadlessEngine`] - A recording backend for tests and headless tools
//!
//! Rendering and platform integration are intentionally kept outside of this
//! crate so that the scene graph and controller logic stay testable without
//! a display.

mod camera;
mod engine;
mod graph;
mod light;
mod scene;

pub use camera::{Camera, CameraError, CameraKind};
pub use engine::{Engine, HeadlessEngine, RenderError};
pub use graph::{Group, Leaf, Node, NodeRole};
pub use light::{Light, LightKind};
pub use scene::{Scene, SceneRef, SceneSettings};

// Re-export the vector type used for positions throughout the crate.
pub use glam::Vec3;
