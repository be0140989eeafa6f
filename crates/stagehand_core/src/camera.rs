//! Camera descriptions
//!
//! Cameras are plain data handed to the engine backend each frame. The
//! controller appends them to its camera list; they are never removed within
//! the controller's lifetime.

use glam::Vec3;

/// Kind of camera
#[derive(Debug, Clone, PartialEq)]
pub enum CameraKind {
    /// Unconstrained six-degrees-of-freedom camera
    Free,
    /// Orbit camera parameterized by angles and radius around a target
    ArcRotate {
        /// Longitudinal angle in radians
        alpha: f32,
        /// Latitudinal angle in radians
        beta: f32,
        /// Distance from the target
        radius: f32,
        /// Orbit target point
        target: Vec3,
    },
}

/// An engine-native camera handle
#[derive(Debug, Clone)]
pub struct Camera {
    name: String,
    kind: CameraKind,
    position: Vec3,
    controls_attached: bool,
}

impl Camera {
    /// Create a free camera at a position
    pub fn free(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            kind: CameraKind::Free,
            position,
            controls_attached: false,
        }
    }

    /// Create an arc-rotate camera orbiting a target
    ///
    /// The camera starts at the origin; use [`Camera::set_position`] to place
    /// it explicitly.
    pub fn arc_rotate(
        name: impl Into<String>,
        alpha: f32,
        beta: f32,
        radius: f32,
        target: Vec3,
    ) -> Self {
        Self {
            name: name.into(),
            kind: CameraKind::ArcRotate {
                alpha,
                beta,
                radius,
                target,
            },
            position: Vec3::ZERO,
            controls_attached: false,
        }
    }

    /// Camera name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Camera kind
    pub fn kind(&self) -> &CameraKind {
        &self.kind
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the camera to an explicit position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Attach interactive controls bound to the display surface
    pub fn attach_controls(&mut self) {
        self.controls_attached = true;
    }

    /// Whether interactive controls are attached
    pub fn controls_attached(&self) -> bool {
        self.controls_attached
    }
}

/// Error creating a camera
#[derive(Debug)]
pub enum CameraError {
    /// The requested camera kind is not recognized
    UnsupportedKind(String),
}

impl std::fmt::Display for CameraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraError::UnsupportedKind(kind) => {
                write!(f, "camera kind '{}' is not supported", kind)
            }
        }
    }
}

impl std::error::Error for CameraError {}
