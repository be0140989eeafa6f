//! Light descriptions

use glam::Vec3;

/// Kind of light
#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    /// Ambient sky light aimed along a direction
    Hemispheric {
        /// Direction the light points toward
        direction: Vec3,
    },
}

/// An engine-native light handle
#[derive(Debug, Clone)]
pub struct Light {
    name: String,
    kind: LightKind,
    intensity: f32,
}

impl Light {
    /// Create a hemispheric light aimed along a direction
    pub fn hemispheric(name: impl Into<String>, direction: Vec3) -> Self {
        Self {
            name: name.into(),
            kind: LightKind::Hemispheric { direction },
            intensity: 1.0,
        }
    }

    /// Set the light intensity
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Light name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Light kind
    pub fn kind(&self) -> &LightKind {
        &self.kind
    }

    /// Light intensity
    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}
