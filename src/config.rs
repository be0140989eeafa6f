//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority
//! (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`STAGEHAND_SECTION__KEY`)
//!
//! The merged result is immutable for the controller's lifetime.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::input::InspectorKey;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Engine configuration
    #[serde(default)]
    pub engine: EngineConfig,
    /// Scene configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Initial camera, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraConfig>,
    /// Initial lighting; contents are opaque, presence triggers the light factory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lights: Option<LightsConfig>,
    /// Key toggling the debug overlay, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspector: Option<InspectorKey>,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            engine: EngineConfig::default(),
            scene: SceneConfig::default(),
            camera: None,
            lights: None,
            inspector: None,
            debug: DebugConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`STAGEHAND_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // STAGEHAND_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("STAGEHAND_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Stagehand".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Enable antialiasing (4x MSAA on the wgpu backend)
    pub antialias: bool,
    /// Backend-specific hints, passed through untouched
    /// (the wgpu backend reads `power_preference` and `present_mode`)
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            options: BTreeMap::new(),
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Use a right-handed coordinate system
    pub use_right_handed_system: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            use_right_handed_system: false,
        }
    }
}

/// Initial camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Camera kind; `"freecamera"` when absent
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Camera options
    #[serde(default)]
    pub options: CameraOptions,
}

/// Options for the camera factory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraOptions {
    /// Starting position; the origin when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionConfig>,
    /// Attach mouse controls to the display surface
    #[serde(default)]
    pub use_mouse_controls: bool,
}

/// A position given as explicit components
///
/// Rebuilt into the engine's native vector type before use, so caller-side
/// structures are never stored directly.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PositionConfig {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PositionConfig {
    /// Convert into the engine's native vector type
    pub fn to_vec3(self) -> glam::Vec3 {
        glam::Vec3::new(self.x, self.y, self.z)
    }
}

/// Lighting configuration
///
/// Recognized for presence only; the light factory ignores the contents and
/// always creates its fixed hemispheric rig.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LightsConfig {}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
