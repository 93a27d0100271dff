//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`GASKET_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use gasket_core::{Configuration, ControlError, Limits, Mat4};
use gasket_math::mat4;
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Initial gasket settings
    #[serde(default)]
    pub gasket: GasketConfig,
    /// Control ranges
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`GASKET_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // GASKET_GASKET__DEPTH=5 -> gasket.depth = 5
        figment = figment.merge(Env::prefixed("GASKET_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Validate the initial gasket settings against the control ranges
    pub fn session_settings(&self) -> Result<(Configuration, Limits), ConfigError> {
        let limits = self.controls.limits()?;
        let config = Configuration::new(
            self.gasket.depth,
            self.gasket.cycles,
            self.gasket.texture,
            &limits,
        )?;
        Ok((config, limits))
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
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sierpinski Gasket".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// Initial gasket settings
///
/// Values are kept signed so that out of range input reaches validation
/// instead of failing deserialization with an opaque message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasketConfig {
    /// Subdivision depth
    pub depth: i64,
    /// Animation cycles per run
    pub cycles: i64,
    /// Texture id, 1 to 3
    pub texture: i64,
}

impl Default for GasketConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            cycles: 1,
            texture: 1,
        }
    }
}

/// Control ranges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Deepest subdivision the slider allows
    pub max_depth: u32,
    /// Most cycles the slider allows
    pub max_cycles: u32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            max_depth: limits.max_depth,
            max_cycles: limits.max_cycles,
        }
    }
}

impl ControlsConfig {
    pub fn limits(&self) -> Result<Limits, ControlError> {
        Limits::new(self.max_depth, self.max_cycles)
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Orthographic view volume [left, right, bottom, top, near, far]
    pub view_bounds: [f32; 6],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.9, 0.9, 0.9, 1.0],
            view_bounds: gasket_core::session::DEFAULT_VIEW_BOUNDS,
        }
    }
}

impl RenderingConfig {
    /// Projection matrix for the configured view volume
    pub fn projection(&self) -> Result<Mat4, ConfigError> {
        let [left, right, bottom, top, near, far] = self.view_bounds;
        if !(left < right && bottom < top && near < far) {
            return Err(ConfigError::new(format!(
                "rendering.view_bounds must be increasing pairs, got {:?}",
                self.view_bounds
            )));
        }
        Ok(mat4::orthographic(left, right, bottom, top, near, far))
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let bg = &self.background_color;
        wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: bg[3] as f64,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show the current phase and cycle in the control panel
    pub show_status: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_status: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn new(message: String) -> Self {
        Self { message }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl From<ControlError> for ConfigError {
    fn from(e: ControlError) -> Self {
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
