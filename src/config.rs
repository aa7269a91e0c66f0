//! Demo configuration.
//!
//! The demos take no command line flags. Everything tunable (window size,
//! clear colour, projection, motion speeds and the data directory) lives in
//! [`DemoConfig`], which defaults to the values the demos were written for and
//! can be overridden by an optional `demo.toml`.

use std::{
    f32::consts::PI,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, Result};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "RENDER_STEPS_CONFIG";

/// Config file looked up in the working directory when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "demo.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub motion: MotionConfig,
    /// Directory all shaders, meshes and textures are read from.
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub clear_colour: [f64; 4],
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Distance between the camera and the origin along -Z.
    pub view_distance: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Units per second while a movement key is held.
    pub move_speed: f32,
    /// Radians per second of the constant spin around Y.
    pub rotation_speed: f32,
    pub model_scale: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            render: RenderConfig::default(),
            motion: MotionConfig::default(),
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL demo".to_string(),
            width: 800,
            height: 600,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_colour: [0.3, 0.3, 0.3, 1.0],
            fov_y_degrees: 60.0,
            z_near: 100.0,
            z_far: 1000.0,
            view_distance: 500.0,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 100.0,
            rotation_speed: PI,
            model_scale: 100.0,
        }
    }
}

impl RenderConfig {
    pub fn clear_colour(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_colour;
        wgpu::Color { r, g, b, a }
    }
}

impl DemoConfig {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| DemoError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DemoError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Load the config from [`CONFIG_ENV`] or [`DEFAULT_CONFIG_FILE`].
    ///
    /// A missing file is not an error and yields the defaults; a file that exists
    /// but does not parse is.
    pub fn discover() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if !path.exists() {
            log::info!(
                "No config found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        log::info!("Loading config from {}", path.display());
        Self::load(&path)
    }

    pub fn data_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_open_an_800_by_600_window() {
        let config = DemoConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.render.z_near, 100.0);
        assert_eq!(config.render.z_far, 1000.0);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let text = r#"
            data_dir = "assets"

            [window]
            width = 1024

            [motion]
            move_speed = 25.0
        "#;
        let config = DemoConfig::from_toml_str(text, Path::new("demo.toml")).unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.title, "OpenGL demo");
        assert_eq!(config.motion.move_speed, 25.0);
        assert_eq!(config.motion.rotation_speed, PI);
        assert_eq!(config.data_path("cube.obj"), PathBuf::from("assets/cube.obj"));
    }

    #[test]
    fn malformed_file_names_its_path() {
        let err = DemoConfig::from_toml_str("[window]\nwidth = \"wide\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, DemoError::Config { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn clear_colour_converts_to_wgpu() {
        let colour = RenderConfig::default().clear_colour();
        assert_eq!(colour.r, 0.3);
        assert_eq!(colour.a, 1.0);
    }
}
