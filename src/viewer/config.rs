// Viewer configuration module
//
// This module provides the window and rendering configuration for the
// viewer, with save/load support to/from TOML files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Main window title
    pub title: String,

    /// Window width in logical pixels
    pub width: u32,

    /// Window height in logical pixels
    pub height: u32,

    /// Whether to enable VSync
    pub vsync: bool,

    /// Backbuffer clear color as linear RGB
    pub clear_color: [f32; 3],
}

impl ViewerConfig {
    /// Create a new configuration with default values
    ///
    /// Default: 1280x720 window, VSync enabled, blue-gray background
    pub fn new() -> Self {
        Self {
            title: String::from("Image Viewer"),
            width: 1280,
            height: 720,
            vsync: true,
            clear_color: [0.45, 0.55, 0.60],
        }
    }

    /// Set the window title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    /// Set the window size in logical pixels
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    /// Set VSync enabled or disabled
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Set the backbuffer clear color
    pub fn with_clear_color(mut self, clear_color: [f32; 3]) -> Self {
        self.clear_color = clear_color;
        self
    }

    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// Result containing the configuration or an error message
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Save configuration to a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// Result indicating success or an error message
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        fs::write(&path, contents).map_err(|e| format!("Failed to write config file: {}", e))
    }

    /// Load configuration from a file, falling back to defaults
    ///
    /// If the file cannot be loaded, the default configuration is used and
    /// written back so the user has a file to edit.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_file(&path).unwrap_or_else(|e| {
            eprintln!("Could not load config ({}), using defaults", e);
            let config = Self::new();
            if let Err(e) = config.save_to_file(&path) {
                eprintln!("Warning: Could not save default config: {}", e);
            } else {
                println!("Created default configuration file");
            }
            config
        })
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ViewerConfig::new();
        assert_eq!(config.title, "Image Viewer");
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert!(config.vsync);
        assert_eq!(config.clear_color, [0.45, 0.55, 0.60]);
    }

    #[test]
    fn test_config_builder() {
        let config = ViewerConfig::new()
            .with_title("Camera Feed")
            .with_size(800, 600)
            .with_vsync(false)
            .with_clear_color([0.0, 0.0, 0.0]);

        assert_eq!(config.title, "Camera Feed");
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert!(!config.vsync);
        assert_eq!(config.clear_color, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_size_clamping() {
        let config = ViewerConfig::new().with_size(0, 0);
        assert_eq!(config.width, 1);
        assert_eq!(config.height, 1);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ViewerConfig::new().with_title("Round Trip").with_size(320, 240);
        let serialized = toml::to_string_pretty(&config).unwrap();
        let restored: ViewerConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(restored.title, config.title);
        assert_eq!(restored.width, config.width);
        assert_eq!(restored.height, config.height);
        assert_eq!(restored.vsync, config.vsync);
        assert_eq!(restored.clear_color, config.clear_color);
    }

    #[test]
    fn test_load_or_default_creates_file() {
        let path = std::env::temp_dir().join("vidview_test_config.toml");
        std::fs::remove_file(&path).ok();

        let config = ViewerConfig::load_or_default(&path);
        assert_eq!(config.width, 1280);
        assert!(path.exists());

        let reloaded = ViewerConfig::load_from_file(&path).unwrap();
        assert_eq!(reloaded.title, config.title);

        std::fs::remove_file(&path).ok();
    }
}
