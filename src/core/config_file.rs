//! User configuration file handling
//!
//! Manages settings from ~/.config/crosshairs/settings.json

use crate::geometry::grid::GridType;
use crate::geometry::snapping::SnapInterval;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration from ~/.config/crosshairs/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    /// Pixels per grid cell
    pub grid_size: Option<f32>,
    /// Scene units per grid cell
    pub grid_distance: Option<f32>,
    /// "square" or "gridless"
    pub grid_type: Option<GridType>,
    /// "corner", "center" or a subdivision count
    pub interval: Option<SnapInterval>,
    /// Icon drawn at the reticle center
    pub icon: Option<String>,
    pub draw_icon: Option<bool>,
    pub draw_outline: Option<bool>,
    /// Directory textures are loaded from
    pub assets_dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Get the path to the crosshairs config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("crosshairs")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, logging and ignoring unreadable files
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse settings.json: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read settings.json: {}", e);
                None
            }
        }
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings written by `--new-config`
    pub fn example() -> Self {
        Self {
            grid_size: Some(100.0),
            grid_distance: Some(5.0),
            grid_type: Some(GridType::Square),
            interval: Some(SnapInterval::Center),
            icon: None,
            draw_icon: Some(true),
            draw_outline: Some(true),
            assets_dir: None,
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/crosshairs directory
    /// 2. A settings.json file with default values
    /// 3. A logs/ directory for application logs
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();
        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = crate::logging::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = Self::config_path();
        if !settings_path.exists() {
            Self::example().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert_eq!(ConfigFile::load_from(&dir.path().join("settings.json")), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.json");

        let config = ConfigFile::example();
        config.save_to(&path).expect("saved");
        assert_eq!(ConfigFile::load_from(&path), Some(config));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"grid_size": 70, "interval": 3, "grid_type": "gridless"}"#)
            .expect("write settings");

        let config = ConfigFile::load_from(&path).expect("parsed");
        assert_eq!(config.grid_size, Some(70.0));
        assert_eq!(config.interval, Some(SnapInterval::Every(3)));
        assert_eq!(config.grid_type, Some(GridType::Gridless));
        assert_eq!(config.draw_icon, None);
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").expect("write settings");
        assert_eq!(ConfigFile::load_from(&path), None);
    }
}
