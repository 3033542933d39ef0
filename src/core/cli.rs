//! Command line interface for the crosshairs placement demo
//!
//! Handles parsing command line arguments, validates them, and merges them
//! with the user config file into [`AppSettings`].

use crate::core::config_file::ConfigFile;
use crate::core::settings::{AppSettings, GridSettings, DEFAULT_ASSETS_DIR};
use crate::geometry::grid::GridType;
use crate::geometry::snapping::SnapInterval;
use crate::placement::{LabelOffset, PlacementConfig};
use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Crosshairs CLI arguments
///
/// Examples:
///   crosshairs                                  # One-cell reticle snapping to half cells
///   crosshairs --size 4 --interval center       # Larger reticle centered in cells
///   crosshairs --label "Fireball" --texture tiles/fire.png
///   crosshairs --grid-type gridless --no-icon   # Free placement without the center icon
#[derive(Parser, Debug, Resource, Clone, Default)]
#[clap(
    name = "crosshairs",
    version,
    about = "Grid-snapped placement reticle",
    long_about = "Shows a circular placement reticle on a grid. Move the mouse to position it, scroll to rotate (ctrl for coarse steps), shift+scroll to resize, left click to confirm and right click to cancel."
)]
pub struct CliArgs {
    /// Reticle radius in half-grid units
    #[clap(long = "size", short = 's', help = "Reticle radius in half-grid units")]
    pub size: Option<f32>,

    /// Snap interval
    #[clap(
        long = "interval",
        short = 'i',
        help = "Snap interval: corner, center or a subdivision count",
        long_help = "Snap interval. 'corner' snaps to cell corners, 'center' to cell centers, and a number N snaps to N subdivisions of each cell edge."
    )]
    pub interval: Option<String>,

    #[clap(long = "label", short = 'l', help = "Text shown below the reticle")]
    pub label: Option<String>,

    #[clap(long = "label-offset-x", help = "Horizontal label offset in pixels")]
    pub label_offset_x: Option<f32>,

    #[clap(long = "label-offset-y", help = "Vertical label offset in pixels")]
    pub label_offset_y: Option<f32>,

    #[clap(long = "tag", help = "Identifier of this placement")]
    pub tag: Option<String>,

    #[clap(long = "texture", help = "Texture filling the reticle, relative to the assets directory")]
    pub texture: Option<String>,

    #[clap(long = "icon", help = "Icon drawn at the reticle center")]
    pub icon: Option<String>,

    #[clap(long = "grid-size", help = "Pixels per grid cell")]
    pub grid_size: Option<f32>,

    #[clap(long = "grid-distance", help = "Scene units per grid cell")]
    pub grid_distance: Option<f32>,

    #[clap(long = "grid-type", help = "Grid type: square or gridless")]
    pub grid_type: Option<String>,

    #[clap(long = "assets", help = "Directory textures are loaded from")]
    pub assets_dir: Option<PathBuf>,

    #[clap(long = "no-icon", help = "Hide the center icon")]
    pub no_icon: bool,

    #[clap(long = "no-outline", help = "Hide the reticle outline")]
    pub no_outline: bool,

    /// Redirect stdout and stderr into the daily log file
    #[clap(
        long = "log-to-file",
        help = "Write logs to ~/.config/crosshairs/logs instead of the terminal"
    )]
    pub log_to_file: bool,

    /// Initialize user configuration directory with settings
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with settings",
        long_help = "Initialize the ~/.config/crosshairs directory with a settings.json file holding grid and reticle defaults."
    )]
    pub new_config: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    pub fn validate(&self) -> Result<(), String> {
        if let Some(size) = self.size {
            if !size.is_finite() || size <= 0.0 {
                return Err(format!("Invalid size: {size}\nThe size must be a positive number."));
            }
        }

        if let Some(interval) = &self.interval {
            interval
                .parse::<SnapInterval>()
                .map_err(|e| format!("{e}"))?;
        }

        for (name, value) in [("grid size", self.grid_size), ("grid distance", self.grid_distance)] {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(format!("Invalid {name}: {value}\nIt must be a positive number."));
                }
            }
        }

        if let Some(grid_type) = &self.grid_type {
            match GridType::parse(grid_type) {
                Some(parsed) if GridSettings::is_supported(parsed) => {}
                Some(_) => {
                    return Err(format!(
                        "Grid type '{grid_type}' is not supported by the demo\nUse 'square' or 'gridless'."
                    ));
                }
                None => {
                    let available = GridType::all_names().join(", ");
                    return Err(format!(
                        "Unknown grid type: '{grid_type}'\nKnown grid types: {available}"
                    ));
                }
            }
        }

        Ok(())
    }

    /// Resolve settings
    ///
    /// Priority order:
    /// 1. CLI arguments
    /// 2. Config file (~/.config/crosshairs/settings.json)
    /// 3. Built-in defaults
    pub fn resolve_settings(&self, file: Option<&ConfigFile>) -> AppSettings {
        let defaults = GridSettings::default();
        let file = file.cloned().unwrap_or_default();

        let grid = GridSettings {
            size: self.grid_size.or(file.grid_size).unwrap_or(defaults.size),
            distance: self
                .grid_distance
                .or(file.grid_distance)
                .unwrap_or(defaults.distance),
            grid_type: self
                .grid_type
                .as_deref()
                .and_then(GridType::parse)
                .or(file.grid_type)
                .unwrap_or(defaults.grid_type),
        };

        let base = PlacementConfig::default();
        let interval = self
            .interval
            .as_deref()
            .and_then(|i| i.parse().ok())
            .or(file.interval)
            .unwrap_or(base.interval);
        if self.interval.is_none() && file.interval.is_some() {
            debug!("Using interval from config file: {}", interval);
        }

        let placement = PlacementConfig {
            size: self.size.unwrap_or(base.size),
            texture: self.texture.clone(),
            icon: self.icon.clone().or(file.icon).unwrap_or(base.icon),
            label: self.label.clone().unwrap_or(base.label),
            label_offset: LabelOffset {
                x: self.label_offset_x.unwrap_or(0.0),
                y: self.label_offset_y.unwrap_or(0.0),
            },
            tag: self.tag.clone().unwrap_or(base.tag),
            draw_icon: !self.no_icon && file.draw_icon.unwrap_or(true),
            draw_outline: !self.no_outline && file.draw_outline.unwrap_or(true),
            interval,
            ..base
        };

        AppSettings {
            grid,
            placement,
            assets_dir: self
                .assets_dir
                .clone()
                .or(file.assets_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "crosshairs",
            "--size",
            "2",
            "--interval",
            "center",
            "--label",
            "Fireball",
            "--no-icon",
        ]);
        assert!(args.validate().is_ok());
        assert_eq!(args.size, Some(2.0));
        assert_eq!(args.interval.as_deref(), Some("center"));
        assert!(args.no_icon);
        assert!(!args.no_outline);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_interval = CliArgs {
            interval: Some("diagonal".to_string()),
            ..Default::default()
        };
        assert!(bad_interval.validate().is_err());

        let bad_size = CliArgs {
            size: Some(-2.0),
            ..Default::default()
        };
        assert!(bad_size.validate().is_err());

        let hex = CliArgs {
            grid_type: Some("hex-odd-rows".to_string()),
            ..Default::default()
        };
        assert!(hex.validate().unwrap_err().contains("not supported"));

        let unknown = CliArgs {
            grid_type: Some("triangles".to_string()),
            ..Default::default()
        };
        assert!(unknown.validate().unwrap_err().contains("Unknown grid type"));
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let file = ConfigFile {
            grid_size: Some(70.0),
            interval: Some(SnapInterval::Corner),
            draw_outline: Some(false),
            ..Default::default()
        };
        let args = CliArgs {
            interval: Some("3".to_string()),
            size: Some(4.0),
            ..Default::default()
        };

        let settings = args.resolve_settings(Some(&file));
        assert_eq!(settings.grid.size, 70.0);
        assert_eq!(settings.grid.distance, 5.0);
        assert_eq!(settings.placement.interval, SnapInterval::Every(3));
        assert_eq!(settings.placement.size, 4.0);
        assert!(!settings.placement.draw_outline);
        assert!(settings.placement.draw_icon);
    }

    #[test]
    fn test_defaults_without_config_file() {
        let settings = CliArgs::default().resolve_settings(None);
        assert_eq!(settings, AppSettings::default());
    }
}
