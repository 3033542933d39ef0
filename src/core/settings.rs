//! Application settings resolved from CLI arguments and the config file

use crate::geometry::grid::{GridMetrics, GridType, Gridless, SquareGrid};
use crate::placement::PlacementConfig;
use bevy::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

pub const WINDOW_TITLE: &str = "Crosshairs";
pub const DEFAULT_WINDOW_SIZE: (f32, f32) = (1280.0, 800.0);

/// Pixels per grid cell
pub const DEFAULT_GRID_SIZE: f32 = 100.0;
/// Scene units per grid cell
pub const DEFAULT_GRID_DISTANCE: f32 = 5.0;

pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Grid the demo scene is laid out on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    pub size: f32,
    pub distance: f32,
    pub grid_type: GridType,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            distance: DEFAULT_GRID_DISTANCE,
            grid_type: GridType::Square,
        }
    }
}

impl GridSettings {
    /// Grid types this application can snap to on its own
    pub fn is_supported(grid_type: GridType) -> bool {
        matches!(grid_type, GridType::Square | GridType::Gridless)
    }

    pub fn metrics(&self) -> Arc<dyn GridMetrics> {
        match self.grid_type {
            GridType::Gridless => Arc::new(Gridless {
                size: self.size,
                distance: self.distance,
            }),
            other => {
                if other.is_hex() {
                    warn!("Hex grids need a host grid implementation; snapping as square");
                }
                Arc::new(SquareGrid::new(self.size, self.distance))
            }
        }
    }
}

/// Everything the application needs to run one placement
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub grid: GridSettings,
    pub placement: PlacementConfig,
    /// Root directory textures are loaded from
    pub assets_dir: PathBuf,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            placement: PlacementConfig::default(),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}
