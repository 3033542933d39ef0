//! Grid metrics
//!
//! The reticle never reaches for a global grid. Hosts hand it a [`GridMetrics`]
//! implementation describing cell size, scene units per cell, grid topology and
//! how raw points snap onto the grid.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Grid topology of the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridType {
    Gridless,
    #[default]
    Square,
    HexOddRows,
    HexEvenRows,
    HexOddColumns,
    HexEvenColumns,
}

impl GridType {
    /// Hex layouts rank above square grids and use coarser rotation steps
    pub fn is_hex(&self) -> bool {
        matches!(
            self,
            GridType::HexOddRows
                | GridType::HexEvenRows
                | GridType::HexOddColumns
                | GridType::HexEvenColumns
        )
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gridless" => Some(GridType::Gridless),
            "square" => Some(GridType::Square),
            "hex-odd-rows" => Some(GridType::HexOddRows),
            "hex-even-rows" => Some(GridType::HexEvenRows),
            "hex-odd-columns" => Some(GridType::HexOddColumns),
            "hex-even-columns" => Some(GridType::HexEvenColumns),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GridType::Gridless => "gridless",
            GridType::Square => "square",
            GridType::HexOddRows => "hex-odd-rows",
            GridType::HexEvenRows => "hex-even-rows",
            GridType::HexOddColumns => "hex-odd-columns",
            GridType::HexEvenColumns => "hex-even-columns",
        }
    }

    pub fn all_names() -> Vec<&'static str> {
        vec![
            "gridless",
            "square",
            "hex-odd-rows",
            "hex-even-rows",
            "hex-odd-columns",
            "hex-even-columns",
        ]
    }
}

/// Grid and scene measurements the reticle depends on
pub trait GridMetrics: Send + Sync {
    /// Cell size in pixels
    fn size(&self) -> f32;

    /// Scene distance units covered by one cell
    fn distance(&self) -> f32;

    fn grid_type(&self) -> GridType;

    /// Snap a raw point onto the grid, with `interval` subdivisions per cell edge
    /// (`interval + 1` snap points along each edge, counting both endpoints)
    fn snapped_position(&self, point: Vec2, interval: u32) -> Vec2;

    /// Pixels per scene distance unit
    fn pixels_per_unit(&self) -> f32 {
        self.size() / self.distance()
    }
}

/// Square grid with its origin at the world origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareGrid {
    pub size: f32,
    pub distance: f32,
}

impl SquareGrid {
    pub fn new(size: f32, distance: f32) -> Self {
        Self { size, distance }
    }
}

impl GridMetrics for SquareGrid {
    fn size(&self) -> f32 {
        self.size
    }

    fn distance(&self) -> f32 {
        self.distance
    }

    fn grid_type(&self) -> GridType {
        GridType::Square
    }

    fn snapped_position(&self, point: Vec2, interval: u32) -> Vec2 {
        let step = self.size / interval.max(1) as f32;
        Vec2::new(
            (point.x / step).round() * step,
            (point.y / step).round() * step,
        )
    }
}

/// Scene without a grid; points pass through unsnapped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gridless {
    pub size: f32,
    pub distance: f32,
}

impl GridMetrics for Gridless {
    fn size(&self) -> f32 {
        self.size
    }

    fn distance(&self) -> f32 {
        self.distance
    }

    fn grid_type(&self) -> GridType {
        GridType::Gridless
    }

    fn snapped_position(&self, point: Vec2, _interval: u32) -> Vec2 {
        point
    }
}
