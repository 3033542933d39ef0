//! Pointer snapping
//!
//! Converts raw pointer coordinates into grid-aligned reticle positions.

use super::grid::GridMetrics;
use crate::core::errors::ReticleError;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Snap granularity requested by a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IntervalRepr", into = "IntervalRepr")]
pub enum SnapInterval {
    /// Snap to cell corners
    Corner,
    /// Snap to cell centers
    Center,
    /// Snap to `n` subdivisions of each cell edge
    Every(u32),
}

impl SnapInterval {
    /// Subdivisions handed to the grid's snap function
    pub fn subdivisions(&self) -> u32 {
        match self {
            SnapInterval::Corner => 1,
            SnapInterval::Center => 2,
            SnapInterval::Every(n) => *n,
        }
    }

    /// Whether snapped points are pushed off grid lines into cell centers
    pub fn centers_on_square(&self) -> bool {
        matches!(self, SnapInterval::Center)
    }
}

impl Default for SnapInterval {
    fn default() -> Self {
        SnapInterval::Every(2)
    }
}

impl FromStr for SnapInterval {
    type Err = ReticleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "corner" => Ok(SnapInterval::Corner),
            "center" => Ok(SnapInterval::Center),
            other => match other.parse::<u32>() {
                Ok(n) if n > 0 => Ok(SnapInterval::Every(n)),
                _ => Err(ReticleError::InvalidInterval(s.to_string())),
            },
        }
    }
}

impl fmt::Display for SnapInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapInterval::Corner => write!(f, "corner"),
            SnapInterval::Center => write!(f, "center"),
            SnapInterval::Every(n) => write!(f, "{n}"),
        }
    }
}

/// Wire form of an interval: a mode name or a subdivision count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum IntervalRepr {
    Count(i64),
    Named(String),
}

impl TryFrom<IntervalRepr> for SnapInterval {
    type Error = ReticleError;

    fn try_from(repr: IntervalRepr) -> Result<Self, Self::Error> {
        match repr {
            IntervalRepr::Count(n) if n > 0 && n <= u32::MAX as i64 => {
                Ok(SnapInterval::Every(n as u32))
            }
            IntervalRepr::Count(n) => Err(ReticleError::InvalidInterval(n.to_string())),
            IntervalRepr::Named(name) => name.parse(),
        }
    }
}

impl From<SnapInterval> for IntervalRepr {
    fn from(interval: SnapInterval) -> Self {
        match interval {
            SnapInterval::Every(n) => IntervalRepr::Count(n as i64),
            named => IntervalRepr::Named(named.to_string()),
        }
    }
}

/// Snap a raw pointer point onto the grid
///
/// With `center_on_square`, any axis that lands exactly on a grid line is moved
/// half a cell toward the side the raw pointer came from.
pub fn snap_point(
    grid: &dyn GridMetrics,
    raw: Vec2,
    interval: u32,
    center_on_square: bool,
) -> Vec2 {
    let snapped = grid.snapped_position(raw, interval);
    if !center_on_square {
        return snapped;
    }

    let size = grid.size();
    Vec2::new(
        center_axis(raw.x, snapped.x, size),
        center_axis(raw.y, snapped.y, size),
    )
}

fn center_axis(raw: f32, snapped: f32, size: f32) -> f32 {
    if snapped % size != 0.0 {
        return snapped;
    }
    if raw > snapped {
        snapped + size / 2.0
    } else {
        snapped - size / 2.0
    }
}
