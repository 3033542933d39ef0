//! Circular template geometry
//!
//! Scene distances are measured in grid units (feet, meters, ...). Drawing
//! happens in pixels, in the reticle's local frame with its center at the origin.

use super::grid::GridMetrics;
use crate::core::errors::ReticleError;
use bevy::prelude::*;
use kurbo::{Circle, Line, Point};
use serde::{Deserialize, Serialize};

/// Template shapes a placement may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateShape {
    #[default]
    Circle,
    Cone,
    Rect,
    Ray,
}

impl TemplateShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateShape::Circle => "circle",
            TemplateShape::Cone => "cone",
            TemplateShape::Rect => "rect",
            TemplateShape::Ray => "ray",
        }
    }
}

/// Scene distance (radius) of a reticle of the given size: one size step is half a cell
pub fn scene_distance(size: f32, grid_distance: f32) -> f32 {
    grid_distance / 2.0 * size
}

/// Inverse of [`scene_distance`]
pub fn width_from_distance(distance: f32, grid_distance: f32) -> f32 {
    distance / (grid_distance / 2.0)
}

/// Geometry derived from a reticle's position, direction and distance
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateGeometry {
    pub shape: TemplateShape,
    /// Radius in pixels
    pub pixel_radius: f64,
    /// Direction ray in world coordinates, starting at the reticle position
    pub ray: Line,
}

impl TemplateGeometry {
    pub fn compute(
        shape: TemplateShape,
        position: Vec2,
        direction_degrees: f32,
        distance: f32,
        grid: &dyn GridMetrics,
    ) -> Self {
        let pixel_radius = (distance * grid.pixels_per_unit()) as f64;
        let radians = (direction_degrees as f64).to_radians();
        let origin = Point::new(position.x as f64, position.y as f64);

        Self {
            shape,
            pixel_radius,
            ray: ray_from_angle(origin, radians, pixel_radius),
        }
    }

    /// The drawable outline, in local coordinates
    pub fn circle(&self) -> Result<Circle, ReticleError> {
        match self.shape {
            TemplateShape::Circle => Ok(Circle::new(Point::ORIGIN, self.pixel_radius)),
            other => Err(ReticleError::UnsupportedShape {
                shape: other.as_str().to_string(),
            }),
        }
    }
}

pub fn ray_from_angle(origin: Point, radians: f64, length: f64) -> Line {
    let end = Point::new(
        origin.x + radians.cos() * length,
        origin.y + radians.sin() * length,
    );
    Line::new(origin, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::grid::SquareGrid;

    #[test]
    fn test_distance_conversions() {
        assert_eq!(scene_distance(2.0, 5.0), 5.0);
        assert_eq!(scene_distance(3.0, 10.0), 15.0);
        assert_eq!(width_from_distance(5.0, 5.0), 2.0);
        assert_eq!(width_from_distance(scene_distance(7.0, 5.0), 5.0), 7.0);
    }

    #[test]
    fn test_circle_radius_in_pixels() {
        let grid = SquareGrid::new(100.0, 5.0);
        let geometry = TemplateGeometry::compute(TemplateShape::Circle, Vec2::ZERO, 0.0, 5.0, &grid);
        let circle = geometry.circle().expect("circles are supported");
        assert_eq!(circle.radius, 100.0);
        assert_eq!(circle.center, Point::ORIGIN);
    }

    #[test]
    fn test_ray_follows_direction() {
        let grid = SquareGrid::new(100.0, 5.0);
        let geometry =
            TemplateGeometry::compute(TemplateShape::Circle, Vec2::new(150.0, 50.0), 90.0, 5.0, &grid);
        assert_eq!(geometry.ray.p0, Point::new(150.0, 50.0));
        assert!((geometry.ray.p1.x - 150.0).abs() < 1e-9);
        assert!((geometry.ray.p1.y - 150.0).abs() < 1e-9);
        assert!(((geometry.ray.p1 - geometry.ray.p0).hypot() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_circular_shapes_are_rejected() {
        let grid = SquareGrid::new(100.0, 5.0);
        let geometry = TemplateGeometry::compute(TemplateShape::Cone, Vec2::ZERO, 0.0, 5.0, &grid);
        assert_eq!(
            geometry.circle(),
            Err(ReticleError::UnsupportedShape {
                shape: "cone".to_string()
            })
        );
    }
}
