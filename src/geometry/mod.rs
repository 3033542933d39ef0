//! Grid metrics, snapping and template geometry

pub mod grid;
pub mod snapping;
pub mod template;
pub mod utilities;

// Re-export commonly used items
pub use grid::{GridMetrics, GridType, Gridless, SquareGrid};
pub use snapping::{snap_point, SnapInterval};
pub use template::{scene_distance, width_from_distance, TemplateGeometry, TemplateShape};
