//! Crosshairs
pub mod core;
pub mod geometry;
pub mod logging;
pub mod placement;
pub mod rendering;
pub mod session;
pub mod systems;

pub use crate::core::errors::ReticleError;
pub use crate::placement::{Callbacks, PlacementConfig, PlacementReticle};
pub use crate::session::{PlacementCanvas, PlacementHandle};
pub use crate::systems::ReticlePlugin;
