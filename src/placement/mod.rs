//! The placement reticle: configuration, state and the reticle itself

pub mod config;
pub mod reticle;
pub mod state;

pub use config::{LabelOffset, PlacementConfig};
pub use reticle::{Callbacks, OriginPanel, PlacementReticle, ReticleId, ShowCallback};
pub use state::{PlacementState, SessionPhase};
