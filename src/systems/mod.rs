//! Bevy Systems and Plugins
//!
//! This module contains Bevy-specific systems and plugin configurations:
//! - Plugin management and logging configuration
//! - Pointer input forwarding to the placement canvas
//! - The demo scene lifecycle

pub mod placement;
pub mod plugins;
pub mod pointer_input;

// Re-export commonly used items
pub use placement::{exit_on_esc, PendingPlacement, PlacementReport};
pub use plugins::{configure_default_plugins, PlacementScenePlugin, ReticlePlugin};
pub use pointer_input::forward_pointer_input;
