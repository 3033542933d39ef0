//! Rendering
//!
//! This module contains the reticle's drawing side:
//! - The host drawing and texture interfaces
//! - The render adapter that turns reticle geometry into drawing calls
//! - Gizmo-based implementations of those interfaces for Bevy

pub mod gizmos;
pub mod reticle;
pub mod surface;

// Re-export commonly used items
pub use gizmos::{AssetTextureLoader, GizmoFrames, GizmoSurface};
pub use reticle::{render_reticle, ReticleView};
pub use surface::{
    load_texture, Fill, IconState, LabelState, LineStyle, RenderSurface, TextureHandle,
    TextureLoader, FALLBACK_TEXTURE,
};
