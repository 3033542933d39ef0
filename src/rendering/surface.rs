//! Host drawing primitives
//!
//! The reticle draws through a [`RenderSurface`] it owns, and loads textures through
//! a [`TextureLoader`]. Both are implemented by the host; the Bevy implementations
//! live in [`super::gizmos`].

use crate::core::errors::ReticleError;
use bevy::prelude::*;
use kurbo::Circle;

/// Asset substituted when a requested texture fails to load
pub const FALLBACK_TEXTURE: &str = "icons/svg/hazard.svg";

/// A loaded texture: its asset path and the image the host loaded for it
///
/// Hosts without an asset store keep the default (weak) image handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    pub path: String,
    pub image: Handle<Image>,
}

impl TextureHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            image: Handle::default(),
        }
    }

    pub fn with_image(path: impl Into<String>, image: Handle<Image>) -> Self {
        Self {
            path: path.into(),
            image,
        }
    }
}

/// Outline style for the next shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color,
    pub alpha: f32,
}

/// Fill for the next shape
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Fill {
    #[default]
    Transparent,
    Texture(TextureHandle),
}

/// Text label drawn under the reticle
///
/// The text is anchored at its top-left corner; `offset` is relative to the
/// reticle center with y growing downward.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelState {
    pub text: String,
    pub font_size: f32,
    pub offset: Vec2,
}

/// The control icon at the reticle center
#[derive(Debug, Clone, PartialEq)]
pub struct IconState {
    /// Configured icon path
    pub texture: String,
    /// Loaded icon image, if the icon or its fallback could be loaded
    pub image: Option<TextureHandle>,
    pub size: f32,
    pub visible: bool,
    pub border_visible: bool,
    /// Rotation in degrees
    pub angle: f32,
}

/// Drawing primitives of one reticle
pub trait RenderSurface: Send + Sync {
    /// Move the local origin to `position` in world coordinates
    fn set_position(&mut self, position: Vec2);

    /// Erase every shape drawn so far
    fn clear(&mut self);

    fn line_style(&mut self, style: LineStyle);

    fn begin_fill(&mut self, fill: Fill);

    fn draw_circle(&mut self, circle: Circle);

    /// Width in pixels of `text` rendered at `font_size`
    fn measure_text(&self, text: &str, font_size: f32) -> f32;

    fn set_label(&mut self, label: LabelState);

    fn set_icon(&mut self, icon: IconState);

    /// Remove everything from display; the surface is not drawn to again
    fn detach(&mut self);
}

/// Loads texture assets
pub trait TextureLoader: Send + Sync {
    fn load(&self, path: &str) -> Result<TextureHandle, ReticleError>;
}

/// Load `path`, substituting [`FALLBACK_TEXTURE`] when it fails
///
/// Returns `None` only when the fallback cannot be loaded either.
pub fn load_texture(loader: &dyn TextureLoader, path: &str) -> Option<TextureHandle> {
    match loader.load(path) {
        Ok(texture) => Some(texture),
        Err(error) => {
            warn!("{error}; using fallback texture {FALLBACK_TEXTURE}");
            match loader.load(FALLBACK_TEXTURE) {
                Ok(texture) => Some(texture),
                Err(error) => {
                    warn!("Fallback texture unavailable: {error}");
                    None
                }
            }
        }
    }
}
