//! The placement reticle
//!
//! A reticle owns its configuration, its mutable [`PlacementState`] and the
//! drawing surface it renders to. Input handling lives in the session
//! controller; this type only exposes the state changes it applies.

use super::config::PlacementConfig;
use super::state::{PlacementState, SessionPhase};
use crate::core::errors::ReticleError;
use crate::geometry::grid::GridMetrics;
use crate::geometry::snapping::snap_point;
use crate::geometry::template::{scene_distance, TemplateGeometry};
use crate::rendering::reticle::{render_reticle, ReticleView, BORDER_COLOR};
use crate::rendering::surface::{load_texture, RenderSurface, TextureHandle, TextureLoader};
use bevy::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_RETICLE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a reticle instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReticleId(u64);

impl ReticleId {
    pub(crate) fn next() -> Self {
        ReticleId(NEXT_RETICLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ReticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reticle#{}", self.0)
    }
}

/// Hook run once when a placement starts showing
pub type ShowCallback = Box<dyn FnOnce(&mut PlacementReticle) + Send + Sync>;

/// UI panel that was minimized while the placement is in flight
pub trait OriginPanel: Send + Sync {
    fn maximize(&mut self);
}

/// Hooks attached to one placement session
#[derive(Default)]
pub struct Callbacks {
    /// Receives the live reticle right after it is shown; clearing
    /// `in_flight` from here resolves the session immediately
    pub show: Option<ShowCallback>,
    /// Restored when the session ends
    pub origin_panel: Option<Box<dyn OriginPanel>>,
}

impl Callbacks {
    pub fn on_show(show: impl FnOnce(&mut PlacementReticle) + Send + Sync + 'static) -> Self {
        Self {
            show: Some(Box::new(show)),
            origin_panel: None,
        }
    }

    pub fn with_origin_panel(mut self, panel: impl OriginPanel + 'static) -> Self {
        self.origin_panel = Some(Box::new(panel));
        self
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("show", &self.show.is_some())
            .field("origin_panel", &self.origin_panel.is_some())
            .finish()
    }
}

pub struct PlacementReticle {
    id: ReticleId,
    config: PlacementConfig,
    state: PlacementState,
    grid: Arc<dyn GridMetrics>,
    surface: Box<dyn RenderSurface>,
    texture: Option<TextureHandle>,
    icon_image: Option<TextureHandle>,
    border_color: Color,
    hovered: bool,
    geometry: TemplateGeometry,
}

impl PlacementReticle {
    pub fn new(
        config: PlacementConfig,
        grid: Arc<dyn GridMetrics>,
        surface: Box<dyn RenderSurface>,
    ) -> Result<Self, ReticleError> {
        let config = config.validate()?;
        let distance = scene_distance(config.size, grid.distance());
        let state = PlacementState::new(config.origin(), distance, config.size);
        let geometry = TemplateGeometry::compute(
            config.shape,
            state.position,
            state.direction,
            state.distance,
            grid.as_ref(),
        );

        Ok(Self {
            id: ReticleId::next(),
            config,
            state,
            grid,
            surface,
            texture: None,
            icon_image: None,
            border_color: BORDER_COLOR,
            hovered: false,
            geometry,
        })
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn id(&self) -> ReticleId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.config.tag
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn direction(&self) -> f32 {
        self.state.direction
    }

    pub fn distance(&self) -> f32 {
        self.state.distance
    }

    pub fn width(&self) -> f32 {
        self.state.width
    }

    pub fn destination(&self) -> Option<Vec2> {
        self.state.destination
    }

    pub fn cancelled(&self) -> bool {
        self.state.cancelled
    }

    pub fn in_flight(&self) -> bool {
        self.state.in_flight
    }

    /// Clearing the flag asks the owning canvas to end the session
    pub fn set_in_flight(&mut self, in_flight: bool) {
        self.state.in_flight = in_flight;
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.state.cancelled = cancelled;
    }

    pub fn grid(&self) -> &dyn GridMetrics {
        self.grid.as_ref()
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    pub fn icon_image(&self) -> Option<&TextureHandle> {
        self.icon_image.as_ref()
    }

    pub fn geometry(&self) -> &TemplateGeometry {
        &self.geometry
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Snap a raw pointer point with this placement's interval
    pub fn snap(&self, raw: Vec2) -> Vec2 {
        snap_point(
            self.grid.as_ref(),
            raw,
            self.config.interval.subdivisions(),
            self.config.interval.centers_on_square(),
        )
    }

    /// Snap a raw pointer point at confirm granularity (two subdivisions)
    pub fn snap_destination(&self, raw: Vec2) -> Vec2 {
        snap_point(
            self.grid.as_ref(),
            raw,
            2,
            self.config.interval.centers_on_square(),
        )
    }

    /// Load the configured texture and icon, then render the first frame
    pub fn draw(&mut self, textures: &dyn TextureLoader) {
        self.texture = match self.config.texture.as_deref() {
            Some(path) => load_texture(textures, path),
            None => None,
        };
        self.icon_image = if self.config.draw_icon {
            load_texture(textures, &self.config.icon)
        } else {
            None
        };
        self.refresh();
    }

    /// Recompute geometry from the current state and redraw
    pub fn refresh(&mut self) {
        self.geometry = TemplateGeometry::compute(
            self.config.shape,
            self.state.position,
            self.state.direction,
            self.state.distance,
            self.grid.as_ref(),
        );

        let view = ReticleView {
            position: self.state.position,
            direction: self.state.direction,
            geometry: &self.geometry,
            texture: self.texture.as_ref(),
            border_color: self.border_color,
            draw_outline: self.config.draw_outline,
            draw_icon: self.config.draw_icon,
            hovered: self.hovered,
            icon: &self.config.icon,
            icon_image: self.icon_image.as_ref(),
            label: &self.config.label,
            label_offset: self.config.label_offset.into(),
            cell_size: self.grid.size(),
        };
        render_reticle(self.surface.as_mut(), &view);
    }

    pub(crate) fn state_mut(&mut self) -> &mut PlacementState {
        &mut self.state
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Remove the reticle from display
    pub(crate) fn detach(&mut self) {
        self.surface.detach();
    }
}

impl fmt::Debug for PlacementReticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacementReticle")
            .field("id", &self.id)
            .field("tag", &self.config.tag)
            .field("state", &self.state)
            .field("texture", &self.texture)
            .finish_non_exhaustive()
    }
}
