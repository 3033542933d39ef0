//! Input session controller
//!
//! Translates input events into reticle state changes for one in-flight
//! placement. Structural cleanup (listeners, preview list, layers) belongs to
//! the owning [`super::canvas::PlacementCanvas`].

use super::input::{InputEvent, Modifiers, PointerButton};
use crate::geometry::template::width_from_distance;
use crate::geometry::utilities::{is_within, wheel_sign};
use crate::placement::reticle::{OriginPanel, PlacementReticle};
use crate::rendering::reticle::control_icon_size;
use bevy::prelude::*;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

/// Minimum time between two processed pointer moves
pub const MOVE_THROTTLE: Duration = Duration::from_millis(20);

/// Fine rotation step in degrees
pub const FINE_ROTATION: f32 = 5.0;

/// Coarse rotation step on square and gridless scenes, in degrees
pub const SQUARE_ROTATION: f32 = 15.0;

/// Coarse rotation step on hex grids, in degrees
pub const HEX_ROTATION: f32 = 30.0;

/// Name of a display layer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub String);

impl LayerId {
    pub const PLACEMENT: &'static str = "templates";

    pub fn placement() -> Self {
        LayerId(Self::PLACEMENT.to_string())
    }
}

impl From<&str> for LayerId {
    fn from(name: &str) -> Self {
        LayerId(name.to_string())
    }
}

/// What the canvas should do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The event does not concern placements
    Ignored,
    Continue,
    Resolve,
}

/// Per-session bookkeeping for one active reticle
pub struct SessionController {
    initial_layer: LayerId,
    throttle: Duration,
    last_move: Option<Instant>,
    origin_panel: Option<Box<dyn OriginPanel>>,
    resolver: Option<oneshot::Sender<PlacementReticle>>,
}

impl SessionController {
    pub fn new(
        initial_layer: LayerId,
        throttle: Duration,
        origin_panel: Option<Box<dyn OriginPanel>>,
        resolver: oneshot::Sender<PlacementReticle>,
    ) -> Self {
        Self {
            initial_layer,
            throttle,
            last_move: None,
            origin_panel,
            resolver: Some(resolver),
        }
    }

    /// Layer that was active before this session switched to the placement layer
    pub fn initial_layer(&self) -> &LayerId {
        &self.initial_layer
    }

    pub fn handle(
        &mut self,
        reticle: &mut PlacementReticle,
        event: &InputEvent,
        now: Instant,
    ) -> Transition {
        match *event {
            InputEvent::PointerMove { position } => {
                self.on_pointer_move(reticle, position, now);
                Transition::Continue
            }
            InputEvent::PointerDown {
                position,
                button: PointerButton::Primary,
            } => {
                self.on_confirm(reticle, position);
                Transition::Resolve
            }
            InputEvent::PointerDown { .. } => Transition::Ignored,
            InputEvent::ContextMenu { .. } => {
                reticle.state_mut().cancelled = true;
                info!("Placement {} cancelled", reticle.id());
                Transition::Resolve
            }
            InputEvent::Wheel { delta_y, modifiers } => {
                self.on_wheel(reticle, delta_y, modifiers);
                Transition::Continue
            }
        }
    }

    fn on_pointer_move(&mut self, reticle: &mut PlacementReticle, raw: Vec2, now: Instant) {
        if let Some(last) = self.last_move {
            if now.saturating_duration_since(last) <= self.throttle {
                return;
            }
        }

        let snapped = reticle.snap(raw);
        let icon_radius = control_icon_size(reticle.grid().size()) / 2.0;
        reticle.state_mut().position = snapped;
        reticle.set_hovered(is_within(raw, snapped, icon_radius));
        reticle.refresh();
        self.last_move = Some(now);
    }

    fn on_confirm(&mut self, reticle: &mut PlacementReticle, raw: Vec2) {
        let destination = reticle.snap_destination(raw);
        let grid_distance = reticle.grid().distance();
        let state = reticle.state_mut();
        state.width = width_from_distance(state.distance, grid_distance);
        state.destination = Some(destination);
        state.cancelled = false;
        info!(
            "Placement {} confirmed at ({}, {})",
            reticle.id(),
            destination.x,
            destination.y
        );
    }

    fn on_wheel(&mut self, reticle: &mut PlacementReticle, delta_y: f32, modifiers: Modifiers) {
        let sign = wheel_sign(delta_y);
        let half_unit = reticle.grid().distance() / 2.0;

        if modifiers.shift {
            let state = reticle.state_mut();
            state.distance = (state.distance + half_unit * sign).max(half_unit);
            debug!("New distance: {}", state.distance);
        } else {
            let step = if modifiers.ctrl {
                coarse_rotation_step(reticle)
            } else {
                FINE_ROTATION
            };
            let state = reticle.state_mut();
            state.direction += step * sign;
            debug!("New rotation: {}", state.direction);
        }
        reticle.refresh();
    }

    /// Finish the session: clear the flags, restore the originating panel,
    /// take the reticle off display and hand it to the waiting handle
    pub fn release(mut self, mut reticle: PlacementReticle) {
        if let Some(panel) = self.origin_panel.as_mut() {
            panel.maximize();
        }
        reticle.state_mut().release();
        reticle.detach();

        if let Some(resolver) = self.resolver.take() {
            if resolver.send(reticle).is_err() {
                debug!("Placement handle dropped before resolution");
            }
        }
    }
}

fn coarse_rotation_step(reticle: &PlacementReticle) -> f32 {
    if reticle.grid().grid_type().is_hex() {
        HEX_ROTATION
    } else {
        SQUARE_ROTATION
    }
}
