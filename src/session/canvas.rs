//! Placement canvas
//!
//! Owns everything placement sessions share: the active display layer, the
//! preview list of in-flight reticles and the listener registrations on the
//! input surface. Hosts feed it input with [`PlacementCanvas::dispatch`].

use super::controller::{LayerId, SessionController, Transition, MOVE_THROTTLE};
use super::handle::PlacementHandle;
use super::input::{InputEvent, ListenerRegistry};
use crate::geometry::grid::GridMetrics;
use crate::placement::reticle::{Callbacks, PlacementReticle, ReticleId};
use crate::rendering::surface::TextureLoader;
use bevy::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

/// An in-flight reticle and the controller driving it
struct ActivePlacement {
    reticle: PlacementReticle,
    controller: SessionController,
}

#[derive(Resource)]
pub struct PlacementCanvas {
    grid: Arc<dyn GridMetrics>,
    textures: Arc<dyn TextureLoader>,
    active_layer: LayerId,
    previews: Vec<ActivePlacement>,
    listeners: ListenerRegistry,
    throttle: Duration,
}

impl PlacementCanvas {
    pub fn new(grid: Arc<dyn GridMetrics>, textures: Arc<dyn TextureLoader>) -> Self {
        Self {
            grid,
            textures,
            active_layer: LayerId::from("tokens"),
            previews: Vec::new(),
            listeners: ListenerRegistry::default(),
            throttle: MOVE_THROTTLE,
        }
    }

    pub fn with_active_layer(mut self, layer: impl Into<LayerId>) -> Self {
        self.active_layer = layer.into();
        self
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Grid shared with the reticles created for this canvas
    pub fn grid(&self) -> Arc<dyn GridMetrics> {
        Arc::clone(&self.grid)
    }

    pub fn active_layer(&self) -> &LayerId {
        &self.active_layer
    }

    pub fn activate_layer(&mut self, layer: impl Into<LayerId>) {
        self.active_layer = layer.into();
    }

    pub fn previews(&self) -> impl Iterator<Item = &PlacementReticle> {
        self.previews.iter().map(|p| &p.reticle)
    }

    pub fn preview_count(&self) -> usize {
        self.previews.len()
    }

    /// Find an in-flight placement by its configured tag
    pub fn lookup_by_tag(&self, tag: &str) -> Option<&PlacementReticle> {
        self.previews().find(|reticle| reticle.tag() == tag)
    }

    pub fn lookup_by_tag_mut(&mut self, tag: &str) -> Option<&mut PlacementReticle> {
        self.previews
            .iter_mut()
            .map(|p| &mut p.reticle)
            .find(|reticle| reticle.tag() == tag)
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Show `reticle` and start listening for placement input
    ///
    /// The returned handle resolves once the placement is confirmed, cancelled
    /// or force-resolved by clearing its `in_flight` flag. Starting a reticle
    /// that is already in flight is not supported.
    pub fn start_session(
        &mut self,
        mut reticle: PlacementReticle,
        callbacks: Callbacks,
    ) -> PlacementHandle {
        let (resolver, receiver) = oneshot::channel();
        let handle = PlacementHandle::new(reticle.id(), reticle.tag().to_string(), receiver);

        let initial_layer =
            std::mem::replace(&mut self.active_layer, LayerId::placement());
        reticle.draw(self.textures.as_ref());
        reticle.state_mut().activate();
        self.listeners.attach_all(reticle.id());
        info!(
            "Placement {} ('{}') started on layer '{}'",
            reticle.id(),
            reticle.tag(),
            LayerId::PLACEMENT
        );

        let Callbacks { show, origin_panel } = callbacks;
        self.previews.push(ActivePlacement {
            reticle,
            controller: SessionController::new(
                initial_layer,
                self.throttle,
                origin_panel,
                resolver,
            ),
        });

        if let Some(show) = show {
            if let Some(active) = self.previews.last_mut() {
                show(&mut active.reticle);
            }
        }

        self.sweep_resolved();
        handle
    }

    /// Route one input event to every listening placement
    ///
    /// Returns true when at least one placement consumed the event.
    pub fn dispatch(&mut self, event: InputEvent, now: Instant) -> bool {
        // Placements resolved from outside since the last event must not see it
        self.sweep_resolved();
        let mut consumed = false;

        for owner in self.listeners.owners(event.listener_kind()) {
            let Some(index) = self.index_of(owner) else {
                continue;
            };

            let ActivePlacement { reticle, controller } = &mut self.previews[index];
            if !reticle.state().active_listeners || !reticle.in_flight() {
                continue;
            }
            match controller.handle(reticle, &event, now) {
                Transition::Ignored => {}
                Transition::Continue => consumed = true,
                Transition::Resolve => {
                    consumed = true;
                    self.finish(index);
                }
            }
        }

        self.sweep_resolved();
        consumed
    }

    /// Clean up placements whose `in_flight` flag was cleared from outside
    pub fn sweep_resolved(&mut self) {
        while let Some(index) = self.previews.iter().position(|p| !p.reticle.in_flight()) {
            debug!("Placement {} resolved externally", self.previews[index].reticle.id());
            self.finish(index);
        }
    }

    fn index_of(&self, id: ReticleId) -> Option<usize> {
        self.previews.iter().position(|p| p.reticle.id() == id)
    }

    fn finish(&mut self, index: usize) {
        let ActivePlacement { reticle, controller } = self.previews.remove(index);
        self.listeners.detach_all(reticle.id());

        if self.previews.is_empty() {
            self.active_layer = controller.initial_layer().clone();
            debug!("Restored layer '{}'", self.active_layer.0);
        }

        controller.release(reticle);
    }
}
