//! Mutable placement state

use bevy::prelude::*;

/// Where a reticle is in its placement lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Constructed, not yet shown
    Idle,
    /// Listeners attached, placement in flight
    Active,
    Confirmed,
    Cancelled,
}

/// State of one placement
///
/// `in_flight` and `active_listeners` rise and fall together, except for the
/// window between external code clearing `in_flight` and the owning canvas
/// noticing it. `cancelled` only means something once `in_flight` is false.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementState {
    pub position: Vec2,
    /// Degrees, not wrapped
    pub direction: f32,
    /// Radius in scene distance units
    pub distance: f32,
    /// Size in half-grid units, finalized on confirm
    pub width: f32,
    /// Snapped confirm location
    pub destination: Option<Vec2>,
    pub in_flight: bool,
    pub cancelled: bool,
    pub active_listeners: bool,
    started: bool,
}

impl PlacementState {
    pub fn new(position: Vec2, distance: f32, width: f32) -> Self {
        Self {
            position,
            direction: 0.0,
            distance,
            width,
            destination: None,
            in_flight: false,
            // A placement counts as cancelled until it is confirmed
            cancelled: true,
            active_listeners: false,
            started: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.in_flight {
            SessionPhase::Active
        } else if !self.started {
            SessionPhase::Idle
        } else if self.cancelled {
            SessionPhase::Cancelled
        } else {
            SessionPhase::Confirmed
        }
    }

    pub(crate) fn activate(&mut self) {
        self.started = true;
        self.in_flight = true;
        self.active_listeners = true;
    }

    pub(crate) fn release(&mut self) {
        self.active_listeners = false;
        self.in_flight = false;
    }
}
