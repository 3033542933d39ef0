//! Host-agnostic input events and listener bookkeeping

use crate::placement::reticle::ReticleId;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Modifier keys held while the wheel turned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Resize instead of rotating
    pub shift: bool,
    /// Rotate by the grid's coarse step
    pub ctrl: bool,
}

/// Pointer input in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove { position: Vec2 },
    PointerDown { position: Vec2, button: PointerButton },
    ContextMenu { position: Vec2 },
    /// Positive `delta_y` scrolls down / away from the user
    Wheel { delta_y: f32, modifiers: Modifiers },
}

impl InputEvent {
    pub fn listener_kind(&self) -> ListenerKind {
        match self {
            InputEvent::PointerMove { .. } => ListenerKind::Move,
            InputEvent::PointerDown { .. } => ListenerKind::PointerDown,
            InputEvent::ContextMenu { .. } => ListenerKind::ContextMenu,
            InputEvent::Wheel { .. } => ListenerKind::Wheel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Move,
    PointerDown,
    ContextMenu,
    Wheel,
}

impl ListenerKind {
    pub const ALL: [ListenerKind; 4] = [
        ListenerKind::Move,
        ListenerKind::PointerDown,
        ListenerKind::ContextMenu,
        ListenerKind::Wheel,
    ];
}

/// Listener registrations on the shared input surface
///
/// Attaching twice for the same reticle registers its handlers twice; callers
/// must not start two sessions on one reticle.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    registrations: Vec<(ReticleId, ListenerKind)>,
}

impl ListenerRegistry {
    pub fn attach_all(&mut self, owner: ReticleId) {
        for kind in ListenerKind::ALL {
            self.registrations.push((owner, kind));
        }
        debug!("Attached placement listeners for {owner}");
    }

    pub fn detach_all(&mut self, owner: ReticleId) {
        self.registrations.retain(|(id, _)| *id != owner);
        debug!("Detached placement listeners for {owner}");
    }

    /// Owners listening for `kind`, in registration order
    pub fn owners(&self, kind: ListenerKind) -> Vec<ReticleId> {
        self.registrations
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn is_attached(&self, owner: ReticleId) -> bool {
        self.registrations.iter().any(|(id, _)| *id == owner)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
