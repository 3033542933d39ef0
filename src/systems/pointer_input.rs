//! Pointer input forwarding
//!
//! Converts Bevy window input into [`InputEvent`]s in world coordinates and
//! dispatches them to the [`PlacementCanvas`].

use crate::session::{InputEvent, Modifiers, PlacementCanvas, PointerButton};
use bevy::input::mouse::{MouseButtonInput, MouseScrollUnit, MouseWheel};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::CursorMoved;
use std::time::Instant;

/// Pixels per wheel line, matching browser line-mode scrolling
const PIXELS_PER_LINE: f32 = 100.0;

/// Map a Bevy mouse button to a placement input event
pub fn button_event(button: MouseButton, position: Vec2) -> Option<InputEvent> {
    match button {
        MouseButton::Left => Some(InputEvent::PointerDown {
            position,
            button: PointerButton::Primary,
        }),
        MouseButton::Middle => Some(InputEvent::PointerDown {
            position,
            button: PointerButton::Middle,
        }),
        MouseButton::Right => Some(InputEvent::ContextMenu { position }),
        _ => None,
    }
}

/// Convert a Bevy wheel event to a DOM-style delta (positive scrolls down)
pub fn wheel_delta(wheel: &MouseWheel) -> f32 {
    let delta = match wheel.unit {
        MouseScrollUnit::Line => wheel.y * PIXELS_PER_LINE,
        MouseScrollUnit::Pixel => wheel.y,
    };
    -delta
}

/// Forward this frame's pointer input to the placement canvas
#[allow(clippy::too_many_arguments)]
pub fn forward_pointer_input(
    mut canvas: ResMut<PlacementCanvas>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut button_events: EventReader<MouseButtonInput>,
    mut wheel_events: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let now = Instant::now();

    for moved in cursor_moved.read() {
        let Ok(world_position) = camera.viewport_to_world_2d(camera_transform, moved.position)
        else {
            continue;
        };
        canvas.dispatch(
            InputEvent::PointerMove {
                position: world_position,
            },
            now,
        );
    }

    let cursor_world = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position())
        .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok());

    for event in button_events.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        let Some(position) = cursor_world else {
            continue;
        };
        if let Some(input) = button_event(event.button, position) {
            canvas.dispatch(input, now);
        }
    }

    let modifiers = Modifiers {
        shift: keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        ctrl: keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]),
    };
    for wheel in wheel_events.read() {
        canvas.dispatch(
            InputEvent::Wheel {
                delta_y: wheel_delta(wheel),
                modifiers,
            },
            now,
        );
    }

    canvas.sweep_resolved();
}
