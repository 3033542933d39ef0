//! Demo scene lifecycle
//!
//! Spawns the camera, starts one placement from [`AppSettings`] and exits the
//! application once the placement resolves.

use crate::core::settings::AppSettings;
use crate::geometry::grid::GridType;
use crate::placement::{Callbacks, PlacementReticle};
use crate::rendering::gizmos::GizmoFrames;
use crate::session::{PlacementCanvas, PlacementHandle};
use bevy::math::Isometry2d;
use bevy::prelude::*;
use serde::Serialize;

const GRID_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.12);

/// The placement started at startup, awaiting resolution
#[derive(Resource, Debug)]
pub struct PendingPlacement(pub PlacementHandle);

/// Outcome printed to stdout when a placement resolves
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementReport {
    pub tag: String,
    pub cancelled: bool,
    pub x: f32,
    pub y: f32,
    pub direction: f32,
    pub distance: f32,
    pub width: f32,
    pub destination: Option<[f32; 2]>,
}

impl From<&PlacementReticle> for PlacementReport {
    fn from(reticle: &PlacementReticle) -> Self {
        Self {
            tag: reticle.tag().to_string(),
            cancelled: reticle.cancelled(),
            x: reticle.position().x,
            y: reticle.position().y,
            direction: reticle.direction(),
            distance: reticle.distance(),
            width: reticle.width(),
            destination: reticle.destination().map(|d| d.to_array()),
        }
    }
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Start the placement configured on the command line
pub fn start_placement(
    mut commands: Commands,
    settings: Res<AppSettings>,
    mut frames: ResMut<GizmoFrames>,
    mut canvas: ResMut<PlacementCanvas>,
    mut exit: EventWriter<AppExit>,
) {
    let surface = frames.create_surface();
    let reticle = match PlacementReticle::new(
        settings.placement.clone(),
        canvas.grid(),
        Box::new(surface),
    ) {
        Ok(reticle) => reticle,
        Err(e) => {
            error!("Cannot start placement: {}", e);
            exit.write(AppExit::error());
            return;
        }
    };

    let handle = canvas.start_session(reticle, Callbacks::default());
    commands.insert_resource(PendingPlacement(handle));
}

/// Print the outcome and exit once the pending placement resolves
pub fn report_placement(
    pending: Option<ResMut<PendingPlacement>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(mut pending) = pending else {
        return;
    };

    match pending.0.try_result() {
        Ok(None) => {}
        Ok(Some(reticle)) => {
            let report = PlacementReport::from(&reticle);
            if report.cancelled {
                info!("Placement '{}' cancelled", report.tag);
            } else {
                info!(
                    "Placement '{}' confirmed at ({}, {}) facing {}°",
                    report.tag, report.x, report.y, report.direction
                );
            }
            match serde_json::to_string(&report) {
                Ok(json) => println!("{json}"),
                Err(e) => error!("Failed to serialize placement report: {}", e),
            }
            exit.write(AppExit::Success);
        }
        Err(e) => {
            error!("Placement '{}' ended without a result: {}", pending.0.tag(), e);
            exit.write(AppExit::error());
        }
    }
}

/// Draw the square grid under the reticle
pub fn draw_scene_grid(
    settings: Res<AppSettings>,
    windows: Query<&Window>,
    mut gizmos: Gizmos,
) {
    if settings.grid.grid_type != GridType::Square {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };

    let cell = settings.grid.size;
    // Even counts keep grid lines on multiples of the cell size
    let cells = |extent: f32| ((extent / cell / 2.0).ceil() as u32 + 1) * 2;
    gizmos.grid_2d(
        Isometry2d::IDENTITY,
        UVec2::new(cells(window.width()), cells(window.height())),
        Vec2::splat(cell),
        GRID_COLOR,
    );
}

pub fn exit_on_esc(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::grid::SquareGrid;
    use crate::placement::PlacementConfig;
    use crate::rendering::surface::testing::RecordingSurface;
    use std::sync::Arc;

    #[test]
    fn test_report_from_unresolved_reticle() {
        let reticle = PlacementReticle::new(
            PlacementConfig {
                x: 150.0,
                y: 50.0,
                size: 2.0,
                tag: "fireball".to_string(),
                ..default()
            },
            Arc::new(SquareGrid::new(100.0, 5.0)),
            Box::new(RecordingSurface::default()),
        )
        .expect("valid config");

        let report = PlacementReport::from(&reticle);
        assert_eq!(report.tag, "fireball");
        assert!(report.cancelled);
        assert_eq!((report.x, report.y), (150.0, 50.0));
        assert_eq!(report.distance, 5.0);
        assert_eq!(report.destination, None);

        let json = serde_json::to_value(&report).expect("serializable");
        assert_eq!(json["tag"], "fireball");
        assert!(json["destination"].is_null());
    }
}
