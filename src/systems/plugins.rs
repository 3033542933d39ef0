//! Plugin management and configuration
//!
//! Groups the placement systems into plugins and configures Bevy's default
//! plugins (window, logging, gizmos) for the application.

use crate::core::settings::{AppSettings, DEFAULT_WINDOW_SIZE, WINDOW_TITLE};
use crate::rendering::gizmos::{
    draw_reticle_frames, sync_reticle_entities, AssetTextureLoader, GizmoFrames,
};
use crate::rendering::reticle::BORDER_THICKNESS;
use crate::session::PlacementCanvas;
use crate::systems::placement::{
    draw_scene_grid, exit_on_esc, report_placement, spawn_camera, start_placement,
};
use crate::systems::pointer_input::forward_pointer_input;
use bevy::asset::AssetPlugin;
use bevy::gizmos::config::{DefaultGizmoConfigGroup, GizmoConfigStore};
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Configure logging with quieter output for release builds
pub fn configure_logging() -> LogPlugin {
    #[cfg(debug_assertions)]
    {
        LogPlugin {
            level: Level::DEBUG,
            filter: "crosshairs=debug,bevy_render=warn,bevy_winit=warn,wgpu=warn,winit=warn,bevy_ecs::error::handler=error".to_string(),
            ..default()
        }
    }

    #[cfg(not(debug_assertions))]
    {
        LogPlugin {
            level: Level::WARN,
            filter: "crosshairs=info,bevy=warn,wgpu=error,winit=error,bevy_ecs::error::handler=error".to_string(),
            ..default()
        }
    }
}

/// Configure default Bevy plugins for the application
///
/// Assets are read from `assets_dir`.
pub fn configure_default_plugins(assets_dir: &Path) -> bevy::app::PluginGroupBuilder {
    DefaultPlugins
        .set(AssetPlugin {
            file_path: assets_dir.to_string_lossy().into_owned(),
            ..default()
        })
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                resolution: DEFAULT_WINDOW_SIZE.into(),
                ..default()
            }),
            ..default()
        })
        .set(configure_logging())
}

/// System to configure gizmo appearance
fn configure_gizmos(mut gizmo_store: ResMut<GizmoConfigStore>) {
    let (config, _) = gizmo_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = BORDER_THICKNESS;
    debug!("Configured gizmo line width to {}px", BORDER_THICKNESS);
}

/// Build the canvas from [`AppSettings`], loading textures through the asset server
fn init_placement_canvas(
    mut commands: Commands,
    settings: Option<Res<AppSettings>>,
    asset_server: Res<AssetServer>,
) {
    let settings = settings.map(|s| s.clone()).unwrap_or_default();
    info!(
        "Placement canvas using {:?} grid, assets from {}",
        settings.grid.grid_type,
        settings.assets_dir.display()
    );
    let textures = AssetTextureLoader::new(asset_server.clone(), settings.assets_dir);
    commands.insert_resource(PlacementCanvas::new(
        settings.grid.metrics(),
        Arc::new(textures),
    ));
}

/// Placement reticle rendering and input
///
/// Inserts a [`PlacementCanvas`] built from [`AppSettings`] before startup
/// unless the host already provided one.
pub struct ReticlePlugin;

impl Plugin for ReticlePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GizmoFrames>()
            .add_systems(
                PreStartup,
                init_placement_canvas.run_if(not(resource_exists::<PlacementCanvas>)),
            )
            .add_systems(Startup, configure_gizmos)
            .add_systems(
                PreUpdate,
                forward_pointer_input.run_if(resource_exists::<PlacementCanvas>),
            )
            .add_systems(Update, (draw_reticle_frames, sync_reticle_entities));
    }
}

/// Demo scene: camera, grid and one placement session driven by [`AppSettings`]
pub struct PlacementScenePlugin;

impl Plugin for PlacementScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ReticlePlugin)
            .add_systems(Startup, (spawn_camera, start_placement).chain())
            .add_systems(Update, (draw_scene_grid, report_placement, exit_on_esc));
    }
}
