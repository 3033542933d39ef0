//! Application initialization and configuration

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::core::settings::AppSettings;
use crate::systems::{configure_default_plugins, PlacementScenePlugin};
use anyhow::Result;
use bevy::prelude::*;
use bevy::winit::WinitSettings;

const BACKGROUND_COLOR: Color = Color::srgb(0.09, 0.1, 0.12);

/// Creates a fully configured Bevy application running one placement
pub fn create_app(cli_args: CliArgs) -> Result<App> {
    cli_args
        .validate()
        .map_err(|e| anyhow::anyhow!("CLI validation failed: {}", e))?;

    let config_file = ConfigFile::load();
    let settings = cli_args.resolve_settings(config_file.as_ref());

    let mut app = App::new();
    app.add_plugins(configure_default_plugins(&settings.assets_dir));
    configure_resources(&mut app, settings, cli_args);
    app.add_plugins(PlacementScenePlugin);
    Ok(app)
}

/// Sets up application resources and configuration
fn configure_resources(app: &mut App, settings: AppSettings, cli_args: CliArgs) {
    app.insert_resource(settings)
        .insert_resource(cli_args)
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        // Pointer motion must reach the reticle even while the window is unfocused
        .insert_resource(WinitSettings {
            focused_mode: bevy::winit::UpdateMode::Continuous,
            unfocused_mode: bevy::winit::UpdateMode::Continuous,
        });
}
