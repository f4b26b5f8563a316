// ./src/main.rs
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_egui::EguiPlugin;
use std::env;

// Eigene Module deklarieren
pub mod config;
pub mod debug;
pub mod math;
pub mod setup; // Kamera und Feld-Mesh
pub mod viewer;

use config::{ConfigError, LaunchOptions};
use debug::export::{SvgExportTarget, export_svg_system};
use viewer::{IsolineViewerPlugin, resources::FieldSimulation};

fn main() -> Result<(), ConfigError> {
    let options = LaunchOptions::from_args(env::args().skip(1))?;
    let settings = options.load_settings()?;

    // Headless: ein Frame abtasten, als SVG schreiben, beenden
    if let Some(path) = options.export_svg {
        App::new()
            .add_plugins(MinimalPlugins)
            .add_plugins(bevy::log::LogPlugin::default())
            .insert_resource(settings)
            .insert_resource(SvgExportTarget(path))
            .add_systems(Startup, export_svg_system)
            .run();
        return Ok(());
    }

    let simulation = FieldSimulation::from_settings(&settings)?;
    let window_width = settings.render_scale * 2.0;
    let window_height = settings.render_scale * 2.0;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Metaball-Isolinien".into(),
                resolution: WindowResolution::new(window_width, window_height),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .insert_resource(settings)
        .insert_resource(simulation)
        .add_plugins(IsolineViewerPlugin)
        .run();
    Ok(())
}
