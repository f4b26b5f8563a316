// src/viewer/mod.rs

pub mod mesh;
pub mod resources;
pub mod state;
pub mod systems;
pub mod ui;

use bevy::prelude::*;
use resources::SingleStepRequest;
use state::PlaybackState;
use systems::*;
use ui::isoline_control_ui_system;

/// Verdrahtet Ressourcen, Zustände und Systeme des interaktiven Viewers.
/// Erwartet `IsolineSettings` und `FieldSimulation` als bereits eingefügte Ressourcen.
pub struct IsolineViewerPlugin;

impl Plugin for IsolineViewerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SingleStepRequest>()
            .init_state::<PlaybackState>()
            .add_systems(Startup, (crate::setup::setup_scene, apply_initial_playback_system))
            .add_systems(
                Update,
                (
                    // Block 1: UI und Einstellungen
                    isoline_control_ui_system,
                    apply_settings_system,
                    // Block 2: Feld vorrücken, abtasten, extrahieren
                    advance_field_system,
                    refresh_isolines_system,
                    // Block 3: Ausgabe an den Renderer
                    update_field_mesh_system,
                    draw_isolines_system,
                )
                    .chain(),
            );
    }
}
