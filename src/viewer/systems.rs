// src/viewer/systems.rs

use super::mesh::{FieldMesh, build_grid_mesh, update_mesh_colors};
use super::resources::{FieldSimulation, SingleStepRequest};
use super::state::PlaybackState;
use crate::config::IsolineSettings;
use bevy::log::{error, warn};
use bevy::prelude::*;
use bevy::sprite::Mesh2dHandle;

/// Übernimmt den Pause-Schalter aus den Einstellungen in den Startzustand.
pub fn apply_initial_playback_system(
    settings: Res<IsolineSettings>,
    mut next_state: ResMut<NextState<PlaybackState>>,
) {
    if settings.paused {
        next_state.set(PlaybackState::Paused);
    }
}

/// Übernimmt geänderte Auflösung und Szene aus den Einstellungen.
pub fn apply_settings_system(
    settings: Res<IsolineSettings>,
    mut simulation: ResMut<FieldSimulation>,
) {
    if !settings.is_changed() {
        return;
    }
    if let Err(err) =
        simulation.ensure_scene(settings.scene, &settings.field, settings.movement_scale)
    {
        warn!("Keeping current field: {err}");
    }
    simulation.field.movement_scale = settings.movement_scale;
    if let Err(err) = simulation.ensure_resolution(settings.grid_width, settings.grid_height) {
        warn!("Keeping current grid: {err}");
    }
}

/// Bewegt das Feld um die Frame-Zeit weiter (nur im laufenden Zustand oder per Einzelschritt).
pub fn advance_field_system(
    time: Res<Time>,
    state: Res<State<PlaybackState>>,
    mut step_request: ResMut<SingleStepRequest>,
    mut simulation: ResMut<FieldSimulation>,
) {
    match state.get() {
        PlaybackState::Running => simulation.advance(time.delta_seconds()),
        PlaybackState::Paused if step_request.0 => {
            simulation.advance(1.0 / 60.0);
            step_request.0 = false;
        }
        PlaybackState::Paused => {}
    }
}

/// Tastet das Feld ab und extrahiert die Isolinien des aktuellen Frames.
pub fn refresh_isolines_system(
    settings: Res<IsolineSettings>,
    mut simulation: ResMut<FieldSimulation>,
) {
    if let Err(err) = simulation.refresh(settings.isoline_count, settings.saddle_resolution) {
        error!("Isoline extraction failed: {err}");
    }
}

/// Schreibt die Farben (bzw. nach Gitterwechsel das ganze Netz) in das Mesh-Asset.
pub fn update_field_mesh_system(
    settings: Res<IsolineSettings>,
    mut simulation: ResMut<FieldSimulation>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut query: Query<(&Mesh2dHandle, &mut Visibility), With<FieldMesh>>,
) {
    for (handle, mut visibility) in query.iter_mut() {
        *visibility = if settings.show_fill {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };

        let Some(mesh) = meshes.get_mut(&handle.0) else {
            continue;
        };
        let colors = simulation.values.colors();
        if simulation.grid_changed {
            *mesh = build_grid_mesh(&simulation.grid, &colors);
        } else {
            update_mesh_colors(mesh, &colors);
        }
    }
    simulation.grid_changed = false;
}

/// Zeichnet alle Isolinien-Segmente als Gizmo-Linien.
pub fn draw_isolines_system(
    settings: Res<IsolineSettings>,
    simulation: Res<FieldSimulation>,
    mut gizmos: Gizmos,
) {
    let color = settings.line_color();
    let scale = settings.render_scale;
    for (start, end) in simulation.isolines.segments() {
        gizmos.line_2d(start * scale, end * scale, color);
    }
}
