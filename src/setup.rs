// ./src/setup.rs
use crate::config::IsolineSettings;
use crate::viewer::mesh::{FieldMesh, build_grid_mesh};
use crate::viewer::resources::FieldSimulation;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

pub fn setup_scene(
    mut commands: Commands,
    settings: Res<IsolineSettings>,
    simulation: Res<FieldSimulation>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // Kamera
    commands.spawn(Camera2dBundle::default());

    // Gefülltes Gitter, Farben kommen als Vertex-Attribut
    let mesh = build_grid_mesh(&simulation.grid, &simulation.values.colors());
    commands.spawn((
        MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(mesh)),
            material: materials.add(ColorMaterial::default()),
            // [-1,1]² auf Pixel skalieren, Linien werden mit demselben Faktor gezeichnet
            transform: Transform::from_scale(Vec3::new(
                settings.render_scale,
                settings.render_scale,
                1.0,
            )),
            ..default()
        },
        FieldMesh,
    ));
}
