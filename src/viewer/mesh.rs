// src/viewer/mesh.rs

use crate::math::{grid::Grid, types::Rgb};
use bevy::prelude::*;
use bevy::render::{
    mesh::{Indices, PrimitiveTopology},
    render_asset::RenderAssetUsages,
};

/// Marker für die Entität, die das gefüllte, eingefärbte Gitter trägt.
#[derive(Component, Debug, Default)]
pub struct FieldMesh;

fn vertex_colors(colors: &[Rgb]) -> Vec<[f32; 4]> {
    colors.iter().map(|c| [c.x, c.y, c.z, 1.0]).collect()
}

/// Baut ein Dreiecksnetz aus Gitterpunkten (z = 0) mit Vertexfarben.
pub fn build_grid_mesh(grid: &Grid, colors: &[Rgb]) -> Mesh {
    let positions: Vec<[f32; 3]> = grid.points().iter().map(|p| [p.x, p.y, 0.0]).collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, vertex_colors(colors))
    .with_inserted_indices(Indices::U32(grid.triangle_indices().to_vec()))
}

/// Ersetzt nur die Vertexfarben; Positionen und Indizes bleiben bestehen.
pub fn update_mesh_colors(mesh: &mut Mesh, colors: &[Rgb]) {
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, vertex_colors(colors));
}
