// src/viewer/resources.rs

use crate::config::{FieldParameters, IsolineSettings, SceneKind};
use crate::math::{
    algorithms::{IsolineBatch, IsolineExtractor, MetaballField, SaddleResolution},
    error::MathResult,
    grid::Grid,
    sampling::FieldValues,
    scalar_field::ScalarField2D,
};
use bevy::log::info;
use bevy::prelude::*;

/// Anfrage aus der UI, im pausierten Zustand genau einen Schritt auszuführen.
#[derive(Resource, Debug, Default, PartialEq, Eq)]
pub struct SingleStepRequest(pub bool);

/// Kompletter CPU-Zustand eines Frames: Feld, Gitter, Abtastung und Isolinien.
#[derive(Resource, Debug)]
pub struct FieldSimulation {
    pub field: MetaballField,
    pub scene: SceneKind,
    pub parameters: FieldParameters,
    pub grid: Grid,
    pub values: FieldValues,
    pub isolines: IsolineBatch,
    /// Wird gesetzt, wenn ein neues Gitter erzeugt wurde und das Mesh neu gebaut werden muss.
    pub grid_changed: bool,
}

impl FieldSimulation {
    pub fn from_settings(settings: &IsolineSettings) -> MathResult<Self> {
        settings.validate()?;
        let field = settings.build_field();
        let grid = Grid::new(settings.grid_width, settings.grid_height)?;
        let values = FieldValues::sample(&grid, &field);

        let mut simulation = Self {
            field,
            scene: settings.scene,
            parameters: settings.field,
            grid,
            values,
            isolines: IsolineBatch::default(),
            grid_changed: true,
        };
        simulation.refresh(settings.isoline_count, settings.saddle_resolution)?;
        Ok(simulation)
    }

    /// Baut ein neues Gitter, falls sich die Auflösung geändert hat.
    /// Gitter und Feldwerte werden dabei komplett ersetzt.
    pub fn ensure_resolution(&mut self, width: usize, height: usize) -> MathResult<bool> {
        if self.grid.width() == width && self.grid.height() == height {
            return Ok(false);
        }
        let grid = Grid::new(width, height)?;
        info!(
            "Rebuilding grid {}x{} -> {}x{}",
            self.grid.width(),
            self.grid.height(),
            width,
            height
        );
        self.values = FieldValues::sample(&grid, &self.field);
        self.grid = grid;
        self.grid_changed = true;
        Ok(true)
    }

    /// Ersetzt das Feld, wenn sich Szene oder Feldparameter geändert haben.
    /// Die Bälle starten dabei wieder an ihren Ausgangspositionen.
    pub fn ensure_scene(
        &mut self,
        scene: SceneKind,
        parameters: &FieldParameters,
        movement_scale: f32,
    ) -> MathResult<bool> {
        if self.scene == scene && self.parameters == *parameters {
            return Ok(false);
        }
        parameters.validate()?;
        info!(
            "Rebuilding field: scene {:?} -> {:?}, falloff {:?} -> {:?}",
            self.scene, scene, self.parameters.falloff, parameters.falloff
        );
        self.field = scene.build_field(parameters, movement_scale);
        self.scene = scene;
        self.parameters = *parameters;
        Ok(true)
    }

    pub fn advance(&mut self, dt: f32) {
        self.field.advance(dt);
    }

    /// Tastet das Feld neu ab und extrahiert alle Isolinien des Frames.
    pub fn refresh(&mut self, isoline_count: i32, saddle: SaddleResolution) -> MathResult<()> {
        self.values = FieldValues::sample(&self.grid, &self.field);
        let sets = IsolineExtractor::new(&self.grid, &self.values)?
            .with_saddle_resolution(saddle)
            .extract_levels(isoline_count)?;
        self.isolines = IsolineBatch::from_sets(&sets);
        Ok(())
    }
}
