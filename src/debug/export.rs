// src/debug/export.rs

use super::svg::{ExportError, SvgOptions, write_isolines_svg};
use crate::config::IsolineSettings;
use crate::math::{
    algorithms::IsolineExtractor, grid::Grid, sampling::FieldValues, types::Rgb,
};
use bevy::app::AppExit;
use bevy::log::{error, info};
use bevy::prelude::*;
use std::path::{Path, PathBuf};

/// Ziel des Headless-Exports.
#[derive(Resource, Debug, Clone)]
pub struct SvgExportTarget(pub PathBuf);

/// Kennzahlen eines exportierten Frames.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub levels: usize,
    pub segments: usize,
    pub min: f32,
    pub max: f32,
}

/// Tastet die konfigurierte Szene einmal ab und schreibt Feld und Isolinien als SVG.
pub fn export_snapshot(
    settings: &IsolineSettings,
    path: &Path,
) -> Result<ExportSummary, ExportError> {
    settings.validate()?;

    let field = settings.build_field();
    let grid = Grid::new(settings.grid_width, settings.grid_height)?;
    let values = FieldValues::sample(&grid, &field);
    let isolines = IsolineExtractor::new(&grid, &values)?
        .with_saddle_resolution(settings.saddle_resolution)
        .extract_levels(settings.isoline_count)?;

    let options = SvgOptions {
        line_color: Rgb::from(settings.line_color),
        show_fill: settings.show_fill,
        ..Default::default()
    };
    write_isolines_svg(path, &grid, &values, &isolines, &options)?;

    Ok(ExportSummary {
        levels: isolines.len(),
        segments: isolines.iter().map(|s| s.segment_count()).sum(),
        min: values.min(),
        max: values.max(),
    })
}

/// Startup-System des Headless-Modus: exportiert und beendet die App.
pub fn export_svg_system(
    settings: Res<IsolineSettings>,
    target: Res<SvgExportTarget>,
    mut exit: EventWriter<AppExit>,
) {
    match export_snapshot(&settings, &target.0) {
        Ok(summary) => info!(
            "Exported {} levels ({} segments, field range {:.4}..{:.4}) to {}",
            summary.levels,
            summary.segments,
            summary.min,
            summary.max,
            target.0.display()
        ),
        Err(err) => error!("SVG export failed: {err}"),
    }
    exit.send(AppExit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_snapshot_writes_file() {
        let settings = IsolineSettings {
            grid_width: 40,
            grid_height: 30,
            isoline_count: 3,
            show_fill: false,
            ..Default::default()
        };
        let path = std::env::temp_dir().join("metaball_isolines_export_test.svg");
        let summary = export_snapshot(&settings, &path).unwrap();

        assert_eq!(summary.levels, 3);
        assert!(summary.segments > 0);
        assert!(summary.max > summary.min);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("<line").count(), summary.segments);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_export_rejects_invalid_settings() {
        let settings = IsolineSettings {
            isoline_count: -1,
            ..Default::default()
        };
        let path = std::env::temp_dir().join("metaball_isolines_never_written.svg");
        assert!(matches!(
            export_snapshot(&settings, &path),
            Err(ExportError::Math(_))
        ));
    }
}
