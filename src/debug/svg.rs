// src/debug/svg.rs

use crate::math::{
    algorithms::IsolineSet,
    grid::Grid,
    sampling::FieldValues,
    types::{Bounds2D, Point2D, Rgb},
};
use bevy::log::info;
use std::path::Path;
use svg::Document;
use svg::node::element::{Group, Line, Rectangle};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not write SVG: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Math(#[from] crate::math::MathError),
}

/// Darstellungsoptionen für den SVG-Export.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Breite der Ausgabe in Pixeln; die Höhe folgt dem Seitenverhältnis der Domäne.
    pub pixel_width: f32,
    pub stroke_width: f32,
    pub line_color: Rgb,
    /// Zellen mit der gemittelten Eckfarbe füllen.
    pub show_fill: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            pixel_width: 800.0,
            stroke_width: 1.0,
            line_color: Rgb::new(0.1, 0.1, 0.1),
            show_fill: true,
        }
    }
}

/// Bildet Punkte der Domäne auf SVG-Pixel ab (y nach unten).
struct Viewport {
    domain: Bounds2D,
    width: f32,
    height: f32,
}

impl Viewport {
    fn new(domain: Bounds2D, pixel_width: f32) -> Self {
        let width = pixel_width.max(1.0);
        let height = width * domain.height() / domain.width();
        Self {
            domain,
            width,
            height,
        }
    }

    fn map(&self, p: Point2D) -> (f32, f32) {
        (
            (p.x - self.domain.min.x) / self.domain.width() * self.width,
            (self.domain.max.y - p.y) / self.domain.height() * self.height,
        )
    }
}

fn css_color(color: Rgb) -> String {
    let c = (color.clamp(Rgb::ZERO, Rgb::ONE) * 255.0).round();
    format!("rgb({},{},{})", c.x as u8, c.y as u8, c.z as u8)
}

/// Baut das SVG-Dokument: optional gefüllte Zellen, darüber alle Isolinien-Segmente.
pub fn build_isolines_document(
    grid: &Grid,
    values: &FieldValues,
    isolines: &[IsolineSet],
    options: &SvgOptions,
) -> Document {
    let viewport = Viewport::new(Bounds2D::NORMALIZED_DOMAIN, options.pixel_width);
    let mut document = Document::new()
        .set("width", viewport.width)
        .set("height", viewport.height)
        .set("viewBox", (0.0, 0.0, viewport.width, viewport.height));

    if options.show_fill && values.len() == grid.point_count() {
        let colors = values.colors();
        let mut cells = Group::new().set("class", "field").set("stroke", "none");
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let corners = grid.cell_corners(row, col);
                let color = corners.iter().map(|&i| colors[i]).sum::<Rgb>() / 4.0;
                let [top_left, _, bottom_right, _] = corners.map(|i| viewport.map(grid.point(i)));
                cells = cells.add(
                    Rectangle::new()
                        .set("x", top_left.0)
                        .set("y", top_left.1)
                        .set("width", bottom_right.0 - top_left.0)
                        .set("height", bottom_right.1 - top_left.1)
                        .set("fill", css_color(color)),
                );
            }
        }
        document = document.add(cells);
    }

    for isoline in isolines {
        let mut group = Group::new()
            .set("class", "isoline")
            .set("data-level", isoline.level)
            .set("stroke", css_color(options.line_color))
            .set("stroke-width", options.stroke_width)
            .set("fill", "none");
        for (start, end) in isoline.segments() {
            let (x1, y1) = viewport.map(start);
            let (x2, y2) = viewport.map(end);
            group = group.add(
                Line::new()
                    .set("x1", x1)
                    .set("y1", y1)
                    .set("x2", x2)
                    .set("y2", y2),
            );
        }
        document = document.add(group);
    }

    document
}

/// Schreibt Feld und Isolinien als SVG-Datei.
pub fn write_isolines_svg(
    path: &Path,
    grid: &Grid,
    values: &FieldValues,
    isolines: &[IsolineSet],
    options: &SvgOptions,
) -> Result<(), ExportError> {
    let document = build_isolines_document(grid, values, isolines, options);
    svg::save(path, &document)?;
    info!("Isoline SVG '{}' wurde erstellt.", path.display());
    Ok(())
}
