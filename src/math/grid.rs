// src/math/grid.rs

use crate::math::{
    error::{MathError, MathResult},
    types::{Bounds2D, Point2D},
};

/// Reguläres Abtastgitter über der normalisierten Domäne [-1, 1]².
///
/// Besteht aus `width` x `height` Zellen, also `(width + 1) * (height + 1)`
/// Punkten in Zeilen-Reihenfolge (row-major). Zeile 0 liegt oben (y = +1).
/// Nach der Konstruktion unveränderlich; eine neue Auflösung erzeugt ein neues Gitter.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    points: Vec<Point2D>,
    triangle_indices: Vec<u32>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> MathResult<Self> {
        if width == 0 || height == 0 {
            return Err(MathError::InvalidGridDimensions { width, height });
        }

        let domain = Bounds2D::NORMALIZED_DOMAIN;
        let mut points = Vec::with_capacity((width + 1) * (height + 1));
        for row in 0..=height {
            for col in 0..=width {
                let x = domain.min.x + domain.width() * col as f32 / width as f32;
                let y = domain.max.y - domain.height() * row as f32 / height as f32;
                points.push(Point2D::new(x, y));
            }
        }

        // Zwei Dreiecke pro Zelle, gegen den Uhrzeigersinn (y zeigt nach oben)
        let mut triangle_indices = Vec::with_capacity(width * height * 6);
        for row in 0..height {
            for col in 0..width {
                let [top_left, bottom_left, bottom_right, top_right] =
                    Self::corners_of(width, row, col).map(|i| i as u32);
                triangle_indices.extend_from_slice(&[bottom_left, top_right, top_left]);
                triangle_indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
            }
        }

        Ok(Self {
            width,
            height,
            points,
            triangle_indices,
        })
    }

    /// Breite in Zellen.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Höhe in Zellen.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Point2D {
        self.points[index]
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Dreiecksindizes für die gefüllte Darstellung (3 pro Dreieck, 6 pro Zelle).
    pub fn triangle_indices(&self) -> &[u32] {
        &self.triangle_indices
    }

    #[inline]
    pub fn point_index(&self, row: usize, col: usize) -> usize {
        row * (self.width + 1) + col
    }

    #[inline]
    pub fn point_row(&self, index: usize) -> usize {
        index / (self.width + 1)
    }

    /// Die vier Eckpunkt-Indizes der Zelle (row, col) in fester Reihenfolge:
    /// oben-links, unten-links, unten-rechts, oben-rechts.
    #[inline]
    pub fn cell_corners(&self, row: usize, col: usize) -> [usize; 4] {
        Self::corners_of(self.width, row, col)
    }

    #[inline]
    fn corners_of(width: usize, row: usize, col: usize) -> [usize; 4] {
        let top_left = row * (width + 1) + col;
        let bottom_left = top_left + width + 1;
        [top_left, bottom_left, bottom_left + 1, top_left + 1]
    }
}
