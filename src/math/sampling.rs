// src/math/sampling.rs

use crate::math::{
    error::{MathError, MathResult},
    grid::Grid,
    scalar_field::ScalarField2D,
    types::Rgb,
    utils::constants,
};

/// Neutrale Farbe für konstante Felder (Spannweite ~0).
pub const NEUTRAL_COLOR: Rgb = Rgb::new(0.5, 0.5, 0.5);

/// Feldwerte an allen Gitterpunkten eines Frames, gleiche Indizierung wie `Grid::points`.
/// Wird pro Frame komplett neu berechnet, nie inkrementell aktualisiert.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValues {
    values: Vec<f32>,
    min: f32,
    max: f32,
}

impl FieldValues {
    /// Wertet `field` an jedem Gitterpunkt aus und merkt sich Minimum und Maximum.
    pub fn sample<F: ScalarField2D + ?Sized>(grid: &Grid, field: &F) -> Self {
        let values = grid
            .points()
            .iter()
            .map(|p| field.evaluate(p.x, p.y))
            .collect();
        Self::from_values(values)
    }

    /// Übernimmt bereits berechnete Werte (z.B. aus einer externen Quelle).
    pub fn from_values(values: Vec<f32>) -> Self {
        let (min, max) = values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        if values.is_empty() || !min.is_finite() || !max.is_finite() {
            // Leer oder nur NaN: Spannweite 0, Farbabbildung fällt auf neutral zurück
            let fallback = if min.is_finite() { min } else { 0.0 };
            return Self {
                values,
                min: fallback,
                max: fallback,
            };
        }

        Self { values, min, max }
    }

    /// Wie `from_values`, prüft aber, dass die Anzahl zum Gitter passt.
    pub fn for_grid(grid: &Grid, values: Vec<f32>) -> MathResult<Self> {
        if values.len() != grid.point_count() {
            return Err(MathError::DimensionMismatch {
                expected: grid.point_count(),
                actual: values.len(),
            });
        }
        Ok(Self::from_values(values))
    }

    #[inline]
    pub fn value(&self, index: usize) -> f32 {
        self.values[index]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn range(&self) -> f32 {
        self.max - self.min
    }

    /// Eine Farbe pro Gitterpunkt für die gefüllte Darstellung.
    pub fn colors(&self) -> Vec<Rgb> {
        self.values
            .iter()
            .map(|&v| value_to_color(v, self.min, self.max))
            .collect()
    }
}

/// Bildet einen Wert linear auf eine monotone Farbrampe ab (hell -> blau-dunkel).
pub fn value_to_color(value: f32, min: f32, max: f32) -> Rgb {
    let span = max - min;
    if span.is_nan() || span < constants::COLOR_RANGE_EPSILON {
        return NEUTRAL_COLOR;
    }
    let c = ((value - min) / span).clamp(0.0, 1.0);
    Rgb::new(1.0 - 0.4 * c, 1.0 - 0.6 * c, 1.0 - c)
}
