// src/math/algorithms/metaballs/field.rs

use super::source::MetaballSource;
use crate::math::scalar_field::ScalarField2D;
use bevy::log::debug;
use bevy::math::Vec2;

/// Summe aller Metaball-Einflüsse als kontinuierliches Skalarfeld.
///
/// Abtastkoordinaten aus der normalisierten Domäne [-1, 1]² werden mit
/// `domain_scale` in Feldkoordinaten überführt; die Summe wird durch
/// `normalization` geteilt.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaballField {
    pub sources: Vec<MetaballSource>,
    pub domain_scale: f32,
    pub normalization: f32,
    /// Quellen werden an der Box [-bound, bound]² (Feldkoordinaten) reflektiert.
    pub bound: f32,
    /// Multiplikator auf `dt` in `advance`.
    pub movement_scale: f32,
}

impl MetaballField {
    pub fn new(sources: Vec<MetaballSource>) -> Self {
        Self {
            sources,
            domain_scale: 5.0,
            normalization: 5.0,
            bound: 5.0,
            movement_scale: 1.0,
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl ScalarField2D for MetaballField {
    fn evaluate(&self, x: f32, y: f32) -> f32 {
        let point = Vec2::new(x, y) * self.domain_scale;
        let total: f32 = self
            .sources
            .iter()
            .map(|source| source.influence_at(point))
            .sum();
        total / self.normalization
    }

    fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            debug!("MetaballField::advance ignored invalid time step {dt}");
            return;
        }
        let step = dt * self.movement_scale;
        for source in &mut self.sources {
            source.advance(step, self.bound);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn single_ball_field() -> MetaballField {
        MetaballField::new(vec![
            MetaballSource::new(Vec2::ZERO, 1.0, 5.0).with_velocity(Vec2::new(2.0, 0.0)),
        ])
    }

    #[test]
    fn test_evaluate_scales_domain_and_normalizes() {
        let field = single_ball_field();
        // Zentrum: 5 / 5
        assert_relative_eq!(field.evaluate(0.0, 0.0), 1.0);
        // (0.2, 0) -> Feldkoordinate (1, 0), distance² = radius²
        assert_relative_eq!(field.evaluate(0.2, 0.0), (-1.0f32).exp(), epsilon = 1e-6);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let field = single_ball_field();
        assert_eq!(field.evaluate(0.3, -0.1), field.evaluate(0.3, -0.1));
    }

    #[test]
    fn test_advance_moves_sources_with_movement_scale() {
        let mut field = single_ball_field();
        field.movement_scale = 0.5;
        field.advance(1.0);
        assert_relative_eq!(field.sources[0].position.x, 1.0);
        assert!(field.evaluate(0.2, 0.0) > field.evaluate(0.0, 0.0));
    }

    #[test]
    fn test_advance_ignores_invalid_dt() {
        let mut field = single_ball_field();
        let before = field.clone();
        field.advance(-1.0);
        field.advance(f32::NAN);
        assert_eq!(field, before);
    }

    #[test]
    fn test_sources_stay_near_bounds() {
        let mut field = single_ball_field();
        for _ in 0..1000 {
            field.advance(0.05);
        }
        // Maximal ein Schritt über die Grenze hinaus
        assert!(field.sources[0].position.x.abs() <= field.bound + 0.1 + 1e-4);
    }
}
