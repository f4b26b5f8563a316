// src/math/algorithms/metaballs/builder.rs

use super::{
    field::MetaballField,
    source::{MetaballFalloff, MetaballSource},
};
use crate::math::utils::constants;
use bevy::math::Vec2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Builder zum komfortablen Erstellen und Konfigurieren von `MetaballField`-Instanzen.
#[derive(Debug, Clone)]
pub struct MetaballsBuilder {
    domain_scale: f32,
    normalization: f32,
    bound: f32,
    movement_scale: f32,
    /// Falloff für alle vom Builder selbst erzeugten Bälle.
    falloff: MetaballFalloff,
    sources: Vec<MetaballSource>,
}

impl Default for MetaballsBuilder {
    fn default() -> Self {
        Self {
            domain_scale: 5.0,
            normalization: 5.0,
            bound: 5.0,
            movement_scale: 1.0,
            falloff: MetaballFalloff::default(),
            sources: Vec::new(),
        }
    }
}

impl MetaballsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt die klassische Szene mit neun Metaballs hinzu.
    pub fn classic_balls(self) -> Self {
        // (position, velocity, radius, strength)
        const CLASSIC: [([f32; 2], [f32; 2], f32, f32); 9] = [
            ([1.0, -0.3], [0.0, 0.5], 1.2, 1.2),
            ([0.6, -0.4], [-0.5, -0.7], -1.3, 0.9),
            ([1.0, 0.0], [0.6, 0.1], 1.5, 1.3),
            ([0.0, 0.5], [1.0, -0.3], 1.3, 1.2),
            ([0.6, 0.1], [-0.5, -0.7], 1.2, 0.9),
            ([1.0, -0.7], [-1.0, 0.7], 0.8, 1.5),
            ([0.0, 0.0], [-0.9, 0.5], 1.5, 0.5),
            ([-1.0, 0.0], [-1.0, 0.5], 0.9, 1.5),
            ([-0.3, 0.2], [-0.1, 0.6], 1.1, 0.7),
        ];

        let falloff = self.falloff;
        self.add_balls(
            CLASSIC
                .iter()
                .map(|&(position, velocity, radius, strength)| {
                    MetaballSource::new(Vec2::from(position), radius, strength)
                        .with_velocity(Vec2::from(velocity))
                        .with_falloff(falloff)
                }),
        )
    }

    pub fn domain_scale(mut self, scale: f32) -> Self {
        self.domain_scale = scale.max(constants::EPSILON);
        self
    }

    pub fn normalization(mut self, normalization: f32) -> Self {
        self.normalization = if normalization.abs() < constants::EPSILON {
            1.0
        } else {
            normalization
        };
        self
    }

    pub fn bound(mut self, bound: f32) -> Self {
        self.bound = bound.abs();
        self
    }

    pub fn movement_scale(mut self, scale: f32) -> Self {
        self.movement_scale = scale;
        self
    }

    /// Gilt für danach erzeugte Bälle (`classic_balls`, `random_sources`).
    pub fn falloff(mut self, falloff: MetaballFalloff) -> Self {
        self.falloff = falloff;
        self
    }

    pub fn add_ball(mut self, ball: MetaballSource) -> Self {
        self.sources.push(ball);
        self
    }

    pub fn add_balls<I>(mut self, balls: I) -> Self
    where
        I: IntoIterator<Item = MetaballSource>,
    {
        self.sources.extend(balls);
        self
    }

    /// Fügt `count` reproduzierbar zufällige Metaballs innerhalb von `bound` hinzu.
    pub fn random_sources(mut self, count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let bound = self.bound.max(constants::EPSILON);
        for _ in 0..count {
            let position = Vec2::new(
                rng.random_range(-bound..=bound),
                rng.random_range(-bound..=bound),
            ) * 0.5;
            let velocity = Vec2::new(
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
            );
            let radius = rng.random_range(0.7..=1.6);
            let strength = rng.random_range(0.5..=1.5);
            self.sources.push(
                MetaballSource::new(position, radius, strength)
                    .with_velocity(velocity)
                    .with_falloff(self.falloff),
            );
        }
        self
    }

    pub fn build(self) -> MetaballField {
        MetaballField {
            sources: self.sources,
            domain_scale: self.domain_scale,
            normalization: self.normalization,
            bound: self.bound,
            movement_scale: self.movement_scale,
        }
    }
}
