// src/math/algorithms/metaballs/source.rs

use crate::math::utils::constants;
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Definiert, wie der Einfluss eines `MetaballSource` mit der Distanz abnimmt.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum MetaballFalloff {
    /// Radiale Basisfunktion `strength * exp(-distance² / radius²)`.
    /// Unbeschränkter Träger, glatter klassischer Metaball-Look.
    #[default]
    Gaussian,
    /// Algebraischer Falloff: `strength / ((distance / (radius * scale_factor))² + 1)`.
    Algebraic {
        /// Bei `distance = radius * radius_scale_factor` ist die Stärke halbiert.
        radius_scale_factor: f32,
    },
    /// Wyvill-Falloff `strength * (1 - (distance / radius)²)³`, Null ab `radius`.
    WyvillCubic,
}

/// Ein einzelner bewegter Metaball als Quelle des Skalarfelds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaballSource {
    pub position: Vec2,
    /// Bewegungsrichtung und -geschwindigkeit in Feldeinheiten pro Sekunde.
    pub velocity: Vec2,
    /// Nur das Quadrat geht ein, das Vorzeichen ist daher bedeutungslos.
    pub radius: f32,
    /// Vorfaktor; negative Werte erzeugen Senken statt Hügel.
    pub strength: f32,
    #[serde(default)]
    pub falloff: MetaballFalloff,
}

impl MetaballSource {
    /// Beachte die Parameterreihenfolge: `position`, `radius`, `strength`.
    pub fn new(position: Vec2, radius: f32, strength: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
            strength,
            falloff: MetaballFalloff::default(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_falloff(mut self, falloff: MetaballFalloff) -> Self {
        self.falloff = falloff;
        self
    }

    /// Einfluss dieser Quelle am Punkt `point` (in Feldkoordinaten).
    pub fn influence_at(&self, point: Vec2) -> f32 {
        let radius_sq = self.radius * self.radius;
        if radius_sq < constants::EPSILON {
            return 0.0;
        }
        let distance_sq = self.position.distance_squared(point);

        match self.falloff {
            MetaballFalloff::Gaussian => self.strength * (-distance_sq / radius_sq).exp(),
            MetaballFalloff::Algebraic {
                radius_scale_factor,
            } => {
                let scaled_sq = radius_sq * radius_scale_factor.max(constants::EPSILON).powi(2);
                self.strength / (distance_sq / scaled_sq + 1.0)
            }
            MetaballFalloff::WyvillCubic => {
                let normalized_sq = distance_sq / radius_sq;
                if normalized_sq >= 1.0 {
                    return 0.0;
                }
                self.strength * (1.0 - normalized_sq).powi(3)
            }
        }
    }

    /// Bewegt die Quelle um `dt * velocity` und reflektiert an der Box `[-bound, bound]²`:
    /// eine Geschwindigkeitskomponente kehrt sich um, sobald der Betrag der
    /// Koordinate `bound` übersteigt und die Quelle noch nach außen läuft.
    ///
    /// Ein reines "außerhalb → umkehren" würde bei großem `dt` jeden Frame erneut
    /// umkehren, solange die Quelle noch jenseits der Grenze liegt, und sie dort
    /// festhalten. Die Bedingung auf die Bewegungsrichtung kehrt pro Grenzübertritt
    /// genau einmal um.
    pub fn advance(&mut self, dt: f32, bound: f32) {
        self.position += self.velocity * dt;

        if self.position.x.abs() > bound && self.position.x * self.velocity.x > 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y.abs() > bound && self.position.y * self.velocity.y > 0.0 {
            self.velocity.y = -self.velocity.y;
        }
    }
}
