// src/config.rs

use crate::math::{
    algorithms::{MetaballFalloff, MetaballField, MetaballsBuilder, SaddleResolution},
    error::{MathError, MathResult},
};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] MathError),

    #[error("Invalid command line: {0}")]
    Usage(String),
}

/// Welche Metaball-Szene simuliert wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SceneKind {
    /// Feste Szene mit neun Metaballs.
    #[default]
    Classic,
    /// Reproduzierbar zufällige Szene.
    Random { count: usize, seed: u64 },
}

/// Form des Metaball-Felds: Falloff und Skalierung der Feldkoordinaten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParameters {
    pub falloff: MetaballFalloff,
    /// Faktor von der Domäne [-1, 1]² in Feldkoordinaten.
    pub domain_scale: f32,
    /// Die Summe aller Einflüsse wird hierdurch geteilt.
    pub normalization: f32,
    /// Reflexionsgrenze in Feldkoordinaten.
    pub bound: f32,
}

impl Default for FieldParameters {
    fn default() -> Self {
        Self {
            falloff: MetaballFalloff::Gaussian,
            domain_scale: 5.0,
            normalization: 5.0,
            bound: 5.0,
        }
    }
}

impl FieldParameters {
    pub fn validate(&self) -> MathResult<()> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(MathError::InvalidConfiguration {
                    message: format!("{name} must be positive and finite, got {value}"),
                })
            }
        };
        positive("domain_scale", self.domain_scale)?;
        positive("bound", self.bound)?;
        if !self.normalization.is_finite() || self.normalization == 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("normalization must be non-zero, got {}", self.normalization),
            });
        }
        if let MetaballFalloff::Algebraic {
            radius_scale_factor,
        } = self.falloff
        {
            positive("radius_scale_factor", radius_scale_factor)?;
        }
        Ok(())
    }
}

impl SceneKind {
    pub fn build_field(&self, parameters: &FieldParameters, movement_scale: f32) -> MetaballField {
        // Parameter zuerst setzen: `random_sources` und `classic_balls` lesen bound und falloff
        let builder = MetaballsBuilder::new()
            .domain_scale(parameters.domain_scale)
            .normalization(parameters.normalization)
            .bound(parameters.bound)
            .falloff(parameters.falloff)
            .movement_scale(movement_scale);
        match *self {
            SceneKind::Classic => builder.classic_balls(),
            SceneKind::Random { count, seed } => builder.random_sources(count, seed),
        }
        .build()
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsolineSettings {
    // --- Gitter ---
    pub grid_width: usize,
    pub grid_height: usize,

    // --- Isolinien ---
    pub isoline_count: i32,
    pub saddle_resolution: SaddleResolution,

    // --- Feld ---
    pub scene: SceneKind,
    pub field: FieldParameters,
    pub movement_scale: f32,
    pub paused: bool,

    // --- Visualisierung ---
    /// Pixel pro Einheit der normalisierten Domäne.
    pub render_scale: f32,
    pub line_color: [f32; 3],
    pub show_fill: bool,
}

impl Default for IsolineSettings {
    fn default() -> Self {
        Self {
            // Gitter
            grid_width: 400,
            grid_height: 300,

            // Isolinien
            isoline_count: 10,
            saddle_resolution: SaddleResolution::CenterValue,

            // Feld
            scene: SceneKind::Classic,
            field: FieldParameters::default(),
            movement_scale: 1.0,
            paused: false,

            // Vis
            render_scale: 300.0,
            line_color: [1.0, 1.0, 1.0],
            show_fill: true,
        }
    }
}

impl IsolineSettings {
    pub fn validate(&self) -> MathResult<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(MathError::InvalidGridDimensions {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.isoline_count < 0 {
            return Err(MathError::InvalidIsolineCount {
                count: self.isoline_count,
            });
        }
        if self.render_scale.is_nan() || self.render_scale <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("render_scale must be positive, got {}", self.render_scale),
            });
        }
        if !self.movement_scale.is_finite() {
            return Err(MathError::InvalidConfiguration {
                message: format!("movement_scale must be finite, got {}", self.movement_scale),
            });
        }
        self.field.validate()
    }

    /// Baut das Feld der konfigurierten Szene.
    pub fn build_field(&self) -> MetaballField {
        self.scene.build_field(&self.field, self.movement_scale)
    }

    pub fn line_color(&self) -> Color {
        let [r, g, b] = self.line_color;
        Color::rgb(r, g, b)
    }
}

/// Liest und validiert Einstellungen aus einer JSON-Datei.
/// Fehlende Felder übernehmen die Standardwerte.
pub fn load_settings(path: &Path) -> Result<IsolineSettings, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&text)
}

pub fn parse_settings(text: &str) -> Result<IsolineSettings, ConfigError> {
    let settings: IsolineSettings = serde_json::from_str(text)?;
    settings.validate()?;
    Ok(settings)
}

/// Startoptionen: `[config.json] [--export-svg <ausgabe.svg>]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchOptions {
    pub config_path: Option<PathBuf>,
    pub export_svg: Option<PathBuf>,
}

impl LaunchOptions {
    /// Erwartet die Argumente ohne Programmnamen.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--export-svg" => {
                    let path = args.next().ok_or_else(|| {
                        ConfigError::Usage("--export-svg requires an output path".to_string())
                    })?;
                    options.export_svg = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::Usage(format!("unknown option {flag}")));
                }
                _ if options.config_path.is_none() => {
                    options.config_path = Some(PathBuf::from(&arg));
                }
                _ => {
                    return Err(ConfigError::Usage(format!("unexpected argument {arg}")));
                }
            }
        }
        Ok(options)
    }

    pub fn load_settings(&self) -> Result<IsolineSettings, ConfigError> {
        match &self.config_path {
            Some(path) => load_settings(path),
            None => Ok(IsolineSettings::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = IsolineSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!((settings.grid_width, settings.grid_height), (400, 300));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = parse_settings(r#"{ "isoline_count": 4, "grid_width": 50 }"#).unwrap();
        assert_eq!(settings.isoline_count, 4);
        assert_eq!(settings.grid_width, 50);
        assert_eq!(settings.grid_height, 300);
        assert_eq!(settings.scene, SceneKind::Classic);
    }

    #[test]
    fn test_scene_and_saddle_from_json() {
        let settings = parse_settings(
            r#"{
                "scene": { "Random": { "count": 5, "seed": 7 } },
                "saddle_resolution": "JoinPositive"
            }"#,
        )
        .unwrap();
        assert_eq!(settings.scene, SceneKind::Random { count: 5, seed: 7 });
        assert_eq!(settings.saddle_resolution, SaddleResolution::JoinPositive);
        assert_eq!(settings.build_field().len(), 5);
    }

    #[test]
    fn test_field_parameters_from_json() {
        let settings = parse_settings(
            r#"{
                "field": {
                    "falloff": { "Algebraic": { "radius_scale_factor": 0.5 } },
                    "domain_scale": 3.0,
                    "bound": 4.0
                }
            }"#,
        )
        .unwrap();
        let falloff = MetaballFalloff::Algebraic {
            radius_scale_factor: 0.5,
        };
        assert_eq!(settings.field.falloff, falloff);
        assert_eq!(settings.field.normalization, 5.0);

        let field = settings.build_field();
        assert_eq!(field.len(), 9);
        assert!(field.sources.iter().all(|s| s.falloff == falloff));
        assert_eq!(field.domain_scale, 3.0);
        assert_eq!(field.bound, 4.0);

        let wyvill = parse_settings(r#"{ "field": { "falloff": "WyvillCubic" } }"#).unwrap();
        assert!(
            wyvill
                .build_field()
                .sources
                .iter()
                .all(|s| s.falloff == MetaballFalloff::WyvillCubic)
        );
    }

    #[test]
    fn test_invalid_field_parameters_rejected() {
        for text in [
            r#"{ "field": { "domain_scale": 0.0 } }"#,
            r#"{ "field": { "normalization": 0.0 } }"#,
            r#"{ "field": { "bound": -1.0 } }"#,
            r#"{ "field": { "falloff": { "Algebraic": { "radius_scale_factor": 0.0 } } } }"#,
        ] {
            assert!(matches!(
                parse_settings(text),
                Err(ConfigError::Invalid(MathError::InvalidConfiguration { .. }))
            ));
        }
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(matches!(
            parse_settings(r#"{ "grid_width": 0 }"#),
            Err(ConfigError::Invalid(MathError::InvalidGridDimensions { .. }))
        ));
        assert!(matches!(
            parse_settings(r#"{ "isoline_count": -2 }"#),
            Err(ConfigError::Invalid(MathError::InvalidIsolineCount { count: -2 }))
        ));
        assert!(matches!(parse_settings("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_settings(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_launch_options() {
        let options = LaunchOptions::from_args(["scene.json", "--export-svg", "out.svg"]).unwrap();
        assert_eq!(options.config_path, Some(PathBuf::from("scene.json")));
        assert_eq!(options.export_svg, Some(PathBuf::from("out.svg")));

        assert_eq!(
            LaunchOptions::from_args(Vec::<String>::new()).unwrap(),
            LaunchOptions::default()
        );
        assert!(LaunchOptions::from_args(["--export-svg"]).is_err());
        assert!(LaunchOptions::from_args(["--bogus"]).is_err());
        assert!(LaunchOptions::from_args(["a.json", "b.json"]).is_err());
    }
}
