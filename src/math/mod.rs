pub mod algorithms;
pub mod error;
pub mod grid;
pub mod sampling;
pub mod scalar_field;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        algorithms::{
            marching_squares::{
                CellCase, EdgeKey, IsolineBatch, IsolineExtractor, IsolineSet, SaddleResolution,
                isoline_levels,
            },
            metaballs::{MetaballFalloff, MetaballField, MetaballSource, MetaballsBuilder},
        },
        error::{MathError, MathResult},
        grid::Grid,
        sampling::{FieldValues, value_to_color},
        scalar_field::{AnalyticField, ScalarField2D},
        types::*,
    };
}
