// src/math/algorithms/mod.rs

pub mod marching_squares;
pub mod metaballs;

pub use self::marching_squares::{
    CellCase, IsolineBatch, IsolineExtractor, IsolineSet, SaddleResolution, isoline_levels,
};
pub use self::metaballs::{MetaballFalloff, MetaballField, MetaballSource, MetaballsBuilder};
