// src/math/algorithms/marching_squares/mod.rs

pub mod cell;
pub mod edge_cache;
pub mod extractor;
pub mod levels;

pub use self::cell::{CellCase, LineOrientation, SaddleResolution};
pub use self::edge_cache::{EdgeCache, EdgeKey};
pub use self::extractor::{IsolineBatch, IsolineExtractor, IsolineSet, LevelRange};
pub use self::levels::isoline_levels;
