// src/math/algorithms/metaballs/mod.rs

pub mod builder;
pub mod field;
pub mod source;

pub use self::builder::MetaballsBuilder;
pub use self::field::MetaballField;
pub use self::source::{MetaballFalloff, MetaballSource};
