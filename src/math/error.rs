// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid grid dimensions: {width}x{height} cells (both must be at least 1)")]
    InvalidGridDimensions { width: usize, height: usize },

    #[error("Invalid isoline count: {count} (must not be negative)")]
    InvalidIsolineCount { count: i32 },

    #[error("Dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

pub type MathResult<T> = Result<T, MathError>;
