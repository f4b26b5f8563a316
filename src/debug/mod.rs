pub mod export;
pub mod svg;
