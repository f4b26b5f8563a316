// src/math/algorithms/marching_squares/edge_cache.rs

use std::collections::HashMap;

/// Reihenfolge-unabhängiger Schlüssel einer Gitterkante: {a, b} == {b, a}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    low: usize,
    high: usize,
}

impl EdgeKey {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn low(&self) -> usize {
        self.low
    }

    pub fn high(&self) -> usize {
        self.high
    }
}

/// Merkt sich pro Gitterkante den Index des bereits interpolierten Vertex.
/// Gilt nur für die Extraktion eines einzelnen Levels.
#[derive(Debug)]
pub struct EdgeCache {
    vertices: HashMap<EdgeKey, u32>,
}

impl EdgeCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: HashMap::with_capacity(capacity),
        }
    }

    /// Liefert den gespeicherten Vertex-Index oder erzeugt ihn über `create`.
    pub fn get_or_insert_with(&mut self, key: EdgeKey, create: impl FnOnce() -> u32) -> u32 {
        *self.vertices.entry(key).or_insert_with(create)
    }
}
